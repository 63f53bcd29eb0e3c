//! Command-line interface.

pub mod completions;
pub mod output;
pub mod sanitize;
pub mod users;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::Config;
use crate::core::constants::{ENV_CONFIG, ENV_FILE};
use crate::core::store::RecordStore;
use crate::core::validation::{username_for, validate_username};
use crate::error::Result;

/// radkeep - manage users in a FreeRADIUS authorize file.
#[derive(Parser)]
#[command(
    name = "radkeep",
    about = "Manage users in a FreeRADIUS authorize file",
    version
)]
pub struct Cli {
    /// Path to the authorize file
    #[arg(short, long, global = true, env = ENV_FILE)]
    pub file: Option<PathBuf>,

    /// Path to a config file
    #[arg(long, global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Treat USER arguments as external ids and build `<prefix>_<id>`
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    #[command(flatten)]
    Store(StoreCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Commands that operate on the authorize file.
#[derive(Subcommand)]
pub enum StoreCommand {
    /// Create a user with a generated password
    Add {
        /// Username (or external id with --prefix)
        user: String,
        /// Enter the password instead of generating one
        #[arg(long, conflicts_with = "hash")]
        prompt: bool,
        /// Store this NT hash as-is (import)
        #[arg(long)]
        hash: Option<String>,
    },

    /// Issue a new password for an existing user
    Reset {
        /// Username (or external id with --prefix)
        user: String,
        /// Enter the password instead of generating one
        #[arg(long)]
        prompt: bool,
    },

    /// Show a user's entry
    Status {
        /// Username (or external id with --prefix)
        user: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a user
    Rm {
        /// Username (or external id with --prefix)
        user: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove orphaned attribute lines and repeated blank lines
    Sanitize,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Everything a command needs: the opened store and naming rules.
pub struct Context {
    pub store: RecordStore,
    pub prefix: Option<String>,
}

impl Context {
    /// Resolve configuration and open the store.
    ///
    /// Precedence: command-line flag, then environment, then config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for bad or incomplete configuration and
    /// `CredentialError::HashBackendUnavailable` if hashing is unavailable.
    pub fn open(
        file: Option<PathBuf>,
        config: Option<PathBuf>,
        prefix: Option<String>,
    ) -> Result<Self> {
        let mut cfg = Config::discover(config.as_deref())?;
        cfg.apply_env();
        if file.is_some() {
            cfg.store.file = file;
        }
        if prefix.is_some() {
            cfg.naming.prefix = prefix;
        }
        cfg.validate()?;

        let path = cfg.authorize_file()?.to_path_buf();
        debug!(path = %path.display(), prefix = ?cfg.naming.prefix, "resolved configuration");

        let store = RecordStore::with_options(path, cfg.store_options())?;
        Ok(Self {
            store,
            prefix: cfg.naming.prefix,
        })
    }

    /// Turn a USER argument into a username.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the resulting username is invalid.
    pub fn username(&self, arg: &str) -> Result<String> {
        match &self.prefix {
            Some(prefix) => username_for(prefix, arg),
            None => {
                validate_username(arg)?;
                Ok(arg.to_string())
            }
        }
    }

    /// Whether secrets may be shown unmasked
    pub fn reveal_secrets(&self) -> bool {
        self.store.options().reveal_secrets
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        file,
        config,
        prefix,
        command,
        ..
    } = cli;

    match command {
        Command::Completions { shell } => completions::execute(shell),
        Command::Store(command) => {
            let ctx = Context::open(file, config, prefix)?;
            run(&ctx, command)
        }
    }
}

fn run(ctx: &Context, command: StoreCommand) -> Result<()> {
    use StoreCommand::*;

    match command {
        Add { user, prompt, hash } => users::add(ctx, &user, prompt, hash.as_deref()),
        Reset { user, prompt } => users::reset(ctx, &user, prompt),
        Status { user, json } => users::status(ctx, &user, json),
        List { json } => users::list(ctx, json),
        Rm { user, yes } => users::rm(ctx, &user, yes),
        Sanitize => sanitize::execute(ctx),
    }
}
