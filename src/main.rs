//! radkeep - manage users in a FreeRADIUS authorize file.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use radkeep::cli::output;
use radkeep::cli::{execute, Cli};
use radkeep::core::constants::ENV_LOG;
use radkeep::error::{ConfigError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("radkeep=debug")
        } else {
            EnvFilter::new("radkeep=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Store(StoreError::NotFound(user)) => Some(format!("run: radkeep add {}", user)),
            Error::Store(StoreError::DuplicateUser(user)) => {
                Some(format!("run: radkeep reset {}", user))
            }
            Error::Config(ConfigError::MissingFile) => {
                Some("set --file or RADKEEP_FILE".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
