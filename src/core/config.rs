//! Configuration file management.
//!
//! Handles reading and validating the optional `config.toml`, and layering
//! environment overrides on top of it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{
    APP_DIR, CONFIG_FILE, DEFAULT_REPLY_MESSAGE, DEFAULT_SECRET_LENGTH, ENV_REVEAL_SECRETS,
    MIN_SECRET_LENGTH,
};
use crate::core::mask::is_truthy;
use crate::core::store::StoreOptions;
use crate::error::{ConfigError, Result};

/// radkeep configuration
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backing file and block contents
    pub store: StoreSection,
    /// Secret generation
    pub credentials: CredentialsSection,
    /// Username construction
    pub naming: NamingSection,
    /// Diagnostics
    pub logging: LoggingSection,
}

/// `[store]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// Path to the authorize file
    pub file: Option<PathBuf>,
    /// `Reply-Message` template. Empty disables the attribute.
    pub reply_message: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            file: None,
            reply_message: DEFAULT_REPLY_MESSAGE.to_string(),
        }
    }
}

/// `[credentials]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialsSection {
    /// Generated secret length
    pub length: usize,
}

impl Default for CredentialsSection {
    fn default() -> Self {
        Self {
            length: DEFAULT_SECRET_LENGTH,
        }
    }
}

/// `[naming]` section
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingSection {
    /// When set, usernames are built as `<prefix>_<id>`
    pub prefix: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Log secrets and hashes unmasked. Off unless explicitly enabled.
    pub reveal_secrets: bool,
}

impl Config {
    /// Default config location (`<config_dir>/radkeep/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    /// Locate and load configuration.
    ///
    /// An explicit path must exist. Otherwise the default location is used
    /// if present, and built-in defaults if not.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_REVEAL_SECRETS) {
            self.logging.reveal_secrets = is_truthy(&value);
        }
    }

    /// Validate value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.length < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidValue {
                field: "credentials.length",
                reason: format!(
                    "{} is below the minimum of {}",
                    self.credentials.length, MIN_SECRET_LENGTH
                ),
            }
            .into());
        }

        if self
            .store
            .file
            .as_ref()
            .is_some_and(|f| f.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "store.file",
                reason: "path is empty".to_string(),
            }
            .into());
        }

        if self.store.reply_message.contains(char::is_control) {
            return Err(ConfigError::InvalidValue {
                field: "store.reply_message",
                reason: "must not contain control characters".to_string(),
            }
            .into());
        }

        if self.naming.prefix.as_deref() == Some("") {
            return Err(ConfigError::InvalidValue {
                field: "naming.prefix",
                reason: "prefix is empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// The authorize file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if none is configured.
    pub fn authorize_file(&self) -> Result<&Path> {
        self.store
            .file
            .as_deref()
            .ok_or_else(|| ConfigError::MissingFile.into())
    }

    /// Store options derived from this configuration
    pub fn store_options(&self) -> StoreOptions {
        let reply_message = if self.store.reply_message.is_empty() {
            None
        } else {
            Some(self.store.reply_message.clone())
        };

        StoreOptions {
            secret_length: self.credentials.length,
            reply_message,
            reveal_secrets: self.logging.reveal_secrets,
        }
    }
}
