//! Constants used throughout radkeep.
//!
//! Centralizes attribute names, environment variables, and defaults.

/// Attribute holding the NT (MD4) hash of the user's secret.
pub const NT_PASSWORD: &str = "NT-Password";

/// Attribute holding the user's secret in cleartext.
pub const CLEARTEXT_PASSWORD: &str = "Cleartext-Password";

/// Attribute holding the message returned on successful authentication.
pub const REPLY_MESSAGE: &str = "Reply-Message";

/// Default reply message template. `{username}` is substituted.
pub const DEFAULT_REPLY_MESSAGE: &str = "Welcome {username}";

/// Hex digits in an NT hash
pub const NT_HASH_LEN: usize = 32;

/// Default generated secret length.
pub const DEFAULT_SECRET_LENGTH: usize = 12;

/// Smallest secret that can hold one character of every class.
pub const MIN_SECRET_LENGTH: usize = 4;

/// Timestamp format used in history comments.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Application directory name inside the platform config directory.
pub const APP_DIR: &str = "radkeep";

/// Environment variable naming the backing authorize file.
pub const ENV_FILE: &str = "RADKEEP_FILE";

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "RADKEEP_CONFIG";

/// Environment variable enabling unmasked secrets in diagnostics.
pub const ENV_REVEAL_SECRETS: &str = "RADKEEP_DEBUG_LOG_SECRETS";

/// Environment variable holding the tracing filter.
pub const ENV_LOG: &str = "RADKEEP_LOG";

/// Characters kept visible when masking a secret.
pub const SECRET_MASK_KEEP: usize = 2;

/// Characters kept visible when masking a hash.
pub const HASH_MASK_KEEP: usize = 6;
