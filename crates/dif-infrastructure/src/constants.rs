//! Infrastructure layer constants
//!
//! Convention names and other core constants live in `dif_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "dif.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "dif";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DIF";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "DIF_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix used when the configured log path has no file name
pub const DEFAULT_LOG_FILE_PREFIX: &str = "dif";
