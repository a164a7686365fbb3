//! Main application configuration

use super::{DispatchConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Invoker and dispatch options
    pub dispatch: DispatchConfig,
}
