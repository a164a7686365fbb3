//! # Infrastructure Layer
//!
//! Technical concerns around the invoker core: a small service container that
//! acts as the resolution context, configuration, logging and the composition
//! root that wires the collaborators.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Service container and bootstrap |
//! | [`config`] | Figment-based configuration |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`constants`] | Infrastructure constants |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, DispatchConfig, LoggingConfig};
pub use di::{AppContext, ServiceCollection, ServiceProvider, init_app};
