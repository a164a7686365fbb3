//! Configuration types

pub mod app;
pub mod dispatch;
pub mod logging;

pub use app::AppConfig;
pub use dispatch::DispatchConfig;
pub use logging::LoggingConfig;
