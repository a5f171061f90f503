pub mod config;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use telemetry::init_tracing;
