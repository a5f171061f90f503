use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};

/// Install the process-wide tracing subscriber.
///
/// `RUST_LOG` wins over the configured `LOG_LEVEL`. Output goes to stderr so
/// stdout stays reserved for processed records.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }

    tracing::debug!(
        level = %config.log_level,
        format = ?config.log_format,
        "Tracing initialised"
    );
}
