//! Structured logging setup

use hapticore_errors::{HapticsError, HapticsResult};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Events go to stderr so
/// stdout stays free for command output.
///
/// # Errors
///
/// Returns [`HapticsError::Config`] when the level is not a valid filter
/// directive and [`HapticsError::Runtime`] when a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> HapticsResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| HapticsError::config(format!("invalid log level: {e}")))?,
    };

    let fmt_layer = if config.json_format {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| HapticsError::runtime(format!("logging already initialized: {e}")))?;

    info!(
        level = %config.level,
        json = config.json_format,
        "structured logging initialized"
    );
    Ok(())
}
