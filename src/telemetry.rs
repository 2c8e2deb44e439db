//! Tracing subscriber setup for the service binary.

use tracing_subscriber::EnvFilter;

use crate::error::{EngineError, EngineResult};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` is used as the filter.
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init(log_level: &str) -> EngineResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|e| EngineError::Telemetry {
            message: format!("invalid log filter '{}': {}", log_level, e),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| EngineError::Telemetry {
            message: e.to_string(),
        })
}
