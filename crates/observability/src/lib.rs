//! Tracing and logging setup shared by every binary and test harness that embeds
//! the authorization core.

pub mod config;
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops). A malformed
/// `PLANNR_LOG_FORMAT` falls back to the default format with a warning.
pub fn init() {
    let config = match ObservabilityConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            let config = ObservabilityConfig::default();
            tracing::init_with(&config);
            ::tracing::warn!(error = %err, "invalid observability config; using defaults");
            return;
        }
    };
    tracing::init_with(&config);
}
