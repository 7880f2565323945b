//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, PdpConfig};

/// Install the process-wide subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Safe to call
/// multiple times; later calls are no-ops.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    };
}

/// Install the subscriber in the configured output format.
pub fn init_from_config(config: &PdpConfig) {
    init(config.log_format);
}
