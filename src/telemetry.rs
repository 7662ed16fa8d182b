//! Tracing subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so that stdout carries only converted text. The filter
/// comes from `RUST_LOG` (through [`Config::log_level`]) and the output
/// format from `LOG_FORMAT`.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_level(true)
        .with_target(false);

    if config.log_format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }
}
