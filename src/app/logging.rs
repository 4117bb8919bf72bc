//! Logging configuration and initialization
//!
//! Diagnostics go to standard error so that standard output carries only
//! the mapping rows.

use crate::app::config::{AppConfig, DEFAULT_LOG_FILTER};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the application
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!("otlogging started with log filter: {}", config.log_filter);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
