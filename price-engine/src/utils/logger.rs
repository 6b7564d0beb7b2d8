//! Logging Infrastructure
//!
//! Structured logging to stdout, or to a daily rolling file when a log
//! directory is configured.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::{EngineResult, PricingError};

/// Log file prefix inside the log directory
pub const LOG_FILE_PREFIX: &str = "price-engine";

fn env_filter(level: &str) -> EngineResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| PricingError::Configuration(format!("invalid log level '{}': {}", level, e)))
}

/// Initialize the global subscriber
///
/// `level` accepts any `EnvFilter` directive (`info`, `price_engine=debug`).
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_logger(level: &str, log_dir: Option<&str>) -> EngineResult<()> {
    let filter = env_filter(level)?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = match log_dir {
        Some(dir) => {
            let path = Path::new(dir);
            std::fs::create_dir_all(path).map_err(|e| {
                PricingError::Configuration(format!("cannot create log dir {}: {}", dir, e))
            })?;
            let appender = tracing_appender::rolling::daily(path, LOG_FILE_PREFIX);
            subscriber.with_ansi(false).with_writer(appender).try_init()
        }
        None => subscriber.try_init(),
    };

    result.map_err(|e| PricingError::Configuration(format!("logger already initialized: {}", e)))
}
