//! Structured logging setup using tracing
//!
//! This module provides structured JSON logging with configurable log
//! levels. Output goes to stdout, where the Lambda runtime forwards it to
//! CloudWatch; the local runner prints the same JSON lines.
//!
//! # Example
//!
//! ```no_run
//! use stratus::logging::init_logging;
//!
//! init_logging("info").expect("Failed to initialize logging");
//! ```

use crate::domain::Result;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system
///
/// Sets up a JSON-formatted subscriber filtered by `RUST_LOG` when set,
/// falling back to the configured level for the `stratus` target.
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
///
/// # Example
///
/// ```no_run
/// use stratus::logging::init_logging;
///
/// init_logging("debug").expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level_str: &str) -> Result<()> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stratus={log_level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json().with_target(true))
        .init();

    tracing::debug!(level = %log_level, "Logging initialized");

    Ok(())
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(crate::domain::StratusError::Configuration(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
