//! Integration tests for logging functionality
//!
//! The tracing subscriber is process-global and can be installed only
//! once, so exactly one test performs a successful initialization.

use stratus::logging::init_logging;
use stratus::{log_error_with_context, log_loop_summary, log_staged_object};

#[test]
fn test_init_logging_rejects_invalid_level() {
    // Level parsing happens before any global state is touched
    let result = init_logging("verbose");
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Invalid log level"));
    }

    let result = init_logging("");
    assert!(result.is_err());
}

#[test]
fn test_init_logging_and_macros() {
    init_logging("debug").expect("Failed to initialize logging");

    // Emitting through the macros must not panic with the subscriber
    // installed
    log_staged_object!("raw/683506-bucharest_2025-01-01.json", "raw-weather-data");
    log_loop_summary!("fan-out", 25, 2);

    let error = stratus::domain::StratusError::Configuration("missing bucket".to_string());
    log_error_with_context!(&error, "Loading configuration");
}
