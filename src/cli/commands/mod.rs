//! Command implementations for the local runner
//!
//! Each command wires the same adapters the Lambda binaries use, so the
//! behavior observed locally is the deployed behavior.

pub mod backfill;
pub mod export;
pub mod fetch;
pub mod invoke;
pub mod load;
pub mod migrate;
pub mod validate;

use std::path::Path;

use crate::config::{load_config, load_config_from_env, StratusConfig};
use crate::domain::{FunctionResponse, Result};

/// Loads configuration from the given file, or from defaults plus
/// environment overrides when the file does not exist
pub(crate) fn resolve_config(config_path: &str) -> Result<StratusConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::info!(
            config_path,
            "No configuration file; using defaults and environment overrides"
        );
        load_config_from_env()
    }
}

/// Extracts the printable message from a function response body
///
/// Success bodies are JSON-encoded strings; anything else is printed
/// as-is.
pub(crate) fn response_message(response: &FunctionResponse) -> String {
    serde_json::from_str(&response.body).unwrap_or_else(|_| response.body.clone())
}
