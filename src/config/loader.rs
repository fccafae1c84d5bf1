//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Two entry points: [`load_config`] reads a TOML file (local runner) and
//! [`load_config_from_env`] starts from defaults (Lambda, where the whole
//! configuration arrives as `STRATUS_*` environment variables). Both apply
//! the same overrides and validation.

use super::schema::StratusConfig;
use super::secret::secret_string;
use crate::domain::errors::StratusError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Parses the TOML into StratusConfig
/// 3. Applies environment variable overrides (STRATUS_* prefix)
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails or
/// configuration validation fails.
///
/// # Examples
///
/// ```no_run
/// use stratus::config::load_config;
///
/// let config = load_config("stratus.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StratusConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StratusError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StratusError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config: StratusConfig = toml::from_str(&contents)
        .map_err(|e| StratusError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        StratusError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Builds configuration from defaults plus environment overrides
///
/// This is the entry point used by the Lambda binaries, where no
/// configuration file exists.
///
/// # Errors
///
/// Returns an error if the resulting configuration is invalid (most
/// commonly a missing `STRATUS_STORAGE_BUCKET`).
pub fn load_config_from_env() -> Result<StratusConfig> {
    let mut config = StratusConfig::default();
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        StratusError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Applies environment variable overrides using the STRATUS_* prefix
///
/// Environment variables follow the pattern: STRATUS_<SECTION>_<KEY>
/// For example: STRATUS_STORAGE_BUCKET, STRATUS_WEATHER_BASE_URL
fn apply_env_overrides(config: &mut StratusConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("STRATUS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // AWS overrides
    if let Ok(val) = std::env::var("STRATUS_AWS_REGION") {
        config.aws.region = Some(val);
    }

    // Storage overrides
    if let Ok(val) = std::env::var("STRATUS_STORAGE_BUCKET") {
        config.storage.bucket = val;
    }
    if let Ok(val) = std::env::var("STRATUS_STORAGE_RAW_PREFIX") {
        config.storage.raw_prefix = val;
    }
    if let Ok(val) = std::env::var("STRATUS_STORAGE_CSV_PREFIX") {
        config.storage.csv_prefix = val;
    }
    if let Ok(val) = std::env::var("STRATUS_STORAGE_LINK_TTL_SECONDS") {
        if let Ok(ttl) = val.parse() {
            config.storage.link_ttl_seconds = ttl;
        }
    }

    // Database overrides
    if let Ok(val) = std::env::var("STRATUS_DATABASE_SECRET_ID") {
        config.database.secret_id = val;
    }
    if let Ok(val) = std::env::var("STRATUS_DATABASE_PORT") {
        if let Ok(port) = val.parse() {
            config.database.port = port;
        }
    }
    if let Ok(val) = std::env::var("STRATUS_DATABASE_CONNECT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.database.connect_timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("STRATUS_DATABASE_MAX_CONNECTIONS") {
        if let Ok(max) = val.parse() {
            config.database.max_connections = max;
        }
    }

    // Weather API overrides
    if let Ok(val) = std::env::var("STRATUS_WEATHER_BASE_URL") {
        config.weather.base_url = val;
    }
    if let Ok(val) = std::env::var("STRATUS_WEATHER_HISTORY_BASE_URL") {
        config.weather.history_base_url = val;
    }
    if let Ok(val) = std::env::var("STRATUS_WEATHER_SECRET_ID") {
        config.weather.secret_id = val;
    }
    if let Ok(val) = std::env::var("STRATUS_WEATHER_UNITS") {
        config.weather.units = val;
    }
    if let Ok(val) = std::env::var("STRATUS_WEATHER_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.weather.timeout_seconds = timeout;
        }
    }

    // Country API overrides
    if let Ok(val) = std::env::var("STRATUS_COUNTRY_BASE_URL") {
        config.country.base_url = val;
    }

    // Registry overrides
    if let Ok(val) = std::env::var("STRATUS_REGISTRY_TABLE") {
        config.registry.table = val;
    }

    // Invoker overrides
    if let Ok(val) = std::env::var("STRATUS_INVOKER_FETCH_FUNCTION") {
        config.invoker.fetch_function = val;
    }

    // Backfill overrides
    if let Ok(val) = std::env::var("STRATUS_BACKFILL_EPOCH_START") {
        if let Ok(epoch) = val.parse() {
            config.backfill.epoch_start = epoch;
        }
    }
    if let Ok(val) = std::env::var("STRATUS_BACKFILL_STEP_SECONDS") {
        if let Ok(step) = val.parse() {
            config.backfill.step_seconds = step;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("STRATUS_EXPORT_API_KEY") {
        config.export.api_key = Some(secret_string(val));
    }
}
