//! Integration tests for configuration loading and validation
//!
//! Every test takes the environment mutex: the loader reads STRATUS_*
//! overrides from the process environment, which is shared state.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use stratus::config::{load_config, load_config_from_env};
use tempfile::NamedTempFile;

// Mutex to serialize tests that touch environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("STRATUS_APPLICATION_LOG_LEVEL");
    std::env::remove_var("STRATUS_STORAGE_BUCKET");
    std::env::remove_var("STRATUS_STORAGE_RAW_PREFIX");
    std::env::remove_var("STRATUS_STORAGE_CSV_PREFIX");
    std::env::remove_var("STRATUS_STORAGE_LINK_TTL_SECONDS");
    std::env::remove_var("STRATUS_WEATHER_UNITS");
    std::env::remove_var("STRATUS_REGISTRY_TABLE");
    std::env::remove_var("STRATUS_EXPORT_API_KEY");
}

fn write_toml(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[aws]
region = "eu-west-1"

[storage]
bucket = "raw-weather-data"
raw_prefix = "staging"
csv_prefix = "exports"
link_ttl_seconds = 7200

[database]
secret_id = "WeatherDbCredentials"
port = 5433
connect_timeout_seconds = 5
max_connections = 8
tables = ["countries", "cities", "weather_readings"]

[weather]
base_url = "https://api.openweathermap.org/data/2.5"
history_base_url = "https://history.openweathermap.org/data/2.5"
secret_id = "OpenWeatherApi"
units = "imperial"
timeout_seconds = 15

[country]
base_url = "https://restcountries.com/v3.1"
timeout_seconds = 15

[registry]
table = "tracked-cities"

[invoker]
fetch_function = "stratus-fetch-weather-prod"

[backfill]
epoch_start = 1704067200
step_seconds = 43200

[export]
api_key = "shared-export-key"
"#;

    let temp_file = write_toml(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");

    // Verify AWS config
    assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));

    // Verify storage config
    assert_eq!(config.storage.bucket, "raw-weather-data");
    assert_eq!(config.storage.raw_prefix, "staging");
    assert_eq!(config.storage.csv_prefix, "exports");
    assert_eq!(config.storage.link_ttl_seconds, 7200);

    // Verify database config
    assert_eq!(config.database.secret_id, "WeatherDbCredentials");
    assert_eq!(config.database.port, 5433);
    assert_eq!(config.database.connect_timeout_seconds, 5);
    assert_eq!(config.database.max_connections, 8);
    assert_eq!(config.database.tables.len(), 3);

    // Verify weather config
    assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
    assert_eq!(config.weather.units, "imperial");
    assert_eq!(config.weather.timeout_seconds, 15);

    // Verify country config
    assert_eq!(config.country.base_url, "https://restcountries.com/v3.1");

    // Verify registry and invoker config
    assert_eq!(config.registry.table, "tracked-cities");
    assert_eq!(config.invoker.fetch_function, "stratus-fetch-weather-prod");

    // Verify backfill config
    assert_eq!(config.backfill.epoch_start, 1_704_067_200);
    assert_eq!(config.backfill.step_seconds, 43_200);

    // Verify export config
    let api_key = config.export.api_key.expect("api_key should be set");
    assert_eq!(api_key.expose_secret().as_ref(), "shared-export-key");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[storage]
bucket = "raw-weather-data"
"#;

    let temp_file = write_toml(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert!(config.aws.region.is_none());
    assert_eq!(config.storage.raw_prefix, "raw");
    assert_eq!(config.storage.csv_prefix, "csv");
    assert_eq!(config.storage.link_ttl_seconds, 60);
    assert_eq!(config.database.secret_id, "RdsWeatherDataCredentials");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.database.max_connections, 4);
    assert_eq!(
        config.database.tables,
        vec!["countries", "cities", "weather_readings"]
    );
    assert_eq!(config.weather.secret_id, "OpenWeatherApi");
    assert_eq!(config.weather.units, "metric");
    assert_eq!(config.country.base_url, "https://restcountries.com/v3.1");
    assert_eq!(config.registry.table, "OpenWeather-cities");
    assert_eq!(config.invoker.fetch_function, "stratus-fetch-weather");
    assert_eq!(config.backfill.step_seconds, 86_400);
    assert!(config.export.api_key.is_none());
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("STRATUS_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("STRATUS_STORAGE_RAW_PREFIX", "incoming");
    std::env::set_var("STRATUS_STORAGE_LINK_TTL_SECONDS", "120");
    std::env::set_var("STRATUS_REGISTRY_TABLE", "cities-override");

    let toml_content = r#"
[application]
log_level = "info"

[storage]
bucket = "raw-weather-data"
raw_prefix = "staging"
link_ttl_seconds = 60
"#;

    let temp_file = write_toml(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.storage.raw_prefix, "incoming");
    assert_eq!(config.storage.link_ttl_seconds, 120);
    assert_eq!(config.registry.table, "cities-override");

    // File values without overrides survive
    assert_eq!(config.storage.bucket, "raw-weather-data");

    cleanup_env_vars();
}

#[test]
fn test_env_only_config_for_lambda() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    // Without the bucket the environment-only path must fail
    let result = load_config_from_env();
    assert!(result.is_err());

    std::env::set_var("STRATUS_STORAGE_BUCKET", "raw-weather-data");
    std::env::set_var("STRATUS_EXPORT_API_KEY", "shared-export-key");

    let config = load_config_from_env().expect("Failed to load config from env");
    assert_eq!(config.storage.bucket, "raw-weather-data");
    let api_key = config.export.api_key.expect("api_key should be set");
    assert_eq!(api_key.expose_secret().as_ref(), "shared-export-key");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "invalid_level"

[storage]
bucket = "raw-weather-data"
"#;

    let temp_file = write_toml(toml_content);
    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_missing_bucket_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "info"
"#;

    let temp_file = write_toml(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("storage.bucket"));
}
