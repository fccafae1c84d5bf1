//! Configuration schema types
//!
//! This module defines the configuration structure for Stratus. Every
//! section has working defaults except the storage bucket, which must be
//! supplied explicitly (via TOML or `STRATUS_STORAGE_BUCKET`).

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main Stratus configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// On Lambda there is no file; the same structure is built from defaults
/// plus `STRATUS_*` environment overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StratusConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// AWS client settings
    #[serde(default)]
    pub aws: AwsConfig,

    /// Object storage layout
    #[serde(default)]
    pub storage: StorageConfig,

    /// Relational store settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherApiConfig,

    /// Country lookup API settings
    #[serde(default)]
    pub country: CountryApiConfig,

    /// Tracked-city registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Fan-out invoker settings
    #[serde(default)]
    pub invoker: InvokerConfig,

    /// Historical backfill settings
    #[serde(default)]
    pub backfill: BackfillConfig,

    /// Export function settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl StratusConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.database.validate()?;
        self.weather.validate()?;
        self.country.validate()?;
        self.registry.validate()?;
        self.invoker.validate()?;
        self.backfill.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// AWS client configuration
///
/// Region is usually inherited from the runtime environment; setting it
/// here overrides the provider chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Explicit region override
    #[serde(default)]
    pub region: Option<String>,
}

/// Object storage layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding both staged raw objects and export artifacts
    #[serde(default)]
    pub bucket: String,

    /// Prefix for staged raw observations
    #[serde(default = "default_raw_prefix")]
    pub raw_prefix: String,

    /// Prefix for export artifacts
    #[serde(default = "default_csv_prefix")]
    pub csv_prefix: String,

    /// Lifetime of presigned download links in seconds
    #[serde(default = "default_link_ttl_seconds")]
    pub link_ttl_seconds: u64,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bucket.is_empty() {
            return Err("storage.bucket cannot be empty".to_string());
        }

        if self.raw_prefix.is_empty() || self.csv_prefix.is_empty() {
            return Err("storage prefixes cannot be empty".to_string());
        }

        if self.raw_prefix.ends_with('/') || self.csv_prefix.ends_with('/') {
            return Err("storage prefixes must not end with '/'".to_string());
        }

        // S3 caps presigned URL expiry at 7 days
        if self.link_ttl_seconds == 0 || self.link_ttl_seconds > 604_800 {
            return Err(format!(
                "storage.link_ttl_seconds must be between 1 and 604800, got {}",
                self.link_ttl_seconds
            ));
        }

        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            raw_prefix: default_raw_prefix(),
            csv_prefix: default_csv_prefix(),
            link_ttl_seconds: default_link_ttl_seconds(),
        }
    }
}

/// Relational store configuration
///
/// Credentials are not configured here; they are resolved at startup from
/// the secret named by `secret_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Secret holding user, password, host and database name
    #[serde(default = "default_database_secret_id")]
    pub secret_id: String,

    /// Server port; the host comes from the credentials secret
    #[serde(default = "default_database_port")]
    pub port: u16,

    /// Connect-phase timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Tables participating in the export join, in projection order
    #[serde(default = "default_tables")]
    pub tables: Vec<String>,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.secret_id.is_empty() {
            return Err("database.secret_id cannot be empty".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("database.connect_timeout_seconds must be > 0".to_string());
        }

        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(format!(
                "database.max_connections must be between 1 and 100, got {}",
                self.max_connections
            ));
        }

        if self.tables.is_empty() {
            return Err("database.tables cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            secret_id: default_database_secret_id(),
            port: default_database_port(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            max_connections: default_max_connections(),
            tables: default_tables(),
        }
    }
}

/// Weather API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// Base URL for current-weather requests
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Base URL for historical requests
    #[serde(default = "default_weather_history_base_url")]
    pub history_base_url: String,

    /// Secret holding the provider API key
    #[serde(default = "default_weather_secret_id")]
    pub secret_id: String,

    /// Measurement units requested from the provider
    #[serde(default = "default_units")]
    pub units: String,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl WeatherApiConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("weather.base_url", &self.base_url)?;
        validate_base_url("weather.history_base_url", &self.history_base_url)?;

        if self.secret_id.is_empty() {
            return Err("weather.secret_id cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("weather.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            history_base_url: default_weather_history_base_url(),
            secret_id: default_weather_secret_id(),
            units: default_units(),
            timeout_seconds: default_http_timeout_seconds(),
        }
    }
}

/// Country lookup API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryApiConfig {
    /// Base URL for ISO-code lookups
    #[serde(default = "default_country_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl CountryApiConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("country.base_url", &self.base_url)?;

        if self.timeout_seconds == 0 {
            return Err("country.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for CountryApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_country_base_url(),
            timeout_seconds: default_http_timeout_seconds(),
        }
    }
}

/// Tracked-city registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Key-value table holding tracked cities
    #[serde(default = "default_registry_table")]
    pub table: String,
}

impl RegistryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.table.is_empty() {
            return Err("registry.table cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            table: default_registry_table(),
        }
    }
}

/// Fan-out invoker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Name of the downstream fetch function
    #[serde(default = "default_fetch_function")]
    pub fetch_function: String,
}

impl InvokerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fetch_function.is_empty() {
            return Err("invoker.fetch_function cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            fetch_function: default_fetch_function(),
        }
    }
}

/// Historical backfill configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillConfig {
    /// First instant of the backfill window (Unix seconds, UTC)
    #[serde(default = "default_backfill_epoch")]
    pub epoch_start: i64,

    /// Walk step in seconds (one day in the reference deployment)
    #[serde(default = "default_backfill_step")]
    pub step_seconds: i64,
}

impl BackfillConfig {
    fn validate(&self) -> Result<(), String> {
        if self.epoch_start < 0 {
            return Err("backfill.epoch_start must be >= 0".to_string());
        }

        if self.step_seconds <= 0 {
            return Err("backfill.step_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            epoch_start: default_backfill_epoch(),
            step_seconds: default_backfill_step(),
        }
    }
}

/// Export function configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Shared API key expected in the `x-api-key` request header
    ///
    /// Supplied via process environment (`STRATUS_EXPORT_API_KEY`), not the
    /// secret store. Stored securely in memory and zeroized on drop.
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_raw_prefix() -> String {
    "raw".to_string()
}

fn default_csv_prefix() -> String {
    "csv".to_string()
}

fn default_link_ttl_seconds() -> u64 {
    60
}

fn default_database_secret_id() -> String {
    "RdsWeatherDataCredentials".to_string()
}

fn default_database_port() -> u16 {
    5432
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_max_connections() -> usize {
    4
}

fn default_tables() -> Vec<String> {
    vec![
        "countries".to_string(),
        "cities".to_string(),
        "weather_readings".to_string(),
    ]
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_history_base_url() -> String {
    "https://history.openweathermap.org/data/2.5".to_string()
}

fn default_weather_secret_id() -> String {
    "OpenWeatherApi".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_http_timeout_seconds() -> u64 {
    10
}

fn default_country_base_url() -> String {
    "https://restcountries.com/v3.1".to_string()
}

fn default_registry_table() -> String {
    "OpenWeather-cities".to_string()
}

fn default_fetch_function() -> String {
    "stratus-fetch-weather".to_string()
}

fn default_backfill_epoch() -> i64 {
    1_735_718_400
}

fn default_backfill_step() -> i64 {
    86_400
}

fn validate_base_url(field: &str, url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("{field} must start with http:// or https://"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> StratusConfig {
        let mut config = StratusConfig::default();
        config.storage.bucket = "raw-weather-data".to_string();
        config
    }

    #[test]
    fn test_default_config_requires_bucket() {
        let config = StratusConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("storage.bucket"));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_prefix_validation() {
        let mut config = valid_config();
        config.storage.raw_prefix = "raw/".to_string();
        assert!(config.validate().is_err());

        config.storage.raw_prefix = "staged".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_link_ttl_bounds() {
        let mut config = valid_config();
        config.storage.link_ttl_seconds = 0;
        assert!(config.validate().is_err());

        config.storage.link_ttl_seconds = 604_801;
        assert!(config.validate().is_err());

        config.storage.link_ttl_seconds = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_validation() {
        let mut config = valid_config();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        config.database.max_connections = 101;
        assert!(config.validate().is_err());

        config.database.max_connections = 4;
        config.database.tables.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_weather_url_validation() {
        let mut config = valid_config();
        config.weather.base_url = "api.openweathermap.org".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("weather.base_url"));
    }

    #[test]
    fn test_backfill_validation() {
        let mut config = valid_config();
        config.backfill.step_seconds = 0;
        assert!(config.validate().is_err());

        config.backfill.step_seconds = 3600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = StratusConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.storage.raw_prefix, "raw");
        assert_eq!(config.storage.csv_prefix, "csv");
        assert_eq!(config.storage.link_ttl_seconds, 60);
        assert_eq!(config.database.secret_id, "RdsWeatherDataCredentials");
        assert_eq!(config.database.connect_timeout_seconds, 10);
        assert_eq!(
            config.database.tables,
            vec!["countries", "cities", "weather_readings"]
        );
        assert_eq!(config.weather.secret_id, "OpenWeatherApi");
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.registry.table, "OpenWeather-cities");
        assert_eq!(config.backfill.epoch_start, 1_735_718_400);
        assert_eq!(config.backfill.step_seconds, 86_400);
        assert!(config.export.api_key.is_none());
    }
}
