//! Configuration management for Stratus.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation, plus an environment-only path for the Lambda binaries.
//!
//! # Overview
//!
//! Stratus configuration supports:
//! - Working defaults for every setting except the storage bucket
//! - Environment variable overrides (`STRATUS_<SECTION>_<KEY>`)
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stratus::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("stratus.toml")?;
//!
//! // Access configuration sections
//! println!("Bucket: {}", config.storage.bucket);
//! println!("Weather API: {}", config.weather.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! bucket = "raw-weather-data"
//! link_ttl_seconds = 60
//!
//! [database]
//! secret_id = "RdsWeatherDataCredentials"
//!
//! [weather]
//! secret_id = "OpenWeatherApi"
//! units = "metric"
//!
//! [registry]
//! table = "OpenWeather-cities"
//!
//! [invoker]
//! fetch_function = "stratus-fetch-weather"
//! ```
//!
//! # Environment Variables
//!
//! Every value can be overridden from the environment:
//!
//! ```bash
//! export STRATUS_STORAGE_BUCKET="raw-weather-data"
//! export STRATUS_EXPORT_API_KEY="shared-export-key"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_env};
pub use schema::{
    ApplicationConfig, AwsConfig, BackfillConfig, CountryApiConfig, DatabaseConfig, ExportConfig,
    InvokerConfig, RegistryConfig, StorageConfig, StratusConfig, WeatherApiConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
