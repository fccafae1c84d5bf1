// Stratus - Serverless Weather Data Pipeline
// Copyright (c) 2025 Stratus Contributors
// Licensed under the MIT License

//! # Stratus - Serverless Weather Data Pipeline
//!
//! Stratus is a serverless weather data pipeline built in Rust. It fetches
//! city observations from a weather API, stages them as JSON objects in S3,
//! normalizes them into a relational store and serves column-selected CSV
//! exports through presigned download links.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** current and historical city observations from the weather API
//! - **Staging** raw observation JSON in object storage, one object per city per day
//! - **Normalizing** staged objects into countries, cities and weather readings
//! - **Exporting** column selections as CSV artifacts with presigned download links
//! - **Fanning out** one fetch invocation per tracked city on a schedule
//!
//! ## Architecture
//!
//! Stratus follows a layered architecture:
//!
//! - [`cli`] - Command-line interface for driving the pipeline locally
//! - [`functions`] - Event handlers behind the Lambda entry points
//! - [`core`] - Business logic (normalization, column selection, CSV export,
//!   object key layout)
//! - [`adapters`] - External integrations (S3, Postgres, the weather and
//!   country APIs, the DynamoDB city registry, Lambda dispatch, Secrets Manager)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use stratus::adapters::secrets::{SecretProvider, SecretsManagerProvider};
//! use stratus::adapters::storage::S3ObjectStore;
//! use stratus::adapters::weather::OpenWeatherClient;
//! use stratus::config::load_config;
//! use stratus::functions::FetchHandler;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("stratus.toml")?;
//!
//!     // Resolve clients once; the handler is reused across invocations
//!     let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!     let secrets = SecretsManagerProvider::new(&sdk_config);
//!     let api_key = secrets.weather_api_key(&config.weather.secret_id).await?;
//!
//!     let weather = Arc::new(OpenWeatherClient::new(&config.weather, api_key)?);
//!     let objects = Arc::new(S3ObjectStore::new(
//!         &sdk_config,
//!         config.storage.bucket.clone(),
//!     ));
//!     let handler = FetchHandler::new(weather, objects, &config.storage.raw_prefix);
//!
//!     // Stage Amsterdam's current observation
//!     let response = handler.handle(2_759_794).await?;
//!     println!("{}", response.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Staged Object Layout
//!
//! Every raw observation is staged under a deterministic key, one object per
//! city per day, so re-running a fetch overwrites rather than duplicates:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stratus::core::keys::staged_object_key;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let key = staged_object_key("raw", 2_759_794, "Amsterdam", date);
//! assert_eq!(key, "raw/2759794-amsterdam_2025-01-01.json");
//! ```
//!
//! ### Column Selection
//!
//! Export requests name columns as `table:column` tokens. Each token is
//! validated against a schema snapshot before it reaches SQL:
//!
//! ```rust
//! use stratus::core::columns::parse_columns;
//! use stratus::domain::{SchemaSnapshot, TableColumns};
//!
//! let schema = SchemaSnapshot {
//!     tables: vec![TableColumns {
//!         table: "cities".to_string(),
//!         columns: vec!["name".to_string()],
//!     }],
//! };
//!
//! let select_list = parse_columns(&["cities:name".to_string()], &schema).unwrap();
//! assert_eq!(select_list, "cities.name AS \"cities.name\"");
//! ```
//!
//! ## Error Handling
//!
//! Stratus uses the [`domain::StratusError`] type for all errors. Every
//! variant maps to the HTTP-style status code the function responses carry:
//!
//! ```rust
//! use stratus::domain::{Result, StratusError};
//!
//! fn guard(requested: &[String]) -> Result<()> {
//!     if requested.is_empty() {
//!         return Err(StratusError::Validation("No columns specified".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! let err = guard(&[]).unwrap_err();
//! assert_eq!(err.status_code(), 400);
//! ```
//!
//! ## Logging
//!
//! Stratus uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(city_id = 2_759_794, "Staging observation");
//! warn!(city_id = 2_759_794, "City not found");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod functions;
pub mod logging;
