//! Load command implementation
//!
//! This module implements the `load` command for normalizing one staged
//! object into the relational store from the local machine.

use std::sync::Arc;

use clap::Args;

use super::{resolve_config, response_message};
use crate::adapters::country::RestCountriesClient;
use crate::adapters::relational::PostgresStore;
use crate::adapters::secrets::{SecretProvider, SecretsManagerProvider};
use crate::adapters::storage::S3ObjectStore;
use crate::core::Normalizer;
use crate::functions::LoadHandler;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Staged object key to process (defaults to the newest staged object)
    #[arg(long)]
    pub key: Option<String>,
}

impl LoadArgs {
    /// Execute the load command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Normalizing staged weather");

        println!("📥 Normalizing staged weather");
        println!();

        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let secrets = SecretsManagerProvider::new(&sdk_config);

        let credentials = match secrets
            .database_credentials(&config.database.secret_id)
            .await
        {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to resolve database credentials");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let store = match PostgresStore::new(&credentials, &config.database) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                println!("❌ Failed to build the connection pool");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        let countries = match RestCountriesClient::new(&config.country) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                println!("❌ Failed to build the country client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let objects = Arc::new(S3ObjectStore::new(
            &sdk_config,
            config.storage.bucket.clone(),
        ));
        let handler = LoadHandler::new(
            objects,
            Normalizer::new(store, countries),
            &config.storage.raw_prefix,
        );

        match handler.handle(self.key.as_deref()).await {
            Ok(response) => {
                println!("✅ {}", response_message(&response));
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Load failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_args_defaults() {
        let args = LoadArgs { key: None };
        assert!(args.key.is_none());
    }

    #[test]
    fn test_load_args_with_key() {
        let args = LoadArgs {
            key: Some("raw/2759794-amsterdam_2025-01-01.json".to_string()),
        };
        assert!(args.key.is_some());
    }
}
