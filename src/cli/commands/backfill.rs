//! Backfill command implementation
//!
//! This module implements the `backfill` command for staging one city's
//! historical weather, one object per day, from the local machine.

use std::sync::Arc;

use clap::Args;

use super::{resolve_config, response_message};
use crate::adapters::secrets::{SecretProvider, SecretsManagerProvider};
use crate::adapters::storage::S3ObjectStore;
use crate::adapters::weather::OpenWeatherClient;
use crate::functions::BackfillHandler;

/// Arguments for the backfill command
#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Weather provider city id to backfill
    #[arg(long)]
    pub city_id: i64,
}

impl BackfillArgs {
    /// Execute the backfill command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(city_id = self.city_id, "Backfilling historical weather");

        println!("⏪ Backfilling historical weather for city {}", self.city_id);
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

        let api_key = match secrets.weather_api_key(&config.weather.secret_id).await {
            Ok(k) => k,
            Err(e) => {
                println!("❌ Failed to resolve the weather API key");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let weather = match OpenWeatherClient::new(&config.weather, api_key) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                println!("❌ Failed to build the weather client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };
        let objects = Arc::new(S3ObjectStore::new(
            &sdk_config,
            config.storage.bucket.clone(),
        ));
        let handler = BackfillHandler::new(weather, objects, &config);

        match handler.handle(self.city_id).await {
            Ok(response) => {
                println!("✅ {}", response_message(&response));
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Backfill failed");
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
    fn test_backfill_args_creation() {
        let args = BackfillArgs { city_id: 3_143_244 };
        assert_eq!(args.city_id, 3_143_244);
    }
}
