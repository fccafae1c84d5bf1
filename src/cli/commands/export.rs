//! Export command implementation
//!
//! This module implements the `export` command for producing a CSV
//! artifact and presigned download link from the local machine. The
//! shared-key check guards the public endpoint only; locally the
//! operator already holds AWS credentials, so the pipeline is invoked
//! directly.

use std::sync::Arc;

use clap::Args;

use super::resolve_config;
use crate::adapters::relational::PostgresStore;
use crate::adapters::secrets::{SecretProvider, SecretsManagerProvider};
use crate::adapters::storage::S3ObjectStore;
use crate::core::ExportPipeline;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Columns to export, comma-separated `table:column` tokens, or `*`
    /// for every column
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Base name for the artifact (defaults to a name derived from the data)
    #[arg(long)]
    pub name: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(columns = ?self.columns, "Exporting weather readings");

        println!("📤 Exporting weather readings");
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

        let objects = Arc::new(S3ObjectStore::new(
            &sdk_config,
            config.storage.bucket.clone(),
        ));
        let pipeline = ExportPipeline::new(store, objects, &config);

        let name = self.name.as_deref().unwrap_or("");
        match pipeline.export(&self.columns, name).await {
            Ok(outcome) => {
                println!("✅ Exported {} rows", outcome.row_count);
                println!("   Object: {}", outcome.key);
                println!("   Download: {}", outcome.download_link);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Export failed");
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
    fn test_export_args_creation() {
        let args = ExportArgs {
            columns: vec![
                "cities:name".to_string(),
                "weather_readings:temperature".to_string(),
            ],
            name: Some("capitals".to_string()),
        };
        assert_eq!(args.columns.len(), 2);
        assert_eq!(args.name.as_deref(), Some("capitals"));
    }
}
