//! CSV export function
//!
//! HTTP-style entry point: checks the shared `x-api-key` header, parses
//! the request body and runs the export pipeline. Authorization happens
//! before any other work, so an unauthorized caller learns nothing about
//! the schema.

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::SecretString;
use crate::core::{ExportOutcome, ExportPipeline};
use crate::domain::{Result, StratusError};

/// Inbound export request body
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Export handler
pub struct ExportHandler {
    pipeline: ExportPipeline,
    api_key: Option<SecretString>,
}

impl ExportHandler {
    pub fn new(pipeline: ExportPipeline, api_key: Option<SecretString>) -> Self {
        Self { pipeline, api_key }
    }

    /// Runs one export request and shapes the HTTP response
    ///
    /// # Arguments
    ///
    /// * `presented_key` - Value of the `x-api-key` header, if present
    /// * `body` - Raw JSON request body
    ///
    /// # Returns
    ///
    /// Status code plus JSON body: `{"message", "download_link"}` on
    /// success, `{"error"}` on failure.
    pub async fn handle(&self, presented_key: Option<&str>, body: &[u8]) -> (u16, Value) {
        match self.run(presented_key, body).await {
            Ok(outcome) => (
                200,
                json!({
                    "message": format!("Exported {} rows", outcome.row_count),
                    "download_link": outcome.download_link,
                }),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "Export request failed");
                (err.status_code(), json!({ "error": err.to_string() }))
            }
        }
    }

    async fn run(&self, presented_key: Option<&str>, body: &[u8]) -> Result<ExportOutcome> {
        self.authorize(presented_key)?;

        let request: ExportRequest = serde_json::from_slice(body)
            .map_err(|e| StratusError::Validation(format!("Malformed export request: {e}")))?;

        self.pipeline
            .export(&request.columns, request.name.as_deref().unwrap_or(""))
            .await
    }

    /// Exact-match check of the shared key; a missing configured key
    /// rejects every caller rather than opening the endpoint
    fn authorize(&self, presented_key: Option<&str>) -> Result<()> {
        let expected = self.api_key.as_ref().ok_or_else(|| {
            StratusError::Authorization("Export API key is not configured".to_string())
        })?;

        match presented_key {
            Some(key) if expected.expose_secret().as_ref() == key => Ok(()),
            _ => Err(StratusError::Authorization(
                "Invalid or missing API key".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::relational::RelationalStore;
    use crate::adapters::storage::ObjectStore;
    use crate::config::{secret_string, StratusConfig};
    use crate::domain::{ObservationRows, ResultSet, SchemaSnapshot, TableColumns};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct OneRowStore;

    #[async_trait]
    impl RelationalStore for OneRowStore {
        async fn test_connection(&self) -> Result<()> {
            Ok(())
        }

        async fn ensure_schema(&self) -> Result<()> {
            Ok(())
        }

        async fn schema_snapshot(&self, _tables: &[String]) -> Result<SchemaSnapshot> {
            Ok(SchemaSnapshot {
                tables: vec![TableColumns {
                    table: "cities".to_string(),
                    columns: vec!["name".to_string()],
                }],
            })
        }

        async fn find_country_id(&self, _iso2_code: &str) -> Result<Option<i32>> {
            Ok(None)
        }

        async fn commit_observation(&self, _rows: &ObservationRows) -> Result<()> {
            Ok(())
        }

        async fn run_projection(&self, _select_list: &str) -> Result<ResultSet> {
            Ok(ResultSet {
                columns: vec!["cities.name".to_string()],
                rows: vec![vec!["Bucharest".to_string()]],
            })
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        keys: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn put_object(&self, key: &str, _data: &[u8], _content_type: &str) -> Result<()> {
            self.keys.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
            Err(StratusError::NotFound(key.to_string()))
        }

        async fn list_keys(&self, _prefix: &str) -> Result<Vec<String>> {
            Ok(self.keys.lock().unwrap().clone())
        }

        async fn latest_key(&self, _prefix: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn delete_object(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn presign_get(&self, key: &str, _ttl: Duration) -> Result<String> {
            Ok(format!("https://signed.example/{key}"))
        }

        fn bucket(&self) -> &str {
            "test-bucket"
        }
    }

    fn handler(api_key: Option<SecretString>) -> ExportHandler {
        handler_with_store(api_key, Arc::new(MemoryStore::default()))
    }

    fn handler_with_store(
        api_key: Option<SecretString>,
        objects: Arc<MemoryStore>,
    ) -> ExportHandler {
        let config = StratusConfig {
            storage: crate::config::StorageConfig {
                bucket: "test-bucket".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let pipeline = ExportPipeline::new(Arc::new(OneRowStore), objects, &config);
        ExportHandler::new(pipeline, api_key)
    }

    #[tokio::test]
    async fn test_valid_request_returns_download_link() {
        let handler = handler(Some(secret_string("shared-key".to_string())));
        let body = br#"{"columns": ["cities:name"], "name": "report"}"#;

        let (status, response) = handler.handle(Some("shared-key"), body).await;

        assert_eq!(status, 200);
        let link = response["download_link"].as_str().unwrap();
        assert!(link.contains("csv/report_"));
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected_before_any_work() {
        let objects = Arc::new(MemoryStore::default());
        let handler = handler_with_store(
            Some(secret_string("shared-key".to_string())),
            objects.clone(),
        );
        let body = br#"{"columns": ["cities:name"]}"#;

        let (status, response) = handler.handle(Some("other-key"), body).await;

        assert_eq!(status, 403);
        assert!(response["error"].as_str().unwrap().contains("API key"));
        assert!(objects.keys.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let handler = handler(Some(secret_string("shared-key".to_string())));

        let (status, _) = handler.handle(None, b"{}").await;

        assert_eq!(status, 403);
    }

    #[tokio::test]
    async fn test_unconfigured_key_fails_closed() {
        let handler = handler(None);

        let (status, response) = handler.handle(Some("anything"), b"{}").await;

        assert_eq!(status, 403);
        assert!(response["error"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_validation_failure() {
        let handler = handler(Some(secret_string("shared-key".to_string())));

        let (status, response) = handler.handle(Some("shared-key"), b"not json").await;

        assert_eq!(status, 400);
        assert!(response["error"]
            .as_str()
            .unwrap()
            .contains("Malformed export request"));
    }

    #[tokio::test]
    async fn test_unknown_column_is_a_not_found_failure() {
        let handler = handler(Some(secret_string("shared-key".to_string())));
        let body = br#"{"columns": ["cities:bogus"]}"#;

        let (status, response) = handler.handle(Some("shared-key"), body).await;

        assert_eq!(status, 404);
        assert!(response["error"].as_str().unwrap().contains("bogus"));
    }
}
