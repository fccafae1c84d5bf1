//! Staged-object load function
//!
//! Consumes one staged raw observation: reads it, normalizes it into the
//! relational schema and deletes it only after the commit succeeds. On
//! any failure before the commit the object stays in place for the next
//! attempt; a failed delete afterwards is logged and tolerated, since
//! the rows are already committed and insert-or-ignore makes a replay
//! harmless.

use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::storage::ObjectStore;
use crate::core::Normalizer;
use crate::domain::{FunctionResponse, Result, StratusError};
use crate::log_error_with_context;

/// Storage event notification carrying created object keys
///
/// Direct invocations send an empty body; the handler then falls back to
/// the most recently staged object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    pub key: String,
}

impl StorageEvent {
    /// Key of the first record, if the event carries any
    pub fn first_key(&self) -> Option<&str> {
        self.records.first().map(|r| r.s3.object.key.as_str())
    }
}

/// Load-and-normalize handler
pub struct LoadHandler {
    objects: Arc<dyn ObjectStore>,
    normalizer: Normalizer,
    raw_prefix: String,
}

impl LoadHandler {
    pub fn new(objects: Arc<dyn ObjectStore>, normalizer: Normalizer, raw_prefix: &str) -> Self {
        Self {
            objects,
            normalizer,
            raw_prefix: raw_prefix.to_string(),
        }
    }

    /// Processes one staged object
    ///
    /// With no event key, the newest object under the raw prefix is
    /// processed instead; an empty staging area answers not-found.
    ///
    /// # Errors
    ///
    /// Propagates read and normalization failures. The staged object is
    /// deleted only after its rows are committed; a delete failure is
    /// logged, not raised.
    pub async fn handle(&self, event_key: Option<&str>) -> Result<FunctionResponse> {
        let key = match event_key {
            Some(key) => key.to_string(),
            None => self
                .objects
                .latest_key(&self.raw_prefix)
                .await?
                .ok_or_else(|| StratusError::NotFound("No files to process".to_string()))?,
        };

        let payload = self.objects.get_object(&key).await?;
        let rows = self.normalizer.normalize(&payload).await?;
        if let Err(err) = self.objects.delete_object(&key).await {
            log_error_with_context!(&err, "Deleting consumed staged object");
        }

        tracing::info!(key = %key, city_id = rows.city.id, "Consumed staged object");
        Ok(FunctionResponse::ok(&format!("Object({key}) was handled!")))
    }
}
