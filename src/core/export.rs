//! CSV export pipeline
//!
//! Runs one validated projection over the joined weather schema and
//! materializes the full result as a stored artifact behind a signed
//! download link. Row order is whatever the store returns; no ordering
//! is imposed here.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::adapters::relational::RelationalStore;
use crate::adapters::storage::ObjectStore;
use crate::config::StratusConfig;
use crate::core::columns::parse_columns;
use crate::core::keys::export_key;
use crate::domain::{Result, ResultSet, StratusError};

/// Content type stamped on stored export artifacts
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Outcome of one export run
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Storage key the artifact was written under
    pub key: String,
    /// Time-limited signed download URL
    pub download_link: String,
    /// Number of data rows in the artifact, excluding the header
    pub row_count: usize,
}

/// Orchestrates projection, serialization, staging and link generation
pub struct ExportPipeline {
    store: Arc<dyn RelationalStore>,
    objects: Arc<dyn ObjectStore>,
    tables: Vec<String>,
    csv_prefix: String,
    link_ttl: Duration,
}

impl ExportPipeline {
    pub fn new(
        store: Arc<dyn RelationalStore>,
        objects: Arc<dyn ObjectStore>,
        config: &StratusConfig,
    ) -> Self {
        Self {
            store,
            objects,
            tables: config.database.tables.clone(),
            csv_prefix: config.storage.csv_prefix.clone(),
            link_ttl: Duration::from_secs(config.storage.link_ttl_seconds),
        }
    }

    /// Executes one export request
    ///
    /// Validates the requested columns against the live schema, runs the
    /// projection, stores the serialized result under a generated key and
    /// returns a signed link to it.
    ///
    /// # Arguments
    ///
    /// * `requested` - Column references (`table:column` or a lone `*`)
    /// * `name` - Requested artifact base name; empty falls back to the
    ///   default base name
    ///
    /// # Errors
    ///
    /// Returns a validation or not-found error for a bad column request,
    /// a persistence error if the query or artifact write fails, and a
    /// link-generation error if signing fails. In the last case the
    /// artifact already exists in storage.
    pub async fn export(&self, requested: &[String], name: &str) -> Result<ExportOutcome> {
        let snapshot = self.store.schema_snapshot(&self.tables).await?;
        let select_list = parse_columns(requested, &snapshot)?;

        tracing::info!(select_list = %select_list, "Running export projection");
        let result = self.store.run_projection(&select_list).await?;
        let artifact = serialize_result_set(&result)?;

        let existing = self.objects.list_keys(&self.csv_prefix).await?;
        let key = export_key(&existing, name, Utc::now().date_naive(), &self.csv_prefix);

        self.objects
            .put_object(&key, &artifact, CSV_CONTENT_TYPE)
            .await?;
        tracing::info!(
            key = %key,
            rows = result.rows.len(),
            bytes = artifact.len(),
            "Stored export artifact"
        );

        let download_link = self.objects.presign_get(&key, self.link_ttl).await?;

        Ok(ExportOutcome {
            key,
            download_link,
            row_count: result.rows.len(),
        })
    }
}

/// Serializes a result set as CSV bytes, header first
///
/// Fields containing separators, quotes or newlines are quoted per
/// standard CSV escaping, so any cell value survives a round-trip
/// through a conforming reader.
pub fn serialize_result_set(result: &ResultSet) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&result.columns)
        .map_err(|e| StratusError::Serialization(format!("Failed to write CSV header: {e}")))?;

    for row in &result.rows {
        writer
            .write_record(row)
            .map_err(|e| StratusError::Serialization(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| StratusError::Serialization(format!("Failed to flush CSV artifact: {e}")))
}
