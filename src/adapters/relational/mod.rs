//! Relational store abstraction
//!
//! This module defines the trait the normalizer and the export pipeline
//! use to talk to the weather database, keeping SQL behind one seam.

pub mod postgres;

pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::domain::{ObservationRows, Result, ResultSet, SchemaSnapshot};

/// Store for normalized weather rows
///
/// Implementations own connection pooling, transactions and SQL. Callers
/// never see driver types.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained or the probe
    /// query fails.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the weather schema exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Read the column listing for the given tables, in the given order
    ///
    /// Tables that do not exist in the store are left out of the snapshot
    /// so callers can report them as unknown.
    ///
    /// # Arguments
    ///
    /// * `tables` - Table names to describe, in projection order
    async fn schema_snapshot(&self, tables: &[String]) -> Result<SchemaSnapshot>;

    /// Look up a country surrogate id by ISO-2 code
    ///
    /// The match is case-insensitive.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(id))` if a row exists, `Ok(None)` otherwise.
    async fn find_country_id(&self, iso2_code: &str) -> Result<Option<i32>>;

    /// Commit one observation's rows in a single transaction
    ///
    /// Inserts the country (when carried), the city and the reading with
    /// insert-or-ignore semantics. Either all surviving rows become
    /// visible together or none do.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be completed; duplicate
    /// rows are not errors.
    async fn commit_observation(&self, rows: &ObservationRows) -> Result<()>;

    /// Run a projection over the joined weather tables
    ///
    /// `select_list` is interpolated into the projection query verbatim,
    /// so every identifier in it must have been validated against a
    /// schema snapshot first.
    ///
    /// # Returns
    ///
    /// Returns the header and stringified rows; the header is present
    /// even when no rows match.
    async fn run_projection(&self, select_list: &str) -> Result<ResultSet>;
}
