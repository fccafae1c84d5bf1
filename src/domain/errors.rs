//! Domain error types
//!
//! This module defines the error hierarchy for Stratus. All errors are
//! domain-specific and don't expose third-party SDK or HTTP client types.
//! Every error maps to an HTTP-style status code via [`StratusError::status_code`]
//! so function handlers can build their responses uniformly.

use thiserror::Error;

/// Main Stratus error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum StratusError {
    /// Configuration-related errors (missing values, unreadable files, secret resolution)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Inbound request rejected: missing or mismatched shared API key
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Malformed request body, empty column list, unparseable selection token
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist (city, country code, table, column, staged object)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote dependency unreachable or returned a non-success status
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Relational store errors other than expected duplicates
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Object storage errors (put/get/list/delete)
    #[error("Persistence error: {0}")]
    Storage(#[from] StorageError),

    /// Presigned download link could not be generated
    ///
    /// Distinct from storage errors: the artifact may already exist when
    /// link generation fails.
    #[error("Link generation error: {0}")]
    LinkGeneration(String),

    /// Fan-out dispatch to a downstream function failed
    #[error("Invocation error: {0}")]
    Invocation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl StratusError {
    /// HTTP-style status code for this error
    ///
    /// Authorization failures map to 403, validation failures to 400,
    /// missing entities to 404 and everything else to 500. A missing stored
    /// object counts as a missing entity.
    pub fn status_code(&self) -> u16 {
        match self {
            StratusError::Authorization(_) => 403,
            StratusError::Validation(_) => 400,
            StratusError::NotFound(_) => 404,
            StratusError::Storage(StorageError::NotFound(_)) => 404,
            _ => 500,
        }
    }
}

/// Upstream dependency errors
///
/// Errors that occur when calling the weather API, the country lookup
/// API or the city registry. These errors don't expose the underlying
/// client types.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Failed to reach the remote API
    #[error("Failed to connect to {service}: {message}")]
    ConnectionFailed { service: String, message: String },

    /// Request timed out
    #[error("Request to {service} timed out: {message}")]
    Timeout { service: String, message: String },

    /// Remote API returned a non-success status
    #[error("{service} returned status {status}: {message}")]
    ServerError {
        service: String,
        status: u16,
        message: String,
    },

    /// Response body could not be interpreted
    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: String, message: String },
}

impl UpstreamError {
    /// Classifies a transport-level HTTP client failure
    ///
    /// The request URL is stripped from the message; weather requests
    /// carry the API key as a query parameter.
    pub fn from_reqwest(service: &str, err: reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let message = err.without_url().to_string();

        if timed_out {
            UpstreamError::Timeout {
                service: service.to_string(),
                message,
            }
        } else {
            UpstreamError::ConnectionFailed {
                service: service.to_string(),
                message,
            }
        }
    }
}

/// Relational store errors
///
/// Errors that occur when talking to the weather database. Expected
/// duplicate-key violations are handled inside the adapter (insert-or-ignore)
/// and never surface here.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to connect or acquire a pooled connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A query failed for a reason other than a uniqueness violation
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// An insert failed for a reason other than a uniqueness violation
    #[error("Failed to insert into {table}: {message}")]
    InsertFailed { table: String, message: String },

    /// Transaction could not be started or committed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Schema snapshot could not be read
    #[error("Failed to read schema: {0}")]
    SchemaUnavailable(String),
}

/// Object storage errors
///
/// Errors that occur when staging, listing or deleting blobs.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to write an object
    #[error("Failed to store object {key}: {message}")]
    PutFailed { key: String, message: String },

    /// Failed to read an object
    #[error("Failed to read object {key}: {message}")]
    GetFailed { key: String, message: String },

    /// Failed to list objects under a prefix
    #[error("Failed to list objects under {prefix}: {message}")]
    ListFailed { prefix: String, message: String },

    /// Failed to delete an object
    #[error("Failed to delete object {key}: {message}")]
    DeleteFailed { key: String, message: String },

    /// The requested object does not exist
    #[error("Object not found: {0}")]
    NotFound(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for StratusError {
    fn from(err: std::io::Error) -> Self {
        StratusError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StratusError {
    fn from(err: serde_json::Error) -> Self {
        StratusError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StratusError {
    fn from(err: toml::de::Error) -> Self {
        StratusError::Configuration(format!("TOML parse error: {err}"))
    }
}
