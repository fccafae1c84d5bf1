//! Secret resolution
//!
//! This module defines the trait for resolving the named secrets the
//! pipeline depends on: database credentials and the weather API key.
//! Secrets are fetched once at startup and held in memory for the
//! lifetime of the process.

pub mod manager;

pub use manager::SecretsManagerProvider;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SecretString;
use crate::domain::Result;

/// Database credentials as stored in the secret body
///
/// Field names match the stored JSON document verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct DbCredentials {
    #[serde(rename = "USER")]
    pub user: String,

    #[serde(rename = "PASSWORD")]
    pub password: SecretString,

    #[serde(rename = "HOST")]
    pub host: String,

    #[serde(rename = "DBNAME")]
    pub dbname: String,
}

/// Provider of named secrets
///
/// Implementations resolve a secret id to its decoded payload. All
/// failures surface as configuration errors since an unresolvable
/// secret means the function cannot serve at all.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Resolve database credentials
    ///
    /// # Arguments
    ///
    /// * `secret_id` - Name of the stored credentials document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret cannot be fetched or
    /// its body does not parse as a credentials document.
    async fn database_credentials(&self, secret_id: &str) -> Result<DbCredentials>;

    /// Resolve the weather provider API key
    ///
    /// # Arguments
    ///
    /// * `secret_id` - Name of the stored key document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret cannot be fetched or
    /// its body does not carry the key field.
    async fn weather_api_key(&self, secret_id: &str) -> Result<SecretString>;
}
