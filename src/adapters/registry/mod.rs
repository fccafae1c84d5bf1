//! City registry abstraction
//!
//! The registry is the operator-maintained list of cities the pipeline
//! tracks. Only active entries participate in fan-out.

pub mod dynamodb;

pub use dynamodb::DynamoCityRegistry;

use async_trait::async_trait;

use crate::domain::Result;

/// Registry of tracked cities
#[async_trait]
pub trait CityRegistry: Send + Sync {
    /// List the provider ids of all active cities
    ///
    /// Entries with a malformed id are skipped with a warning rather
    /// than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the registry cannot be read.
    async fn active_city_ids(&self) -> Result<Vec<i64>>;
}
