//! Weather provider abstraction
//!
//! This module defines the trait for fetching observations from the
//! weather provider. Payloads are returned as raw JSON values so the
//! staging step can persist exactly what the provider sent.

pub mod openweather;

pub use openweather::OpenWeatherClient;

use async_trait::async_trait;

use crate::domain::Result;

/// Client for the weather provider
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Fetch the current observation for one city
    ///
    /// # Arguments
    ///
    /// * `city_id` - Provider-assigned city identifier
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the provider does not know the
    /// city, and an upstream error for transport failures or other
    /// non-success statuses.
    async fn current_observation(&self, city_id: i64) -> Result<serde_json::Value>;

    /// Fetch one historical observation for one city
    ///
    /// The provider returns a window of hourly entries; the first entry
    /// of the window starting at `timestamp` is returned.
    ///
    /// # Arguments
    ///
    /// * `city_id` - Provider-assigned city identifier
    /// * `timestamp` - Unix timestamp opening the one-entry window
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the window comes back empty or the
    /// request fails.
    async fn historical_observation(
        &self,
        city_id: i64,
        timestamp: i64,
    ) -> Result<serde_json::Value>;
}
