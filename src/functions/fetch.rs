//! Current-weather fetch function
//!
//! Fetches the current observation for one city and stages it as a raw
//! JSON object. Normalization happens later, in the load function, so a
//! staging failure never loses data that was already in the store.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::adapters::storage::ObjectStore;
use crate::adapters::weather::WeatherApi;
use crate::domain::{FunctionResponse, Result};
use crate::functions::staging::{observation_name, stage_observation};

/// Trigger payload for a fetch invocation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FetchRequest {
    pub city_id: i64,
}

/// Fetch-and-stage handler
pub struct FetchHandler {
    weather: Arc<dyn WeatherApi>,
    objects: Arc<dyn ObjectStore>,
    raw_prefix: String,
}

impl FetchHandler {
    pub fn new(
        weather: Arc<dyn WeatherApi>,
        objects: Arc<dyn ObjectStore>,
        raw_prefix: &str,
    ) -> Self {
        Self {
            weather,
            objects,
            raw_prefix: raw_prefix.to_string(),
        }
    }

    /// Fetches the current observation for a city and stages it
    ///
    /// The staged key embeds today's UTC date, so one fetch per city per
    /// day overwrites rather than accumulates.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for a city the provider does not know,
    /// an upstream error for other provider failures and a persistence
    /// error if staging fails.
    pub async fn handle(&self, city_id: i64) -> Result<FunctionResponse> {
        let observation = self.weather.current_observation(city_id).await?;
        let name = observation_name(&observation, city_id)?.to_string();

        stage_observation(
            self.objects.as_ref(),
            &self.raw_prefix,
            city_id,
            &name,
            Utc::now().date_naive(),
            &observation,
        )
        .await?;

        Ok(FunctionResponse::ok("City Found"))
    }
}
