//! Historical backfill function
//!
//! Walks day by day from a fixed epoch to now and stages one historical
//! observation per day for a city. The provider's history entries carry
//! only the fields that changed shape over time, so each day's entry is
//! overlaid onto a current-observation template; fields missing from an
//! entry keep their most recent value.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::adapters::storage::ObjectStore;
use crate::adapters::weather::WeatherApi;
use crate::config::StratusConfig;
use crate::domain::{FunctionResponse, Result, StratusError, UpstreamError};
use crate::functions::staging::{observation_name, stage_observation};
use crate::log_loop_summary;

/// Day-walk backfill handler
pub struct BackfillHandler {
    weather: Arc<dyn WeatherApi>,
    objects: Arc<dyn ObjectStore>,
    raw_prefix: String,
    epoch_start: i64,
    step_seconds: i64,
}

impl BackfillHandler {
    pub fn new(
        weather: Arc<dyn WeatherApi>,
        objects: Arc<dyn ObjectStore>,
        config: &StratusConfig,
    ) -> Self {
        Self {
            weather,
            objects,
            raw_prefix: config.storage.raw_prefix.clone(),
            epoch_start: config.backfill.epoch_start,
            step_seconds: config.backfill.step_seconds,
        }
    }

    /// Backfills one city from the configured epoch to now
    ///
    /// A failed day is logged and tallied; the walk continues with the
    /// next day and the summary reports the failure count.
    ///
    /// # Errors
    ///
    /// Fails outright only when the template observation cannot be
    /// fetched; without it there is nothing to overlay onto.
    pub async fn handle(&self, city_id: i64) -> Result<FunctionResponse> {
        let mut template = self.weather.current_observation(city_id).await?;
        let name = observation_name(&template, city_id)?.to_string();

        let now = Utc::now().timestamp();
        let mut attempted = 0usize;
        let mut failed = 0usize;
        let mut timestamp = self.epoch_start;

        while timestamp < now {
            attempted += 1;
            if let Err(err) = self
                .backfill_day(city_id, &name, &mut template, timestamp)
                .await
            {
                failed += 1;
                tracing::warn!(city_id, timestamp, error = %err, "Backfill day failed");
            }
            timestamp += self.step_seconds;
        }

        log_loop_summary!("backfill", attempted, failed);
        Ok(FunctionResponse::ok(&format!(
            "Backfill ended: {} days staged, {} failed",
            attempted - failed,
            failed
        )))
    }

    async fn backfill_day(
        &self,
        city_id: i64,
        name: &str,
        template: &mut Value,
        timestamp: i64,
    ) -> Result<()> {
        let entry = self.weather.historical_observation(city_id, timestamp).await?;
        overlay(template, entry)?;

        let date = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| {
                StratusError::Validation(format!("Backfill timestamp {timestamp} is out of range"))
            })?
            .date_naive();

        stage_observation(
            self.objects.as_ref(),
            &self.raw_prefix,
            city_id,
            name,
            date,
            template,
        )
        .await?;

        Ok(())
    }
}

/// Overlays the entry's top-level fields onto the template
fn overlay(template: &mut Value, entry: Value) -> Result<()> {
    let (Some(target), Value::Object(fields)) = (template.as_object_mut(), entry) else {
        return Err(UpstreamError::InvalidResponse {
            service: "weather provider".to_string(),
            message: "History entry is not a JSON object".to_string(),
        }
        .into());
    };

    for (field, value) in fields {
        target.insert(field, value);
    }

    Ok(())
}
