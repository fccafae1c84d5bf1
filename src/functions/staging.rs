//! Raw-object staging shared by the fetch and backfill functions
//!
//! Staged bodies are pretty-printed JSON so the raw bucket stays
//! human-inspectable; the loader does not depend on the formatting.

use chrono::NaiveDate;
use serde_json::Value;

use crate::adapters::storage::ObjectStore;
use crate::core::keys::staged_object_key;
use crate::domain::{Result, UpstreamError};
use crate::log_staged_object;

/// City name carried in an observation payload
///
/// # Errors
///
/// Returns an invalid-response error when the payload has no usable
/// `name` field; the staged key scheme needs it.
pub(crate) fn observation_name(payload: &Value, city_id: i64) -> Result<&str> {
    payload.get("name").and_then(Value::as_str).ok_or_else(|| {
        UpstreamError::InvalidResponse {
            service: "weather provider".to_string(),
            message: format!("Observation for city {city_id} carries no name"),
        }
        .into()
    })
}

/// Stages one raw observation and returns the key it was written under
pub(crate) async fn stage_observation(
    objects: &dyn ObjectStore,
    prefix: &str,
    city_id: i64,
    name: &str,
    date: NaiveDate,
    payload: &Value,
) -> Result<String> {
    let key = staged_object_key(prefix, city_id, name, date);
    let body = serde_json::to_vec_pretty(payload)?;
    objects.put_object(&key, &body, "application/json").await?;
    log_staged_object!(key, objects.bucket());
    Ok(key)
}
