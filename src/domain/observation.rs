//! Weather observation payload
//!
//! Typed view of the third-party weather API response. Only the sections
//! the normalizer consumes are modeled; unknown fields are ignored so the
//! provider can extend its payload without breaking deserialization.

use serde::{Deserialize, Serialize};

/// One weather observation as returned by the weather API
///
/// The same shape is staged as a raw JSON object and later consumed by the
/// load function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Provider-assigned city identifier
    pub id: i64,

    /// City display name
    pub name: String,

    /// Observation timestamp (Unix seconds, UTC)
    pub dt: i64,

    /// System section carrying the country code
    pub sys: SystemSection,

    /// Geographic coordinates
    pub coord: CoordSection,

    /// Main atmospheric metrics
    pub main: MainSection,

    /// Wind metrics; history payloads may omit the whole section
    #[serde(default)]
    pub wind: WindSection,

    /// Weather conditions; the first entry is authoritative
    pub weather: Vec<ConditionSection>,
}

/// System metadata attached to an observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSection {
    /// ISO-2 country code of the observed city
    pub country: String,
}

/// Point coordinates of the observed city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordSection {
    pub lat: f64,
    pub lon: f64,
}

/// Main atmospheric metrics (metric units)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainSection {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// Wind metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindSection {
    pub speed: f64,

    /// Wind direction in degrees; absent in calm conditions
    #[serde(default)]
    pub deg: Option<f64>,
}

/// One weather condition entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSection {
    pub main: String,
    pub description: String,
}
