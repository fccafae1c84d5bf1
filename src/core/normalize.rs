//! Weather record normalization
//!
//! Decomposes one staged observation payload into the three relational
//! rows and commits them as a single unit. Re-delivery of the same
//! payload is safe: every insert is insert-or-ignore on its natural
//! key, so replays change nothing.

use std::sync::Arc;

use crate::adapters::country::CountryApi;
use crate::adapters::relational::RelationalStore;
use crate::domain::{
    City, ObservationRows, Result, StratusError, WeatherObservation, WeatherReading,
};

/// Normalizer for staged weather observations
pub struct Normalizer {
    store: Arc<dyn RelationalStore>,
    countries: Arc<dyn CountryApi>,
}

impl Normalizer {
    pub fn new(store: Arc<dyn RelationalStore>, countries: Arc<dyn CountryApi>) -> Self {
        Self { store, countries }
    }

    /// Normalizes one staged payload and commits its rows
    ///
    /// The country record is fetched from the lookup API only when the
    /// store does not already hold a row for the payload's country code.
    /// Nothing is written unless every row could be built.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a payload that does not parse as
    /// an observation, and propagates lookup and store failures. On any
    /// error the store is left untouched by this invocation.
    pub async fn normalize(&self, payload: &[u8]) -> Result<ObservationRows> {
        let observation: WeatherObservation = serde_json::from_slice(payload).map_err(|e| {
            StratusError::Validation(format!("Staged object is not a weather observation: {e}"))
        })?;

        let rows = self.build_rows(&observation).await?;
        self.store.commit_observation(&rows).await?;

        tracing::info!(
            city_id = rows.city.id,
            city = %rows.city.name,
            date = %rows.reading.date,
            new_country = rows.country.is_some(),
            "Committed observation"
        );

        Ok(rows)
    }

    async fn build_rows(&self, observation: &WeatherObservation) -> Result<ObservationRows> {
        let code = observation.sys.country.clone();

        let country = match self.store.find_country_id(&code).await? {
            Some(_) => None,
            None => Some(self.countries.lookup(&code).await?),
        };

        Ok(ObservationRows {
            country,
            country_code: code,
            city: City {
                id: observation.id,
                name: observation.name.clone(),
                latitude: observation.coord.lat,
                longitude: observation.coord.lon,
            },
            reading: build_reading(observation)?,
        })
    }
}

/// Maps an observation to its reading row
///
/// The observation timestamp is truncated to a UTC calendar date; one
/// reading per city per day is the replay-safety key.
fn build_reading(observation: &WeatherObservation) -> Result<WeatherReading> {
    let condition = observation.weather.first().ok_or_else(|| {
        StratusError::Validation("Observation carries no weather conditions".to_string())
    })?;

    let date = chrono::DateTime::from_timestamp(observation.dt, 0)
        .ok_or_else(|| {
            StratusError::Validation(format!(
                "Observation timestamp {} is out of range",
                observation.dt
            ))
        })?
        .date_naive();

    Ok(WeatherReading {
        date,
        city_id: observation.id,
        main: condition.main.clone(),
        description: condition.description.clone(),
        temperature: observation.main.temp,
        feels_like: observation.main.feels_like,
        temperature_min: observation.main.temp_min,
        temperature_max: observation.main.temp_max,
        wind_speed: observation.wind.speed,
        wind_deg: observation.wind.deg,
        humidity: observation.main.humidity,
        pressure: observation.main.pressure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, ResultSet, SchemaSnapshot};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const PAYLOAD: &str = r#"{
        "coord": {"lon": 26.1063, "lat": 44.4323},
        "weather": [{"main": "Clear", "description": "clear sky"}],
        "main": {"temp": 21.4, "feels_like": 20.9, "temp_min": 20.0, "temp_max": 23.3,
                 "pressure": 1015, "humidity": 45},
        "wind": {"speed": 3.6, "deg": 350},
        "dt": 1735725600,
        "sys": {"country": "RO"},
        "id": 683506,
        "name": "Bucharest"
    }"#;

    struct RecordingStore {
        known_codes: Vec<String>,
        committed: Mutex<Vec<ObservationRows>>,
    }

    impl RecordingStore {
        fn new(known_codes: &[&str]) -> Self {
            Self {
                known_codes: known_codes.iter().map(|c| c.to_string()).collect(),
                committed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RelationalStore for RecordingStore {
        async fn test_connection(&self) -> Result<()> {
            Ok(())
        }

        async fn ensure_schema(&self) -> Result<()> {
            Ok(())
        }

        async fn schema_snapshot(&self, _tables: &[String]) -> Result<SchemaSnapshot> {
            Ok(SchemaSnapshot::default())
        }

        async fn find_country_id(&self, iso2_code: &str) -> Result<Option<i32>> {
            Ok(self
                .known_codes
                .iter()
                .position(|c| c.eq_ignore_ascii_case(iso2_code))
                .map(|idx| idx as i32 + 1))
        }

        async fn commit_observation(&self, rows: &ObservationRows) -> Result<()> {
            self.committed.lock().unwrap().push(rows.clone());
            Ok(())
        }

        async fn run_projection(&self, _select_list: &str) -> Result<ResultSet> {
            Ok(ResultSet {
                columns: Vec::new(),
                rows: Vec::new(),
            })
        }
    }

    struct CountingCountries {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingCountries {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl CountryApi for CountingCountries {
        async fn lookup(&self, iso2_code: &str) -> Result<Country> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StratusError::NotFound(format!(
                    "Country code '{iso2_code}' not recognized"
                )));
            }
            Ok(Country {
                official_name: "Romania".to_string(),
                common_name: "Romania".to_string(),
                iso2_code: iso2_code.to_string(),
                iso3_code: "ROU".to_string(),
                region: "Europe".to_string(),
                subregion: "Southeast Europe".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_unknown_country_is_looked_up_and_carried() {
        let store = Arc::new(RecordingStore::new(&[]));
        let countries = Arc::new(CountingCountries::new(false));
        let normalizer = Normalizer::new(store.clone(), countries.clone());

        let rows = normalizer.normalize(PAYLOAD.as_bytes()).await.unwrap();

        assert_eq!(countries.calls.load(Ordering::SeqCst), 1);
        assert_eq!(rows.country.as_ref().unwrap().iso3_code, "ROU");
        assert_eq!(rows.country_code, "RO");
        assert_eq!(store.committed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_known_country_skips_the_lookup() {
        let store = Arc::new(RecordingStore::new(&["RO"]));
        let countries = Arc::new(CountingCountries::new(true));
        let normalizer = Normalizer::new(store.clone(), countries.clone());

        let rows = normalizer.normalize(PAYLOAD.as_bytes()).await.unwrap();

        assert_eq!(countries.calls.load(Ordering::SeqCst), 0);
        assert!(rows.country.is_none());
        assert_eq!(store.committed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_commits_nothing() {
        let store = Arc::new(RecordingStore::new(&[]));
        let countries = Arc::new(CountingCountries::new(true));
        let normalizer = Normalizer::new(store.clone(), countries.clone());

        let err = normalizer.normalize(PAYLOAD.as_bytes()).await.unwrap_err();

        assert!(matches!(err, StratusError::NotFound(_)));
        assert!(store.committed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_payload_is_validation() {
        let store = Arc::new(RecordingStore::new(&[]));
        let countries = Arc::new(CountingCountries::new(false));
        let normalizer = Normalizer::new(store.clone(), countries);

        let err = normalizer.normalize(b"not json").await.unwrap_err();

        assert!(matches!(err, StratusError::Validation(_)));
        assert!(store.committed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reading_truncates_timestamp_to_utc_date() {
        let observation: WeatherObservation = serde_json::from_str(PAYLOAD).unwrap();
        let reading = build_reading(&observation).unwrap();

        // 1735725600 is 2025-01-01T10:00:00Z
        assert_eq!(reading.date.to_string(), "2025-01-01");
        assert_eq!(reading.city_id, 683506);
        assert_eq!(reading.main, "Clear");
        assert_eq!(reading.wind_deg, Some(350.0));
    }

    #[test]
    fn test_reading_requires_a_condition_entry() {
        let payload = PAYLOAD.replace(
            r#"[{"main": "Clear", "description": "clear sky"}]"#,
            "[]",
        );
        let observation: WeatherObservation = serde_json::from_str(&payload).unwrap();

        let err = build_reading(&observation).unwrap_err();
        assert!(matches!(err, StratusError::Validation(_)));
    }
}
