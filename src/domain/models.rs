//! Relational domain models
//!
//! Row types for the three-table weather schema. These are the insert
//! shapes produced by the normalizer; database-generated identifiers
//! (the countries surrogate key) are resolved inside the commit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One country as resolved from the country lookup API
///
/// The relational store assigns the surrogate id; the ISO-2 code is the
/// natural uniqueness key (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub official_name: String,
    pub common_name: String,
    pub iso2_code: String,
    pub iso3_code: String,
    pub region: String,
    pub subregion: String,
}

/// One city keyed by the weather provider's identifier
///
/// The country foreign key is not carried here; the store resolves it
/// from [`ObservationRows::country_code`] when the rows are committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Provider-assigned identifier, used as the primary key verbatim
    pub id: i64,

    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One normalized weather reading
///
/// Uniqueness is (city_id, date): at most one reading per city per
/// calendar day survives replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Observation timestamp truncated to a UTC calendar date
    pub date: NaiveDate,

    pub city_id: i64,

    /// Primary condition group (e.g. "Clear", "Rain")
    pub main: String,

    /// Condition detail (e.g. "clear sky")
    pub description: String,

    pub temperature: f64,
    pub feels_like: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub wind_speed: f64,

    /// Wind direction in degrees; absent in calm conditions
    pub wind_deg: Option<f64>,

    pub humidity: f64,
    pub pressure: f64,
}

/// The atomic unit committed per staged observation
///
/// `country` is `None` when a row for `country_code` already exists in
/// the store, in which case the commit starts at the city insert. The
/// code is kept alongside so the store can resolve the foreign key in
/// either case.
#[derive(Debug, Clone)]
pub struct ObservationRows {
    pub country: Option<Country>,
    pub country_code: String,
    pub city: City,
    pub reading: WeatherReading,
}

/// Column listing for a single table
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumns {
    pub table: String,
    pub columns: Vec<String>,
}

/// Snapshot of the queryable schema, in configured table order
///
/// Used to validate selections before any SQL is built; a table or
/// column absent from the snapshot names the offender in the error.
#[derive(Debug, Clone, Default)]
pub struct SchemaSnapshot {
    pub tables: Vec<TableColumns>,
}

impl SchemaSnapshot {
    /// Whether the snapshot knows this table
    pub fn has_table(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t.table == table)
    }

    /// Whether the snapshot knows this column of this table
    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .iter()
            .any(|t| t.table == table && t.columns.iter().any(|c| c == column))
    }

    /// All columns qualified as `table.column`, in snapshot order
    pub fn qualified_columns(&self) -> Vec<String> {
        self.tables
            .iter()
            .flat_map(|t| t.columns.iter().map(|c| format!("{}.{}", t.table, c)))
            .collect()
    }
}

/// A projected query result with stringly-typed cells
///
/// `columns` carries the header even when `rows` is empty. NULL cells
/// are rendered as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reading() -> WeatherReading {
        WeatherReading {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            city_id: 683506,
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
            temperature: 21.4,
            feels_like: 20.9,
            temperature_min: 20.0,
            temperature_max: 23.3,
            wind_speed: 3.6,
            wind_deg: Some(350.0),
            humidity: 45.0,
            pressure: 1015.0,
        }
    }

    fn sample_snapshot() -> SchemaSnapshot {
        SchemaSnapshot {
            tables: vec![
                TableColumns {
                    table: "countries".to_string(),
                    columns: vec!["id".to_string(), "common_name".to_string()],
                },
                TableColumns {
                    table: "cities".to_string(),
                    columns: vec!["id".to_string(), "name".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_reading_roundtrip() {
        let reading = sample_reading();
        let json = serde_json::to_string(&reading).unwrap();
        let back: WeatherReading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_optional_wind_deg_serializes_as_null() {
        let mut reading = sample_reading();
        reading.wind_deg = None;
        let value = serde_json::to_value(&reading).unwrap();
        assert!(value["wind_deg"].is_null());
    }

    #[test]
    fn test_snapshot_lookups() {
        let snapshot = sample_snapshot();
        assert!(snapshot.has_table("countries"));
        assert!(!snapshot.has_table("volcanoes"));
        assert!(snapshot.has_column("cities", "name"));
        assert!(!snapshot.has_column("cities", "altitude"));
        assert!(!snapshot.has_column("volcanoes", "name"));
    }

    #[test]
    fn test_snapshot_qualified_columns_preserve_order() {
        let snapshot = sample_snapshot();
        assert_eq!(
            snapshot.qualified_columns(),
            vec!["countries.id", "countries.common_name", "cities.id", "cities.name"]
        );
    }
}
