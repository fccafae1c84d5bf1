//! PostgreSQL store implementation
//!
//! This module provides the pooled PostgreSQL backend for the weather
//! schema. Credentials come from the secret resolved at startup; the
//! pool is built once and shared across invocations.

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::types::Type;
use tokio_postgres::{NoTls, Row};

use crate::adapters::relational::RelationalStore;
use crate::adapters::secrets::DbCredentials;
use crate::config::DatabaseConfig;
use crate::domain::{
    ObservationRows, PersistenceError, Result, ResultSet, SchemaSnapshot, TableColumns,
};

const INSERT_COUNTRY: &str = "INSERT INTO countries \
     (official_name, common_name, iso2_code, iso3_code, region, subregion) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     ON CONFLICT DO NOTHING";

const SELECT_COUNTRY_ID: &str =
    "SELECT id FROM countries WHERE UPPER(iso2_code) = UPPER($1)";

const INSERT_CITY: &str = "INSERT INTO cities (id, country_id, name, latitude, longitude) \
     VALUES ($1, $2, $3, $4, $5) \
     ON CONFLICT (id) DO NOTHING";

const INSERT_READING: &str = "INSERT INTO weather_readings \
     (date, city_id, main, description, temperature, feels_like, \
      temperature_min, temperature_max, wind_speed, wind_deg, humidity, pressure) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
     ON CONFLICT (city_id, date) DO NOTHING";

/// Join clause shared by every projection query
const PROJECTION_FROM: &str = "FROM countries \
     JOIN cities ON countries.id = cities.country_id \
     JOIN weather_readings ON cities.id = weather_readings.city_id";

/// PostgreSQL store for the weather schema
///
/// Provides transactional row commits and read-side projections using
/// connection pooling.
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Create a new store from resolved credentials
    ///
    /// # Arguments
    ///
    /// * `credentials` - Credentials resolved from the configured secret
    /// * `config` - Pool sizing and timeout settings
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be created. No
    /// connection is attempted here; use [`RelationalStore::test_connection`]
    /// to probe.
    pub fn new(credentials: &DbCredentials, config: &DatabaseConfig) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&credentials.host)
            .port(config.port)
            .user(&credentials.user)
            .password(credentials.password.expose_secret().as_ref())
            .dbname(&credentials.dbname)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connect_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connect_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| {
                PersistenceError::ConnectionFailed(format!("Failed to create pool: {e}"))
            })?;

        Ok(Self { pool })
    }

    /// Get a connection from the pool
    async fn connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| {
                PersistenceError::ConnectionFailed(format!(
                    "Failed to get connection from pool: {e}"
                ))
                .into()
            })
    }
}

#[async_trait]
impl RelationalStore for PostgresStore {
    async fn test_connection(&self) -> Result<()> {
        let client = self.connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| PersistenceError::ConnectionFailed(format!("Probe failed: {e}")))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        let client = self.connection().await?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| PersistenceError::QueryFailed(format!("Migration failed: {e}")))?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    async fn schema_snapshot(&self, tables: &[String]) -> Result<SchemaSnapshot> {
        let client = self.connection().await?;

        let mut snapshot = SchemaSnapshot::default();
        for table in tables {
            let rows = client
                .query(
                    "SELECT column_name::text FROM information_schema.columns \
                     WHERE table_schema = 'public' AND table_name = $1 \
                     ORDER BY ordinal_position",
                    &[table],
                )
                .await
                .map_err(|e| PersistenceError::SchemaUnavailable(e.to_string()))?;

            let mut columns = Vec::with_capacity(rows.len());
            for row in &rows {
                let column: String = row
                    .try_get(0)
                    .map_err(|e| PersistenceError::SchemaUnavailable(e.to_string()))?;
                columns.push(column);
            }

            // A configured table with no columns does not exist in the store
            if columns.is_empty() {
                continue;
            }

            snapshot.tables.push(TableColumns {
                table: table.clone(),
                columns,
            });
        }

        Ok(snapshot)
    }

    async fn find_country_id(&self, iso2_code: &str) -> Result<Option<i32>> {
        let client = self.connection().await?;

        let row = client
            .query_opt(SELECT_COUNTRY_ID, &[&iso2_code])
            .await
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        match row {
            Some(row) => {
                let id: i32 = row
                    .try_get(0)
                    .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    async fn commit_observation(&self, rows: &ObservationRows) -> Result<()> {
        let mut client = self.connection().await?;

        let txn = client
            .transaction()
            .await
            .map_err(|e| PersistenceError::TransactionFailed(e.to_string()))?;

        if let Some(country) = &rows.country {
            txn.execute(
                INSERT_COUNTRY,
                &[
                    &country.official_name,
                    &country.common_name,
                    &country.iso2_code,
                    &country.iso3_code,
                    &country.region,
                    &country.subregion,
                ],
            )
            .await
            .map_err(|e| PersistenceError::InsertFailed {
                table: "countries".to_string(),
                message: e.to_string(),
            })?;
        }

        // The code must resolve inside the transaction whether the country
        // row was just written or already existed
        let country_row = txn
            .query_opt(SELECT_COUNTRY_ID, &[&rows.country_code])
            .await
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        let country_id: i32 = match country_row {
            Some(row) => row
                .try_get(0)
                .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?,
            None => {
                return Err(PersistenceError::QueryFailed(format!(
                    "Country '{}' missing after insert",
                    rows.country_code
                ))
                .into());
            }
        };

        txn.execute(
            INSERT_CITY,
            &[
                &rows.city.id,
                &country_id,
                &rows.city.name,
                &rows.city.latitude,
                &rows.city.longitude,
            ],
        )
        .await
        .map_err(|e| PersistenceError::InsertFailed {
            table: "cities".to_string(),
            message: e.to_string(),
        })?;

        let reading = &rows.reading;
        txn.execute(
            INSERT_READING,
            &[
                &reading.date,
                &reading.city_id,
                &reading.main,
                &reading.description,
                &reading.temperature,
                &reading.feels_like,
                &reading.temperature_min,
                &reading.temperature_max,
                &reading.wind_speed,
                &reading.wind_deg,
                &reading.humidity,
                &reading.pressure,
            ],
        )
        .await
        .map_err(|e| PersistenceError::InsertFailed {
            table: "weather_readings".to_string(),
            message: e.to_string(),
        })?;

        txn.commit()
            .await
            .map_err(|e| PersistenceError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    async fn run_projection(&self, select_list: &str) -> Result<ResultSet> {
        let client = self.connection().await?;

        let sql = format!("SELECT {select_list} {PROJECTION_FROM}");

        // Preparing first yields the header even when the query matches
        // zero rows
        let statement = client
            .prepare(&sql)
            .await
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let db_rows = client
            .query(&statement, &[])
            .await
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        let mut rows = Vec::with_capacity(db_rows.len());
        for db_row in &db_rows {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                cells.push(cell_to_string(db_row, idx)?);
            }
            rows.push(cells);
        }

        Ok(ResultSet { columns, rows })
    }
}

/// Renders one cell as text, with NULL as the empty string
fn cell_to_string(row: &Row, idx: usize) -> Result<String> {
    let ty = row.columns()[idx].type_();

    let rendered = if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<chrono::NaiveDate>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)
            .map(|v| v.map(|v| v.to_string()))
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR || *ty == Type::NAME
    {
        row.try_get::<_, Option<String>>(idx)
    } else {
        return Err(PersistenceError::QueryFailed(format!(
            "Unsupported column type '{}' for '{}'",
            ty,
            row.columns()[idx].name()
        ))
        .into());
    };

    let rendered = rendered.map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(rendered.unwrap_or_default())
}
