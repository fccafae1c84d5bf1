//! Domain models and types for Stratus
//!
//! This module contains the core domain types shared across the pipeline:
//! error hierarchy, result alias, weather observation payloads, relational
//! row models and the function response envelope.

pub mod errors;
pub mod models;
pub mod observation;
pub mod response;
pub mod result;

pub use errors::{PersistenceError, StorageError, StratusError, UpstreamError};
pub use models::{
    City, Country, ObservationRows, ResultSet, SchemaSnapshot, TableColumns, WeatherReading,
};
pub use observation::WeatherObservation;
pub use response::FunctionResponse;
pub use result::Result;
