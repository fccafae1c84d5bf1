//! Country lookup abstraction
//!
//! The normalizer resolves the country carried in an observation to a
//! full country record the first time a code is seen; afterwards the
//! relational store answers from its own rows.

pub mod restcountries;

pub use restcountries::RestCountriesClient;

use async_trait::async_trait;

use crate::domain::{Country, Result};

/// Client for the country lookup API
#[async_trait]
pub trait CountryApi: Send + Sync {
    /// Look up a country by ISO-2 code
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the code is not recognized, and
    /// an upstream error for transport failures or other non-success
    /// statuses.
    async fn lookup(&self, iso2_code: &str) -> Result<Country>;
}
