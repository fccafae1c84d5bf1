//! RestCountries client implementation

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::country::CountryApi;
use crate::config::CountryApiConfig;
use crate::domain::{Country, Result, StratusError, UpstreamError};

const SERVICE: &str = "RestCountries";

/// Response record for one country
///
/// Only the fields the weather schema keeps are deserialized. Some
/// territories come back without a region or subregion.
#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: CountryName,
    cca2: String,
    cca3: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    subregion: String,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    official: String,
    common: String,
}

impl From<CountryRecord> for Country {
    fn from(record: CountryRecord) -> Self {
        Country {
            official_name: record.name.official,
            common_name: record.name.common,
            iso2_code: record.cca2,
            iso3_code: record.cca3,
            region: record.region,
            subregion: record.subregion,
        }
    }
}

/// RestCountries client
pub struct RestCountriesClient {
    client: Client,
    base_url: String,
}

impl RestCountriesClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CountryApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                StratusError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl CountryApi for RestCountriesClient {
    async fn lookup(&self, iso2_code: &str) -> Result<Country> {
        let url = format!("{}/alpha/{}", self.base_url, iso2_code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        match response.status() {
            StatusCode::OK => {
                // The alpha endpoint answers with a one-element array
                let records: Vec<CountryRecord> = response.json().await.map_err(|e| {
                    UpstreamError::InvalidResponse {
                        service: SERVICE.to_string(),
                        message: e.to_string(),
                    }
                })?;

                let record = records.into_iter().next().ok_or_else(|| {
                    UpstreamError::InvalidResponse {
                        service: SERVICE.to_string(),
                        message: format!("Empty response for code '{iso2_code}'"),
                    }
                })?;

                Ok(record.into())
            }
            StatusCode::NOT_FOUND => Err(StratusError::NotFound(format!(
                "Country code '{iso2_code}' not recognized"
            ))),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(UpstreamError::ServerError {
                    service: SERVICE.to_string(),
                    status: status.as_u16(),
                    message: body,
                }
                .into())
            }
        }
    }
}
