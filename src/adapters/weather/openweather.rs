//! OpenWeather client implementation

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

use crate::adapters::weather::WeatherApi;
use crate::config::{SecretString, WeatherApiConfig};
use crate::domain::{Result, StratusError, UpstreamError};

const SERVICE: &str = "OpenWeather";

/// OpenWeather client
///
/// Talks to the current-weather and history endpoints with a shared
/// API key. The key is sent as a query parameter, so request URLs are
/// never logged.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    history_base_url: String,
    units: String,
    api_key: SecretString,
}

impl OpenWeatherClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint and timeout settings
    /// * `api_key` - Provider API key resolved from the configured secret
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &WeatherApiConfig, api_key: SecretString) -> Result<Self> {
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
            history_base_url: config.history_base_url.clone(),
            units: config.units.clone(),
            api_key,
        })
    }

    async fn fetch(
        &self,
        url: &str,
        query: &[(&str, String)],
        city_id: i64,
    ) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        match response.status() {
            StatusCode::OK => response.json().await.map_err(|e| {
                UpstreamError::InvalidResponse {
                    service: SERVICE.to_string(),
                    message: e.to_string(),
                }
                .into()
            }),
            StatusCode::NOT_FOUND => Err(StratusError::NotFound(format!(
                "City {city_id} not known to the weather provider"
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

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current_observation(&self, city_id: i64) -> Result<serde_json::Value> {
        let url = format!("{}/weather", self.base_url);
        let query = [
            ("id", city_id.to_string()),
            ("units", self.units.clone()),
            ("appid", self.api_key.expose_secret().as_ref().to_string()),
        ];

        self.fetch(&url, &query, city_id).await
    }

    async fn historical_observation(
        &self,
        city_id: i64,
        timestamp: i64,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/history/city", self.history_base_url);
        let query = [
            ("id", city_id.to_string()),
            ("type", "hour".to_string()),
            ("start", timestamp.to_string()),
            ("end", timestamp.to_string()),
            ("units", self.units.clone()),
            ("appid", self.api_key.expose_secret().as_ref().to_string()),
        ];

        let payload = self.fetch(&url, &query, city_id).await?;

        // The history endpoint wraps entries in a list; a single-entry
        // window still arrives as a one-element list
        match payload.get("list").and_then(|list| list.get(0)) {
            Some(entry) => Ok(entry.clone()),
            None => Err(UpstreamError::InvalidResponse {
                service: SERVICE.to_string(),
                message: format!("History window for city {city_id} at {timestamp} is empty"),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::Matcher;

    fn test_config(base_url: &str) -> WeatherApiConfig {
        WeatherApiConfig {
            base_url: base_url.to_string(),
            history_base_url: base_url.to_string(),
            secret_id: "OpenWeatherApi".to_string(),
            units: "metric".to_string(),
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_current_observation_sends_expected_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/weather")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "683506".into()),
                Matcher::UrlEncoded("units".into(), "metric".into()),
                Matcher::UrlEncoded("appid".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 683506, "name": "Bucharest"}"#)
            .create_async()
            .await;

        let client = OpenWeatherClient::new(
            &test_config(&server.url()),
            secret_string("test-key".to_string()),
        )
        .unwrap();

        let payload = client.current_observation(683506).await.unwrap();
        assert_eq!(payload["name"], "Bucharest");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_current_observation_unknown_city_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/weather")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"cod": "404", "message": "city not found"}"#)
            .create_async()
            .await;

        let client = OpenWeatherClient::new(
            &test_config(&server.url()),
            secret_string("test-key".to_string()),
        )
        .unwrap();

        let err = client.current_observation(1).await.unwrap_err();
        assert!(matches!(err, StratusError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_current_observation_server_error_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/weather")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = OpenWeatherClient::new(
            &test_config(&server.url()),
            secret_string("test-key".to_string()),
        )
        .unwrap();

        let err = client.current_observation(683506).await.unwrap_err();
        match err {
            StratusError::Upstream(UpstreamError::ServerError { status, .. }) => {
                assert_eq!(status, 502);
            }
            other => panic!("Expected upstream server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_historical_observation_unwraps_first_entry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/history/city")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "683506".into()),
                Matcher::UrlEncoded("type".into(), "hour".into()),
                Matcher::UrlEncoded("start".into(), "1735718400".into()),
                Matcher::UrlEncoded("end".into(), "1735718400".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"list": [{"dt": 1735718400, "main": {"temp": 3.2}}]}"#)
            .create_async()
            .await;

        let client = OpenWeatherClient::new(
            &test_config(&server.url()),
            secret_string("test-key".to_string()),
        )
        .unwrap();

        let entry = client
            .historical_observation(683506, 1_735_718_400)
            .await
            .unwrap();
        assert_eq!(entry["dt"], 1_735_718_400);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_historical_observation_empty_window_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/history/city")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"list": []}"#)
            .create_async()
            .await;

        let client = OpenWeatherClient::new(
            &test_config(&server.url()),
            secret_string("test-key".to_string()),
        )
        .unwrap();

        let err = client
            .historical_observation(683506, 1_735_718_400)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StratusError::Upstream(UpstreamError::InvalidResponse { .. })
        ));
    }
}
