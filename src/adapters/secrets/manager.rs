//! Secrets Manager provider

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsClient;
use secrecy::Secret;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::secrets::{DbCredentials, SecretProvider};
use crate::config::SecretString;
use crate::domain::{Result, StratusError};

/// Stored shape of the weather API key document
#[derive(Deserialize)]
struct WeatherKeyDocument {
    #[serde(rename = "API")]
    api: crate::config::SecretValue,
}

/// Secret provider backed by AWS Secrets Manager
pub struct SecretsManagerProvider {
    client: SecretsClient,
}

impl SecretsManagerProvider {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: SecretsClient::new(sdk_config),
        }
    }

    /// Fetches the string body of one secret
    async fn secret_body(&self, secret_id: &str) -> Result<String> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                StratusError::Configuration(format!(
                    "Failed to fetch secret '{secret_id}': {e}"
                ))
            })?;

        debug!(secret_id = %secret_id, "Fetched secret");

        response.secret_string.ok_or_else(|| {
            StratusError::Configuration(format!(
                "Secret '{secret_id}' has no string body"
            ))
        })
    }
}

#[async_trait]
impl SecretProvider for SecretsManagerProvider {
    async fn database_credentials(&self, secret_id: &str) -> Result<DbCredentials> {
        let body = self.secret_body(secret_id).await?;
        serde_json::from_str(&body).map_err(|e| {
            StratusError::Configuration(format!(
                "Secret '{secret_id}' is not a credentials document: {e}"
            ))
        })
    }

    async fn weather_api_key(&self, secret_id: &str) -> Result<SecretString> {
        let body = self.secret_body(secret_id).await?;
        let document: WeatherKeyDocument = serde_json::from_str(&body).map_err(|e| {
            StratusError::Configuration(format!(
                "Secret '{secret_id}' is not an API key document: {e}"
            ))
        })?;

        Ok(Secret::new(document.api))
    }
}
