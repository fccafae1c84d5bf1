//! Lambda entry point for the historical backfill function.
//!
//! Invoked manually with `{"city_id": <provider id>}` to stage one
//! observation per day from the configured epoch to now. The load
//! function then normalizes the staged objects as usual.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};

use stratus::adapters::secrets::{SecretProvider, SecretsManagerProvider};
use stratus::adapters::storage::S3ObjectStore;
use stratus::adapters::weather::OpenWeatherClient;
use stratus::config::load_config_from_env;
use stratus::domain::FunctionResponse;
use stratus::functions::{BackfillHandler, FetchRequest};
use stratus::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    let config = load_config_from_env()?;
    init_logging(&config.application.log_level)?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let secrets = SecretsManagerProvider::new(&sdk_config);
    let api_key = secrets.weather_api_key(&config.weather.secret_id).await?;

    let weather = Arc::new(OpenWeatherClient::new(&config.weather, api_key)?);
    let objects = Arc::new(S3ObjectStore::new(
        &sdk_config,
        config.storage.bucket.clone(),
    ));
    let handler = Arc::new(BackfillHandler::new(weather, objects, &config));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<FetchRequest>| {
        let handler = handler.clone();
        async move {
            let response = match handler.handle(event.payload.city_id).await {
                Ok(response) => response,
                Err(err) => FunctionResponse::error(&err),
            };
            Ok::<FunctionResponse, LambdaError>(response)
        }
    }))
    .await
}
