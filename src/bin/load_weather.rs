//! Lambda entry point for the staged-object load function.
//!
//! Triggered by object-created notifications on the raw prefix, or
//! invoked directly with an empty payload to process the newest staged
//! object. An empty staging area answers 404 and an unusable payload
//! 400; any other failure fails the invocation so the staged object
//! survives for a later attempt.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};

use stratus::adapters::country::RestCountriesClient;
use stratus::adapters::relational::PostgresStore;
use stratus::adapters::secrets::{SecretProvider, SecretsManagerProvider};
use stratus::adapters::storage::S3ObjectStore;
use stratus::config::load_config_from_env;
use stratus::core::Normalizer;
use stratus::domain::{FunctionResponse, StratusError};
use stratus::functions::{LoadHandler, StorageEvent};
use stratus::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    let config = load_config_from_env()?;
    init_logging(&config.application.log_level)?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let secrets = SecretsManagerProvider::new(&sdk_config);
    let credentials = secrets
        .database_credentials(&config.database.secret_id)
        .await?;

    let store = Arc::new(PostgresStore::new(&credentials, &config.database)?);
    let countries = Arc::new(RestCountriesClient::new(&config.country)?);
    let objects = Arc::new(S3ObjectStore::new(
        &sdk_config,
        config.storage.bucket.clone(),
    ));
    let handler = Arc::new(LoadHandler::new(
        objects,
        Normalizer::new(store, countries),
        &config.storage.raw_prefix,
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<StorageEvent>| {
        let handler = handler.clone();
        async move {
            match handler.handle(event.payload.first_key()).await {
                Ok(response) => Ok(response),
                Err(err @ (StratusError::Validation(_) | StratusError::NotFound(_))) => {
                    Ok(FunctionResponse::error(&err))
                }
                Err(err) => Err(LambdaError::from(err)),
            }
        }
    }))
    .await
}
