//! Lambda entry point for the CSV export function.
//!
//! HTTP-style function behind a function URL or API gateway. Accepts
//! `POST` with a JSON body `{"columns": [...], "name": "..."}` and an
//! `x-api-key` header; answers with a JSON body carrying either the
//! download link or an error reason.

use std::sync::Arc;

use lambda_http::{service_fn, Body, Error as LambdaError, Request, Response};

use stratus::adapters::relational::PostgresStore;
use stratus::adapters::secrets::{SecretProvider, SecretsManagerProvider};
use stratus::adapters::storage::S3ObjectStore;
use stratus::config::load_config_from_env;
use stratus::core::ExportPipeline;
use stratus::functions::ExportHandler;
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
    let objects = Arc::new(S3ObjectStore::new(
        &sdk_config,
        config.storage.bucket.clone(),
    ));
    let pipeline = ExportPipeline::new(store, objects, &config);
    let handler = Arc::new(ExportHandler::new(pipeline, config.export.api_key.clone()));

    lambda_http::run(service_fn(move |event: Request| {
        let handler = handler.clone();
        async move {
            let presented_key = event
                .headers()
                .get("x-api-key")
                .and_then(|value| value.to_str().ok());

            let (status, body) = handler.handle(presented_key, event.body().as_ref()).await;

            let response = Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?;
            Ok::<Response<Body>, LambdaError>(response)
        }
    }))
    .await
}
