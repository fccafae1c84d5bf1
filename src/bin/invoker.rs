//! Lambda entry point for the fan-out invoker.
//!
//! Runs on a schedule; the trigger payload is ignored. Reads the tracked
//! cities and dispatches one fire-and-forget fetch per active city.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};

use stratus::adapters::invoke::LambdaInvoker;
use stratus::adapters::registry::DynamoCityRegistry;
use stratus::config::load_config_from_env;
use stratus::functions::InvokeHandler;
use stratus::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    let config = load_config_from_env()?;
    init_logging(&config.application.log_level)?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let registry = Arc::new(DynamoCityRegistry::new(
        &sdk_config,
        config.registry.table.clone(),
    ));
    let invoker = Arc::new(LambdaInvoker::new(
        &sdk_config,
        config.invoker.fetch_function.clone(),
    ));
    let handler = Arc::new(InvokeHandler::new(registry, invoker));

    lambda_runtime::run(service_fn(move |_event: LambdaEvent<serde_json::Value>| {
        let handler = handler.clone();
        async move { handler.handle().await.map_err(LambdaError::from) }
    }))
    .await
}
