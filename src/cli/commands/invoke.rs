//! Invoke command implementation
//!
//! This module implements the `invoke` command for fanning out fetch
//! invocations to every active registered city.

use std::sync::Arc;

use clap::Args;

use super::{resolve_config, response_message};
use crate::adapters::invoke::LambdaInvoker;
use crate::adapters::registry::DynamoCityRegistry;
use crate::functions::InvokeHandler;

/// Arguments for the invoke command
#[derive(Args, Debug)]
pub struct InvokeArgs {}

impl InvokeArgs {
    /// Execute the invoke command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Dispatching fetches for active cities");

        println!("🚀 Dispatching fetches for active cities");
        println!();

        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let registry = Arc::new(DynamoCityRegistry::new(
            &sdk_config,
            config.registry.table.clone(),
        ));
        let invoker = Arc::new(LambdaInvoker::new(
            &sdk_config,
            config.invoker.fetch_function.clone(),
        ));
        let handler = InvokeHandler::new(registry, invoker);

        match handler.handle().await {
            Ok(response) => {
                println!("✅ {}", response_message(&response));
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to read the city registry");
                println!("   Error: {e}");
                Ok(4) // Connection error exit code
            }
        }
    }
}
