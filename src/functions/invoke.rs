//! Fan-out invoker function
//!
//! Reads the tracked-city registry and dispatches one fire-and-forget
//! fetch per active city. A failed dispatch is tallied, not fatal; the
//! summary reports the count.

use std::sync::Arc;

use crate::adapters::invoke::FunctionInvoker;
use crate::adapters::registry::CityRegistry;
use crate::domain::{FunctionResponse, Result};
use crate::log_loop_summary;

/// Fan-out handler
pub struct InvokeHandler {
    registry: Arc<dyn CityRegistry>,
    invoker: Arc<dyn FunctionInvoker>,
}

impl InvokeHandler {
    pub fn new(registry: Arc<dyn CityRegistry>, invoker: Arc<dyn FunctionInvoker>) -> Self {
        Self { registry, invoker }
    }

    /// Dispatches one fetch per tracked city
    ///
    /// # Errors
    ///
    /// Fails only when the registry itself cannot be read; individual
    /// dispatch failures are counted and reported in the summary.
    pub async fn handle(&self) -> Result<FunctionResponse> {
        let city_ids = self.registry.active_city_ids().await?;
        let mut failed = 0usize;

        for city_id in city_ids.iter().copied() {
            if let Err(err) = self.invoker.dispatch_fetch(city_id).await {
                failed += 1;
                tracing::warn!(city_id, error = %err, "Dispatch failed");
            }
        }

        log_loop_summary!("fan-out", city_ids.len(), failed);
        Ok(FunctionResponse::ok(&format!(
            "Invoke ended: {} dispatched, {} failed",
            city_ids.len() - failed,
            failed
        )))
    }
}
