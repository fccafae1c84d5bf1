//! Lambda function invoker implementation

use async_trait::async_trait;
use aws_sdk_lambda::error::SdkError;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client as LambdaClient;

use crate::adapters::invoke::FunctionInvoker;
use crate::domain::{Result, StratusError};

/// Invoker dispatching to a named Lambda function
pub struct LambdaInvoker {
    client: LambdaClient,
    function_name: String,
}

impl LambdaInvoker {
    /// Creates an invoker bound to one function
    pub fn new(sdk_config: &aws_config::SdkConfig, function_name: impl Into<String>) -> Self {
        Self {
            client: LambdaClient::new(sdk_config),
            function_name: function_name.into(),
        }
    }
}

#[async_trait]
impl FunctionInvoker for LambdaInvoker {
    async fn dispatch_fetch(&self, city_id: i64) -> Result<()> {
        let payload = serde_json::to_vec(&serde_json::json!({ "city_id": city_id }))?;

        self.client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| {
                let message = match e {
                    SdkError::ServiceError(err) => err.into_err().to_string(),
                    _ => e.to_string(),
                };
                StratusError::Invocation(format!(
                    "Dispatch to '{}' for city {city_id} failed: {message}",
                    self.function_name
                ))
            })?;

        Ok(())
    }
}
