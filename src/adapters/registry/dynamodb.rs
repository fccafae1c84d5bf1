//! DynamoDB city registry implementation

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use tracing::warn;

use crate::adapters::registry::CityRegistry;
use crate::domain::{Result, UpstreamError};

const SERVICE: &str = "city registry";

/// Attribute carrying the weather provider's city id
const CITY_ID_ATTR: &str = "ow-id";

/// City registry backed by a DynamoDB table
///
/// Each item is one tracked city; the `active` flag gates fan-out.
pub struct DynamoCityRegistry {
    client: DynamoClient,
    table: String,
}

impl DynamoCityRegistry {
    /// Creates a registry bound to one table
    pub fn new(sdk_config: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: DynamoClient::new(sdk_config),
            table: table.into(),
        }
    }
}

#[async_trait]
impl CityRegistry for DynamoCityRegistry {
    async fn active_city_ids(&self) -> Result<Vec<i64>> {
        let mut ids = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table)
                .filter_expression("#active = :active")
                .expression_attribute_names("#active", "active")
                .expression_attribute_values(":active", AttributeValue::Bool(true));

            if let Some(key) = exclusive_start_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let response = request.send().await.map_err(|e| {
                let message = match e {
                    SdkError::ServiceError(err) => err.into_err().to_string(),
                    _ => e.to_string(),
                };
                UpstreamError::ConnectionFailed {
                    service: SERVICE.to_string(),
                    message,
                }
            })?;

            if let Some(items) = response.items {
                for item in items {
                    match parse_city_id(&item) {
                        Some(id) => ids.push(id),
                        None => warn!(
                            table = %self.table,
                            "Skipping registry item without a usable city id"
                        ),
                    }
                }
            }

            exclusive_start_key = response.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        Ok(ids)
    }
}

/// Extracts the numeric city id from one registry item
fn parse_city_id(
    item: &std::collections::HashMap<String, AttributeValue>,
) -> Option<i64> {
    match item.get(CITY_ID_ATTR)? {
        AttributeValue::N(value) => value.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn item_with(attr: &str, value: AttributeValue) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert(attr.to_string(), value);
        item
    }

    #[test]
    fn test_parse_city_id_from_number_attribute() {
        let item = item_with(CITY_ID_ATTR, AttributeValue::N("683506".to_string()));
        assert_eq!(parse_city_id(&item), Some(683506));
    }

    #[test]
    fn test_parse_city_id_rejects_missing_attribute() {
        let item = item_with("name", AttributeValue::S("Bucharest".to_string()));
        assert_eq!(parse_city_id(&item), None);
    }

    #[test]
    fn test_parse_city_id_rejects_non_numeric_attribute() {
        let item = item_with(CITY_ID_ATTR, AttributeValue::S("683506".to_string()));
        assert_eq!(parse_city_id(&item), None);

        let item = item_with(CITY_ID_ATTR, AttributeValue::N("not-a-number".to_string()));
        assert_eq!(parse_city_id(&item), None);
    }
}
