//! Function response envelope
//!
//! Every function returns a status code plus a body. Success bodies carry
//! a JSON-encoded message; failure bodies carry the human-readable reason.

use serde::{Deserialize, Serialize};

use crate::domain::errors::StratusError;

/// Status code and body returned by a function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl FunctionResponse {
    /// Success response with a JSON-encoded message body
    pub fn ok(message: &str) -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!(message).to_string(),
        }
    }

    /// Failure response derived from an error's status code and message
    pub fn error(err: &StratusError) -> Self {
        Self {
            status_code: err.status_code(),
            body: err.to_string(),
        }
    }
}

impl From<&StratusError> for FunctionResponse {
    fn from(err: &StratusError) -> Self {
        FunctionResponse::error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_encodes_message_as_json_string() {
        let resp = FunctionResponse::ok("City Found");
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "\"City Found\"");
    }

    #[test]
    fn test_error_uses_taxonomy_status() {
        let err = StratusError::NotFound("City not found".to_string());
        let resp = FunctionResponse::error(&err);
        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body, "Not found: City not found");
    }

    #[test]
    fn test_serializes_with_lambda_field_names() {
        let resp = FunctionResponse::ok("done");
        let value = serde_json::to_value(&resp).unwrap();
        assert!(value.get("statusCode").is_some());
        assert!(value.get("body").is_some());
    }
}
