//! Plugin protocol types
//!
//! Generators communicate via JSON lines over stdin/stdout: one request line
//! in, one or more response lines out.

use serde::{Deserialize, Serialize};

/// Operation name for concept-brief generation
pub const IDEATE_OPERATION: &str = "ideate";

/// A message sent to a plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRequest {
    /// The operation to perform
    pub operation: String,

    /// Operation-specific parameters
    pub params: serde_json::Value,
}

impl PluginRequest {
    pub fn new(operation: impl Into<String>, params: impl Into<serde_json::Value>) -> Self {
        Self {
            operation: operation.into(),
            params: params.into(),
        }
    }

    pub fn ideate(params: &IdeateParams) -> Self {
        // a struct of two strings always serializes
        let params = serde_json::to_value(params).unwrap_or_default();
        Self::new(IDEATE_OPERATION, params)
    }
}

/// Parameters of an `ideate` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeateParams {
    pub system_instruction: String,
    pub prompt: String,
}

/// A response line from a plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Result data (if success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message (if failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginResponse {
    pub fn success(data: impl Into<serde_json::Value>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Text chunk carried in `data.text`, if any
    pub fn text(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.get("text"))
            .and_then(|t| t.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideate_request_shape() {
        let request = PluginRequest::ideate(&IdeateParams {
            system_instruction: "Be brief".to_string(),
            prompt: "a chat app".to_string(),
        });
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["operation"], "ideate");
        assert_eq!(json["params"]["system_instruction"], "Be brief");
        assert_eq!(json["params"]["prompt"], "a chat app");
    }

    #[test]
    fn response_text_chunk() {
        let response: PluginResponse =
            serde_json::from_str(r#"{"success":true,"data":{"text":"A global"}}"#).unwrap();
        assert_eq!(response.text(), Some("A global"));

        let response = PluginResponse::success(serde_json::json!({"other": 1}));
        assert_eq!(response.text(), None);
    }

    #[test]
    fn response_error() {
        let response: PluginResponse =
            serde_json::from_str(r#"{"success":false,"error":"quota exceeded"}"#).unwrap();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("quota exceeded"));
        assert_eq!(
            PluginResponse::error("quota exceeded").error,
            response.error
        );
    }
}
