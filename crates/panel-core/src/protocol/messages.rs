//! Response envelope of the lifecycle endpoints.
//!
//! `POST /api/start`, `POST /api/stop`, and `POST /api/refresh-servers` all
//! answer with the same shape:
//!
//! ```json
//! { "success": true }
//! { "success": false, "error": "Bridge already running" }
//! ```

use serde::{Deserialize, Serialize};

/// `{success, error?}` reply of a lifecycle action.
///
/// An absent `success` decodes as `false` and an absent `error` as `None`,
/// so `{}` is an application-level failure with an empty message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Converts the envelope into a `Result`, yielding the server-supplied
    /// message verbatim on failure (empty when the server sent none).
    pub fn into_result(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.error.unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_decodes() {
        let resp: ActionResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(resp, ActionResponse::ok());
        assert_eq!(resp.into_result(), Ok(()));
    }

    #[test]
    fn test_failure_passes_message_through_verbatim() {
        let resp: ActionResponse =
            serde_json::from_str(r#"{"success":false,"error":"scan failed"}"#).unwrap();
        assert_eq!(resp.into_result(), Err("scan failed".to_string()));
    }

    #[test]
    fn test_empty_object_is_failure_with_empty_message() {
        let resp: ActionResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
        assert_eq!(resp.into_result(), Err(String::new()));
    }

    #[test]
    fn test_ok_serializes_without_error_field() {
        let json = serde_json::to_string(&ActionResponse::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
