//! Backend wire envelope
//!
//! Every CampusHub backend response is JSON of the shape
//! `{success: bool, data?: any, message?: string}`. The client checks
//! `success` and otherwise forwards `data` untouched; no further schema
//! is enforced at this layer.

use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every backend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Split the envelope into its success payload or failure message.
    ///
    /// `Ok(data)` carries the payload (which may legitimately be absent
    /// for mutations that return nothing); `Err(message)` carries the
    /// server-supplied failure message when `success` is false.
    pub fn into_parts(self) -> std::result::Result<(Option<T>, Option<String>), Option<String>> {
        if self.success {
            Ok((self.data, self.message))
        } else {
            Err(self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the wire envelope.
    use serde_json::json;

    use super::*;

    /// Validates envelope decoding for the success-with-data scenario.
    ///
    /// Assertions:
    /// - Ensures `envelope.success` evaluates to true.
    /// - Confirms the decoded payload equals `42`.
    #[test]
    fn decodes_success_with_data() {
        let envelope: ApiEnvelope<i64> =
            serde_json::from_value(json!({"success": true, "data": 42})).unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, Some(42));
        assert!(envelope.message.is_none());
    }

    /// Validates envelope decoding for the failure-with-message scenario.
    ///
    /// Assertions:
    /// - Ensures `into_parts` yields the server message on failure.
    #[test]
    fn decodes_failure_with_message() {
        let envelope: ApiEnvelope<i64> =
            serde_json::from_value(json!({"success": false, "message": "nope"})).unwrap();

        let parts = envelope.into_parts();
        assert_eq!(parts, Err(Some("nope".to_string())));
    }

    /// Validates envelope decoding when the backend omits optional fields.
    #[test]
    fn tolerates_missing_optional_fields() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_value(json!({"success": true})).unwrap();

        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.message.is_none());
    }
}
