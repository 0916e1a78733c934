//! Common types used across the widget.
//!
//! # Categories
//!
//! - **File Types** - what the widget needs to know about a chosen file
//! - **API Types** - analyzer response structures

use serde::Serialize;
use serde_json::Value;

// =============================================================================
// File Types
// =============================================================================

/// A user-chosen file as seen by the widget.
///
/// Implemented for `web_sys::File` in the browser; tests provide their own
/// lightweight implementation.
pub trait ResumeFile: Clone {
    /// File name including extension.
    fn file_name(&self) -> String;
    /// MIME type reported by the browser (may be empty).
    fn mime_type(&self) -> String;
    /// Size in bytes.
    fn byte_size(&self) -> u64;
}

impl ResumeFile for web_sys::File {
    fn file_name(&self) -> String {
        web_sys::File::name(self)
    }

    fn mime_type(&self) -> String {
        web_sys::Blob::type_(self)
    }

    fn byte_size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response from the analyzer upload endpoint.
///
/// Read field by field: only `success` decides the outcome, `data` is
/// opaque and an `error` that is not a string is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UploadResponse {
    /// Whether the analyzer managed to parse the resume
    pub success: bool,
    /// Parsed resume, opaque to the widget
    pub data: Option<Value>,
    /// Error message from the server
    pub error: Option<String>,
}

impl UploadResponse {
    /// Read a response body.
    ///
    /// A body that is not JSON yields an unsuccessful response rather than
    /// an error.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("⚠️  Unexpected analyzer response ({}): {:.120}", e, body);
                Self::default()
            }
        }
    }

    /// Pick the known fields out of a JSON reply.
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
            data: value.get("data").filter(|data| !data.is_null()).cloned(),
            error: value.get("error").and_then(Value::as_str).map(str::to_owned),
        }
    }

    /// Parsed payload, `null` when the server omitted it.
    pub fn payload(&self) -> Value {
        self.data.clone().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "success": true,
            "data": {
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "skills": ["analysis", "mathematics"]
            }
        }"#;

        let response = UploadResponse::from_body(json);
        assert!(response.success);
        assert_eq!(response.payload()["name"], "Ada Lovelace");
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_missing_success_reads_as_failure() {
        let response = UploadResponse::from_body(r#"{"data": {"x": 1}}"#);
        assert!(!response.success);
    }

    #[test]
    fn test_non_json_body_reads_as_failure() {
        let response = UploadResponse::from_body("<html>Bad Gateway</html>");
        assert_eq!(response, UploadResponse::default());
    }

    #[test]
    fn test_success_survives_odd_optional_fields() {
        let response = UploadResponse::from_body(
            r#"{"success": true, "data": {"x": 1}, "error": {"code": 0}}"#,
        );
        assert!(response.success);
        assert_eq!(response.payload(), json!({"x": 1}));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_non_boolean_success_is_failure() {
        let response = UploadResponse::from_body(r#"{"success": "yes", "data": [1, 2]}"#);
        assert!(!response.success);
        assert_eq!(response.payload(), json!([1, 2]));
    }

    #[test]
    fn test_error_message_is_read() {
        let response = UploadResponse::from_body(r#"{"success": false, "error": "Empty document"}"#);
        assert_eq!(response.error.as_deref(), Some("Empty document"));
    }

    #[test]
    fn test_missing_data_is_null() {
        let response = UploadResponse::from_body(r#"{"success": true}"#);
        assert_eq!(response.payload(), json!(null));
    }
}
