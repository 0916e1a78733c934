//! Error types for the resume upload widget.
//!
//! - [`UploadError`] - everything the widget can show to the user
//! - [`TransportError`] - failures talking to the analyzer API
//! - [`StorageError`] - local storage failures
//!
//! The `Display` text of [`UploadError`] is the exact message rendered
//! under the drop zone.

use thiserror::Error;

/// Message shown when the request failed without a usable server message.
pub const GENERIC_NETWORK_ERROR: &str = "Network or server error. Please try again.";

// =============================================================================
// User-facing Errors
// =============================================================================

/// Errors surfaced by the upload widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Selection or drop carried no file.
    #[error("No file selected.")]
    NoFileSelected,

    /// MIME type is neither PDF nor DOCX.
    #[error("Only PDF or DOCX files are allowed.")]
    InvalidType,

    /// File exceeds the size ceiling.
    #[error("File is too large. Max size is 2 MB.")]
    TooLarge,

    /// Upload requested before a valid file was selected.
    #[error("Please select a resume file first.")]
    NothingToUpload,

    /// Analyzer answered but could not parse the resume.
    #[error("Parsing failed. Try again.")]
    ParsingFailed,

    /// Analyzer rejected the request with its own message.
    #[error("{0}")]
    Server(String),

    /// Network failure or server error without a message.
    #[error("Network or server error. Please try again.")]
    Network,
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Failure while sending the resume or reading the reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct TransportError {
    /// `error` field of the server's JSON body, when there was one.
    pub server_message: Option<String>,
    /// Diagnostic description for the console.
    pub detail: String,
}

impl TransportError {
    /// Failure with no response body (DNS, CORS, connection reset...).
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            server_message: None,
            detail: detail.into(),
        }
    }

    /// Non-success HTTP status, with the server message if it sent one.
    pub fn status(status: u16, server_message: Option<String>) -> Self {
        let detail = match &server_message {
            Some(msg) => format!("Server error ({}): {}", status, msg),
            None => format!("Server error ({})", status),
        };
        Self {
            server_message,
            detail,
        }
    }
}

impl From<TransportError> for UploadError {
    fn from(err: TransportError) -> Self {
        match err.server_message {
            Some(msg) if !msg.is_empty() => UploadError::Server(msg),
            _ => UploadError::Network,
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the persisted key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// `window.localStorage` is missing or access was denied.
    #[error("Local storage unavailable: {0}")]
    Unavailable(String),

    /// Write rejected (quota exceeded, private mode...).
    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    /// Value could not be serialized.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Json(err.to_string())
    }
}

/// Result type alias for widget operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
