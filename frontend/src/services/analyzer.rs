//! HTTP client for the resume analyzer API.
//!
//! One multipart POST per upload, no retries and no timeout.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::config::{upload_url, ANALYZER_URL, UPLOAD_FIELD};
use crate::error::TransportError;
use crate::types::{ResumeFile, UploadResponse};

/// Sends a resume to the analyzer.
///
/// `Ok` means the server answered with a success status; whether the
/// resume was actually parsed is carried by [`UploadResponse::success`].
#[async_trait(?Send)]
pub trait AnalyzerClient {
    /// File handle the client knows how to send.
    type File: ResumeFile;

    async fn upload(&self, file: &Self::File) -> Result<UploadResponse, TransportError>;
}

/// Analyzer reached over HTTP with `gloo-net`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpAnalyzer {
    endpoint: String,
}

impl HttpAnalyzer {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: upload_url(base_url),
        }
    }

    /// Full upload URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpAnalyzer {
    fn default() -> Self {
        Self::new(ANALYZER_URL)
    }
}

#[async_trait(?Send)]
impl AnalyzerClient for HttpAnalyzer {
    type File = File;

    async fn upload(&self, file: &File) -> Result<UploadResponse, TransportError> {
        let form_data = FormData::new()
            .map_err(|e| TransportError::network(format!("Failed to create FormData: {:?}", e)))?;

        form_data
            .append_with_blob_and_filename(UPLOAD_FIELD, file, &file.file_name())
            .map_err(|e| TransportError::network(format!("Failed to append file: {:?}", e)))?;

        let request = Request::post(&self.endpoint)
            .body(form_data)
            .map_err(|e| TransportError::network(format!("Failed to build request: {}", e)))?;

        log::info!("📤 Uploading {} to {}", file.file_name(), self.endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::network(format!("HTTP request failed: {}", e)))?;

        let body = response.text().await;

        if !response.ok() {
            let server_message = body
                .ok()
                .and_then(|text| UploadResponse::from_body(&text).error);
            return Err(TransportError::status(response.status(), server_message));
        }

        let body = body
            .map_err(|e| TransportError::network(format!("Failed to read response: {}", e)))?;

        Ok(UploadResponse::from_body(&body))
    }
}
