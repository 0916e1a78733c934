//! Application configuration.
//!
//! Centralized configuration for the resume upload widget.
//! Everything is resolved at compile time; the analyzer URL can be
//! overridden with `RESUME_ANALYZER_URL` when building.

/// Resume analyzer API base URL.
pub const ANALYZER_URL: &str = match option_env!("RESUME_ANALYZER_URL") {
    Some(url) => url,
    None => "https://resume-analyzer-backend-sr9f.onrender.com",
};

/// Path of the upload endpoint, relative to [`ANALYZER_URL`].
pub const UPLOAD_PATH: &str = "/api/upload";

/// Multipart field name carrying the resume.
pub const UPLOAD_FIELD: &str = "resume";

/// Maximum file size for upload (in bytes).
///
/// 2 MB limit.
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// MIME type reported by browsers for PDF files.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type reported by browsers for DOCX files.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME types accepted by the widget.
pub const ACCEPTED_MIME_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];

/// Value of the file input's `accept` attribute.
pub const ACCEPT_ATTR: &str = ".pdf,.docx";

/// Local storage keys shared with the rest of the application.
pub mod storage_keys {
    /// JSON-serialized parsed result.
    pub const PARSED_DATA: &str = "parsedData";
    /// Stringified number of successful analyses.
    pub const ANALYZED_COUNT: &str = "analyzedCount";
    /// Name of the last successfully uploaded file.
    pub const LAST_FILE_NAME: &str = "lastUploadedFileName";
}

/// Full URL of the upload endpoint for a given base URL.
pub fn upload_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), UPLOAD_PATH)
}

/// Human-readable size limit shown next to the drop zone ("2MB").
pub fn max_size_label() -> String {
    format!("{}MB", MAX_FILE_SIZE / (1024 * 1024))
}
