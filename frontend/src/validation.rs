//! Client-side resume validation.
//!
//! Rules are applied in order and the first failing one wins:
//! presence, MIME type, then size.

use crate::config::{ACCEPTED_MIME_TYPES, MAX_FILE_SIZE};
use crate::error::{UploadError, UploadResult};
use crate::types::ResumeFile;

/// Check a candidate file before it can be uploaded.
pub fn validate_file<F: ResumeFile>(file: Option<&F>) -> UploadResult<()> {
    let file = file.ok_or(UploadError::NoFileSelected)?;

    if !is_accepted_type(&file.mime_type()) {
        return Err(UploadError::InvalidType);
    }

    if file.byte_size() > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge);
    }

    Ok(())
}

/// Whether a MIME type is on the whitelist (exact match).
pub fn is_accepted_type(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}
