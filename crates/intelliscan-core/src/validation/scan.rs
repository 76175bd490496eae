//! Scan file validation
//!
//! Both checks run locally, before any network call: a rejected file never
//! enters the upload flow.

use crate::error::AppError;

/// Maximum accepted scan size: 5 MiB (binary units).
pub const MAX_SCAN_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Normalize a MIME type by stripping parameters and whitespace
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Validate a scan file's declared media type and size.
///
/// The media type must be an image kind (`image/*`) and the size must not
/// exceed `max_size` bytes. Error messages are user-facing.
pub fn validate_scan_file(
    content_type: &str,
    size: usize,
    max_size: usize,
) -> Result<(), AppError> {
    let normalized = normalize_content_type(content_type);
    if !normalized.starts_with("image/") {
        return Err(AppError::InvalidInput(
            "Please select a valid image file".to_string(),
        ));
    }

    if size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size must be less than {} MB",
            max_size / 1024 / 1024
        )));
    }

    Ok(())
}
