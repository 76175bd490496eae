//! Validation modules

pub mod scan;

pub use scan::{normalize_content_type, validate_scan_file, MAX_SCAN_SIZE_BYTES};
