//! Data models for the IntelliScan client
//!
//! Organized by domain: scan files, users, and reports.

mod report;
mod scan;
mod user;

// Re-export all models for convenient imports
pub use report::*;
pub use scan::*;
pub use user::*;
