//! IntelliScan Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across the IntelliScan client components.

pub mod config;
pub mod error;
pub mod models;
pub mod nav;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use nav::{NavLink, Route};
