//! IntelliScan upload workflow
//!
//! The asynchronous upload-and-report-creation workflow: file acquisition,
//! synthetic progress, orchestration of the classification and report-creation
//! calls, and cleanup. Network, navigation, and notification are collaborator
//! traits defined here and implemented by the API client and the embedding
//! application.

pub mod collaborators;
pub mod progress;
pub mod upload;

pub use collaborators::{
    Navigator, NoopNavigator, NoopNotifier, Notifier, ReportStore, ScanAnalyzer,
};
pub use progress::ProgressSimulator;
pub use upload::{
    failure_message, UploadConfig, UploadState, UploadWorkflow, UPLOAD_FAILURE_FALLBACK,
};
