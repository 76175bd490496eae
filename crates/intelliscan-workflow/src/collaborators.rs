//! Collaborator traits for the upload workflow
//!
//! The workflow defines the contracts it needs; the API client implements the
//! network-facing ones, and the embedding application (CLI, UI shell) provides
//! navigation and notification.

use async_trait::async_trait;

use intelliscan_core::models::{CreateReportRequest, Report, ScanAnalysis, ScanFile};
use intelliscan_core::{AppError, Route};

/// External classification service: uploads a scan and returns the tumor
/// classification plus the generated segmentation-mask reference.
#[async_trait]
pub trait ScanAnalyzer: Send + Sync {
    async fn analyze_scan(&self, scan: &ScanFile) -> Result<ScanAnalysis, AppError>;
}

/// Report storage collaborator. Assigns the server-side id and creation
/// timestamp; ownership of the report transfers here on success.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn create_report(&self, request: CreateReportRequest) -> Result<Report, AppError>;
}

/// Routes the user to a destination after workflow milestones.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: Route);
}

/// Surfaces success/failure toasts. Purely observational.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// No-op navigator for headless or embedded use.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate_to(&self, _route: Route) {}
}

/// No-op notifier for headless or embedded use.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
