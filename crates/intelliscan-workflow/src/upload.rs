//! Upload orchestration
//!
//! One `UploadWorkflow` instance covers one user-facing attempt to upload and
//! analyze a single scan, from selection through completion or failure. The
//! instance exclusively owns its state bundle (file, preview, upload state,
//! progress); collaborators are injected, and the authenticated user's profile
//! snapshot is an explicit input rather than ambient state.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use intelliscan_core::models::{CreateReportRequest, Report, ScanFile, UserProfile};
use intelliscan_core::validation::validate_scan_file;
use intelliscan_core::{AppError, ErrorMetadata, Route};

use crate::collaborators::{Navigator, Notifier, ReportStore, ScanAnalyzer};
use crate::progress::ProgressSimulator;

/// Shown when a failure carries no message of its own.
pub const UPLOAD_FAILURE_FALLBACK: &str =
    "Failed to upload and analyze the scan. Please try again.";

const UPLOAD_SUCCESS_MESSAGE: &str = "MRI scan uploaded and analyzed successfully";

/// Two-tier failure-to-message mapping: the error's own user-facing message
/// when it has one, otherwise the fixed fallback.
pub fn failure_message(err: &AppError) -> String {
    let message = err.client_message();
    if message.trim().is_empty() {
        UPLOAD_FAILURE_FALLBACK.to_string()
    } else {
        message
    }
}

/// Workflow tunables. Defaults match the production client.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Interval between synthetic progress increments.
    pub progress_tick: Duration,
    /// Percentage added per tick.
    pub progress_step: u8,
    /// Ceiling the simulator holds at until the network call settles.
    pub progress_hold: u8,
    /// Pause after completion before navigating to the report, so the
    /// completed state registers visually.
    pub redirect_delay: Duration,
    /// Maximum accepted scan size in bytes.
    pub max_scan_size_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            progress_tick: Duration::from_millis(300),
            progress_step: 10,
            progress_hold: 90,
            redirect_delay: Duration::from_millis(1500),
            max_scan_size_bytes: intelliscan_core::validation::MAX_SCAN_SIZE_BYTES,
        }
    }
}

/// Lifecycle of one upload attempt. Exactly one state is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    FileSelected,
    Uploading,
    Complete,
    Failed,
}

pub struct UploadWorkflow {
    config: UploadConfig,
    state: UploadState,
    scan: Option<ScanFile>,
    preview_tx: watch::Sender<Option<String>>,
    preview_task: Option<JoinHandle<()>>,
    progress: ProgressSimulator,
    analyzer: Arc<dyn ScanAnalyzer>,
    reports: Arc<dyn ReportStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for UploadWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadWorkflow")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("scan", &self.scan)
            .field("preview_task", &self.preview_task)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl UploadWorkflow {
    pub fn new(
        analyzer: Arc<dyn ScanAnalyzer>,
        reports: Arc<dyn ReportStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_config(UploadConfig::default(), analyzer, reports, navigator, notifier)
    }

    pub fn with_config(
        config: UploadConfig,
        analyzer: Arc<dyn ScanAnalyzer>,
        reports: Arc<dyn ReportStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let progress = ProgressSimulator::new(
            config.progress_tick,
            config.progress_step,
            config.progress_hold,
        );
        let (preview_tx, _) = watch::channel(None);
        Self {
            config,
            state: UploadState::Idle,
            scan: None,
            preview_tx,
            preview_task: None,
            progress,
            analyzer,
            reports,
            navigator,
            notifier,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn selected_scan(&self) -> Option<&ScanFile> {
        self.scan.as_ref()
    }

    pub fn progress_value(&self) -> u8 {
        self.progress.value()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// The derived data-URL preview, once its decode has finished.
    pub fn preview(&self) -> Option<String> {
        self.preview_tx.borrow().clone()
    }

    pub fn subscribe_preview(&self) -> watch::Receiver<Option<String>> {
        self.preview_tx.subscribe()
    }

    /// Accept a file from the picker or a drop event.
    ///
    /// Rejection (wrong media type, oversized) surfaces a warning through the
    /// notifier and leaves all state unchanged. Acceptance replaces any
    /// previous selection and kicks off the preview decode asynchronously;
    /// the preview may lag acceptance.
    pub fn select_file(&mut self, scan: ScanFile) -> Result<(), AppError> {
        if self.state == UploadState::Uploading {
            tracing::warn!("file selection ignored while an upload is in flight");
            return Err(AppError::InvalidInput(
                "An upload is already in progress".to_string(),
            ));
        }

        if let Err(err) = validate_scan_file(
            scan.content_type(),
            scan.size(),
            self.config.max_scan_size_bytes,
        ) {
            self.notifier.error(&err.client_message());
            return Err(err);
        }

        // A fresh selection starts a fresh attempt: stale progress from a
        // previous run must not linger.
        self.progress.cancel();
        self.clear_preview();
        let tx = self.preview_tx.clone();
        let preview_scan = scan.clone();
        self.preview_task = Some(tokio::spawn(async move {
            tx.send_replace(Some(preview_scan.data_url()));
        }));

        tracing::debug!(
            file = scan.file_name(),
            size = scan.size(),
            "scan file selected"
        );
        self.scan = Some(scan);
        self.state = UploadState::FileSelected;
        Ok(())
    }

    /// Run the upload: classification call, report creation, then navigation
    /// to the new report after the redirect delay.
    ///
    /// A guarded no-op (`Ok(None)`) when no file is selected or no user is
    /// present; the triggering UI should already prevent that case. On any
    /// failure the progress resets, the state becomes `Failed`, the failure
    /// message is surfaced, and the selected file is retained for retry.
    #[tracing::instrument(skip(self, user), fields(patient = ?user.map(|u| u.id)))]
    pub async fn upload(&mut self, user: Option<&UserProfile>) -> Result<Option<Report>, AppError> {
        let (Some(scan), Some(user)) = (self.scan.clone(), user) else {
            tracing::debug!("upload invoked without a file or user; nothing to do");
            return Ok(None);
        };

        self.state = UploadState::Uploading;
        self.progress.start();

        match self.run_upload(&scan, user).await {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                self.progress.cancel();
                self.state = UploadState::Failed;
                let message = failure_message(&err);
                tracing::warn!(error = %err.detailed_message(), "upload failed");
                self.notifier.error(&message);
                Err(err)
            }
        }
    }

    async fn run_upload(&mut self, scan: &ScanFile, user: &UserProfile) -> Result<Report, AppError> {
        let analysis = self.analyzer.analyze_scan(scan).await?;

        self.progress.complete();
        self.state = UploadState::Complete;
        tracing::info!(label = %analysis.classification.label, "scan analyzed");

        let request = CreateReportRequest {
            patient_id: user.id,
            patient_name: user.name.clone(),
            patient_details: user.patient_details(),
            classification: analysis.classification,
            mask_image_url: analysis.segmentation_mask_url,
        };
        let report = self.reports.create_report(request).await?;

        self.notifier.success(UPLOAD_SUCCESS_MESSAGE);

        tokio::time::sleep(self.config.redirect_delay).await;
        self.navigator.navigate_to(Route::PatientReport(report.id));
        Ok(report)
    }

    /// Return to `Idle`: cancel the simulator and any in-flight preview
    /// decode, clear the file and preview, reset progress to 0. Idempotent.
    pub fn reset(&mut self) {
        self.progress.cancel();
        self.clear_preview();
        self.scan = None;
        self.state = UploadState::Idle;
    }

    fn clear_preview(&mut self) {
        if let Some(handle) = self.preview_task.take() {
            handle.abort();
        }
        self.preview_tx.send_replace(None);
    }
}

impl Drop for UploadWorkflow {
    fn drop(&mut self) {
        // The simulator aborts its own ticker on drop; the preview decode
        // must not outlive the workflow either.
        if let Some(handle) = self.preview_task.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_the_errors_own_message() {
        let err = AppError::Service {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(failure_message(&err), "service unavailable");
    }

    #[test]
    fn failure_message_falls_back_when_empty() {
        let err = AppError::Service {
            status: 500,
            message: String::new(),
        };
        assert_eq!(failure_message(&err), UPLOAD_FAILURE_FALLBACK);

        let err = AppError::InvalidInput("   ".to_string());
        assert_eq!(failure_message(&err), UPLOAD_FAILURE_FALLBACK);
    }

    #[test]
    fn default_config_matches_the_production_client() {
        let config = UploadConfig::default();
        assert_eq!(config.progress_tick, Duration::from_millis(300));
        assert_eq!(config.progress_step, 10);
        assert_eq!(config.progress_hold, 90);
        assert_eq!(config.redirect_delay, Duration::from_millis(1500));
        assert_eq!(config.max_scan_size_bytes, 5 * 1024 * 1024);
    }
}
