//! Domain methods for the IntelliScan API client.
//!
//! Request and response types live in `intelliscan_core::models`. This module
//! also wires the client into the upload workflow by implementing its
//! `ScanAnalyzer` and `ReportStore` collaborator traits.

use async_trait::async_trait;
use uuid::Uuid;

use intelliscan_core::models::{CreateReportRequest, Report, ScanAnalysis, ScanFile};
use intelliscan_core::AppError;
use intelliscan_workflow::{ReportStore, ScanAnalyzer};

use crate::{api_prefix, ApiClient};

impl ApiClient {
    /// Upload an MRI scan for classification and segmentation. The response
    /// is the only side-channel for the generated mask-image URL.
    #[tracing::instrument(skip(self, scan), fields(file = scan.file_name(), size = scan.size()))]
    pub async fn upload_mri_scan(&self, scan: &ScanFile) -> Result<ScanAnalysis, AppError> {
        let part = reqwest::multipart::Part::bytes(scan.bytes().to_vec())
            .file_name(scan.file_name().to_string())
            .mime_str(scan.content_type())
            .map_err(|e| AppError::InvalidInput(format!("Invalid media type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        self.post_multipart(&format!("{}/scans/analyze", api_prefix()), form)
            .await
    }

    /// Create a report from a completed analysis. The server assigns the id
    /// and creation timestamp.
    pub async fn create_report(&self, request: &CreateReportRequest) -> Result<Report, AppError> {
        self.post_json(&format!("{}/reports", api_prefix()), request)
            .await
    }

    /// Reports belonging to one patient.
    pub async fn get_patient_reports(&self, patient_id: Uuid) -> Result<Vec<Report>, AppError> {
        self.get(
            &format!("{}/patients/{}/reports", api_prefix(), patient_id),
            &[],
        )
        .await
    }

    /// All reports, for the doctor's review screen.
    pub async fn get_doctor_reports(&self) -> Result<Vec<Report>, AppError> {
        self.get(&format!("{}/reports", api_prefix()), &[]).await
    }

    /// A single report by id.
    pub async fn get_report(&self, report_id: Uuid) -> Result<Report, AppError> {
        self.get(&format!("{}/reports/{}", api_prefix(), report_id), &[])
            .await
    }

    /// Mark a report as reviewed by a doctor.
    pub async fn mark_report_reviewed(&self, report_id: Uuid) -> Result<Report, AppError> {
        self.post_json(
            &format!("{}/reports/{}/review", api_prefix(), report_id),
            &serde_json::json!({}),
        )
        .await
    }
}

#[async_trait]
impl ScanAnalyzer for ApiClient {
    async fn analyze_scan(&self, scan: &ScanFile) -> Result<ScanAnalysis, AppError> {
        self.upload_mri_scan(scan).await
    }
}

#[async_trait]
impl ReportStore for ApiClient {
    async fn create_report(&self, request: CreateReportRequest) -> Result<Report, AppError> {
        ApiClient::create_report(self, &request).await
    }
}
