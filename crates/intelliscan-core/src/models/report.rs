use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::PatientDetails;

/// Output of the external classification service: a tumor label plus an
/// optional class probability. The workflow only consumes the label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Full classification-service response for one uploaded scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanAnalysis {
    pub classification: ClassificationResult,
    pub segmentation_mask_url: String,
}

/// Review status of a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
}

/// A stored report pairing a patient's scan classification with identifying
/// metadata. Created once per successful upload; the server assigns the id
/// and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_details: PatientDetails,
    pub classification: ClassificationResult,
    pub mask_image_url: String,
    pub created_at: DateTime<Utc>,
    pub status: ReportStatus,
}

/// Request body for report creation. Built by the upload workflow from the
/// user profile snapshot and the classification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_details: PatientDetails,
    pub classification: ClassificationResult,
    pub mask_image_url: String,
}

/// Status filter for report lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

/// In-memory filter over a fetched report list, as used by the doctor's
/// report screen. All criteria compose with AND.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Case-insensitive substring match against patient name, tumor label,
    /// or report id.
    pub search: Option<String>,
    pub status: StatusFilter,
    /// Exact tumor label match.
    pub tumor_type: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            let hit = report.patient_name.to_lowercase().contains(&term)
                || report.classification.label.to_lowercase().contains(&term)
                || report.id.to_string().to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let StatusFilter::Only(status) = self.status {
            if report.status != status {
                return false;
            }
        }

        if let Some(ref tumor_type) = self.tumor_type {
            if &report.classification.label != tumor_type {
                return false;
            }
        }

        true
    }

    /// Apply the filter, preserving the input order.
    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct tumor labels present in a report list, in first-seen order.
/// Feeds the type-filter dropdown.
pub fn tumor_types(reports: &[Report]) -> Vec<&str> {
    let mut seen = Vec::new();
    for report in reports {
        let label = report.classification.label.as_str();
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, label: &str, status: ReportStatus) -> Report {
        Report {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            patient_name: name.to_string(),
            patient_details: PatientDetails {
                age: None,
                gender: None,
                contact_number: None,
                email: None,
                registration_date: None,
            },
            classification: ClassificationResult {
                label: label.to_string(),
                confidence: Some(0.92),
            },
            mask_image_url: "https://cdn.example.com/masks/1.png".to_string(),
            created_at: Utc::now(),
            status,
        }
    }

    #[test]
    fn search_matches_name_label_and_id_case_insensitively() {
        let r = report("Alice Smith", "Glioma", ReportStatus::Pending);

        let by_name = ReportFilter {
            search: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(by_name.matches(&r));

        let by_label = ReportFilter {
            search: Some("GLIO".to_string()),
            ..Default::default()
        };
        assert!(by_label.matches(&r));

        let by_id = ReportFilter {
            search: Some(r.id.to_string()[..8].to_string()),
            ..Default::default()
        };
        assert!(by_id.matches(&r));

        let miss = ReportFilter {
            search: Some("bob".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&r));
    }

    #[test]
    fn filters_compose_with_and() {
        let reports = vec![
            report("Alice Smith", "Glioma", ReportStatus::Pending),
            report("Alice Jones", "Meningioma", ReportStatus::Pending),
            report("Alice Brown", "Glioma", ReportStatus::Reviewed),
        ];

        let filter = ReportFilter {
            search: Some("alice".to_string()),
            status: StatusFilter::Only(ReportStatus::Pending),
            tumor_type: Some("Glioma".to_string()),
        };

        let matched = filter.apply(&reports);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].patient_name, "Alice Smith");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let reports = vec![
            report("A", "Glioma", ReportStatus::Pending),
            report("B", "Pituitary", ReportStatus::Reviewed),
        ];
        assert_eq!(ReportFilter::default().apply(&reports).len(), 2);
    }

    #[test]
    fn tumor_types_are_distinct_in_first_seen_order() {
        let reports = vec![
            report("A", "Glioma", ReportStatus::Pending),
            report("B", "Meningioma", ReportStatus::Pending),
            report("C", "Glioma", ReportStatus::Reviewed),
            report("D", "No Tumor", ReportStatus::Pending),
        ];
        assert_eq!(tumor_types(&reports), vec!["Glioma", "Meningioma", "No Tumor"]);
    }

    #[test]
    fn report_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&ReportStatus::Reviewed).unwrap(),
            "\"reviewed\""
        );
    }
}
