use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portal role. Selects the navigation set and which report queries apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

/// Authenticated user's profile snapshot.
///
/// Passed explicitly to the upload workflow (no ambient session state). The
/// patient fields are each optional; the report-creation service decides what
/// it requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub registration_date: Option<DateTime<Utc>>,
}

/// Patient detail snapshot attached to a report at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDetails {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub registration_date: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Snapshot the patient-facing fields for attachment to a new report.
    pub fn patient_details(&self) -> PatientDetails {
        PatientDetails {
            age: self.age,
            gender: self.gender.clone(),
            contact_number: self.contact_number.clone(),
            email: Some(self.email.clone()),
            registration_date: self.registration_date,
        }
    }
}
