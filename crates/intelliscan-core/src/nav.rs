//! Navigation routes and role-based link tables.
//!
//! Each role selects a static configuration table of links; no runtime
//! inspection beyond the `Role` tag.

use uuid::Uuid;

use crate::models::Role;

/// One sidebar navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

const PATIENT_LINKS: &[NavLink] = &[
    NavLink {
        name: "Dashboard",
        path: "/patient/dashboard",
    },
    NavLink {
        name: "Upload Scan",
        path: "/patient/upload",
    },
    NavLink {
        name: "Profile",
        path: "/patient/profile",
    },
];

const DOCTOR_LINKS: &[NavLink] = &[
    NavLink {
        name: "Dashboard",
        path: "/doctor/dashboard",
    },
    NavLink {
        name: "Patient Reports",
        path: "/doctor/reports",
    },
];

impl Role {
    pub fn navigation_links(&self) -> &'static [NavLink] {
        match self {
            Role::Patient => PATIENT_LINKS,
            Role::Doctor => DOCTOR_LINKS,
        }
    }

    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patient/dashboard",
            Role::Doctor => "/doctor/dashboard",
        }
    }
}

/// A concrete destination the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    PatientDashboard,
    PatientUpload,
    PatientReport(Uuid),
    DoctorDashboard,
    DoctorReports,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::PatientDashboard => "/patient/dashboard".to_string(),
            Route::PatientUpload => "/patient/upload".to_string(),
            Route::PatientReport(id) => format!("/patient/reports/{}", id),
            Route::DoctorDashboard => "/doctor/dashboard".to_string(),
            Route::DoctorReports => "/doctor/reports".to_string(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_selects_static_link_table() {
        let patient = Role::Patient.navigation_links();
        assert_eq!(patient.len(), 3);
        assert_eq!(patient[1].path, "/patient/upload");

        let doctor = Role::Doctor.navigation_links();
        assert_eq!(doctor.len(), 2);
        assert_eq!(doctor[1].name, "Patient Reports");
    }

    #[test]
    fn patient_report_route_embeds_id() {
        let id = Uuid::parse_str("6f7a1a2e-6f51-4b7e-9f2a-0c4d1e8b9a01").unwrap();
        assert_eq!(
            Route::PatientReport(id).path(),
            "/patient/reports/6f7a1a2e-6f51-4b7e-9f2a-0c4d1e8b9a01"
        );
    }

    #[test]
    fn home_path_follows_role() {
        assert_eq!(Role::Patient.home_path(), "/patient/dashboard");
        assert_eq!(Role::Doctor.home_path(), "/doctor/dashboard");
    }
}
