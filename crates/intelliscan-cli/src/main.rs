//! IntelliScan CLI: command-line client for the IntelliScan API.
//!
//! Set INTELLISCAN_API_KEY and INTELLISCAN_API_URL. Uses X-API-Key auth.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use intelliscan_api_client::ApiClient;
use intelliscan_cli::{format_file_size, init_tracing};
use intelliscan_core::models::{
    ReportFilter, ReportStatus, Role, ScanFile, StatusFilter, UserProfile,
};
use intelliscan_core::Route;
use intelliscan_workflow::{Navigator, Notifier, UploadWorkflow};

#[derive(Parser)]
#[command(name = "intelliscan", about = "IntelliScan API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an MRI scan, run the analysis, and create a report
    Upload {
        /// Path to the scan image
        file: PathBuf,
        /// Patient UUID (defaults to INTELLISCAN_PATIENT_ID)
        #[arg(long)]
        patient_id: Option<Uuid>,
        /// Patient display name (defaults to INTELLISCAN_PATIENT_NAME)
        #[arg(long)]
        patient_name: Option<String>,
        /// Patient email
        #[arg(long)]
        email: Option<String>,
        /// Patient age
        #[arg(long)]
        age: Option<u32>,
        /// Patient gender
        #[arg(long)]
        gender: Option<String>,
        /// Patient contact number
        #[arg(long)]
        contact_number: Option<String>,
    },
    /// List all reports (doctor view) with optional in-memory filters
    Reports {
        /// Case-insensitive search over patient name, tumor type, or id
        #[arg(long)]
        search: Option<String>,
        /// Filter by review status: pending, reviewed, or all
        #[arg(long, default_value = "all")]
        status: String,
        /// Filter by exact tumor type
        #[arg(long)]
        tumor_type: Option<String>,
    },
    /// List one patient's reports
    PatientReports {
        /// Patient UUID
        patient_id: Uuid,
    },
    /// Get a single report by id
    Report {
        /// Report UUID
        id: Uuid,
    },
    /// Mark a report as reviewed
    Review {
        /// Report UUID
        id: Uuid,
    },
}

/// Surfaces workflow toasts on the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Prints the destination route instead of routing a browser.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, route: Route) {
        println!("View the report at {}", route.path());
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn parse_status_filter(status: &str) -> anyhow::Result<StatusFilter> {
    match status {
        "all" => Ok(StatusFilter::All),
        "pending" => Ok(StatusFilter::Only(ReportStatus::Pending)),
        "reviewed" => Ok(StatusFilter::Only(ReportStatus::Reviewed)),
        other => anyhow::bail!("Unknown status '{}': use pending, reviewed, or all", other),
    }
}

/// Assemble the patient profile snapshot from flags and environment. The
/// workflow takes this as an explicit input; there is no ambient session.
fn patient_profile(
    patient_id: Option<Uuid>,
    patient_name: Option<String>,
    email: Option<String>,
    age: Option<u32>,
    gender: Option<String>,
    contact_number: Option<String>,
) -> anyhow::Result<UserProfile> {
    let id = patient_id
        .or_else(|| {
            std::env::var("INTELLISCAN_PATIENT_ID")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .context("Missing patient id. Pass --patient-id or set INTELLISCAN_PATIENT_ID")?;
    let name = patient_name
        .or_else(|| std::env::var("INTELLISCAN_PATIENT_NAME").ok())
        .context("Missing patient name. Pass --patient-name or set INTELLISCAN_PATIENT_NAME")?;
    let email = email
        .or_else(|| std::env::var("INTELLISCAN_PATIENT_EMAIL").ok())
        .unwrap_or_default();

    Ok(UserProfile {
        id,
        name,
        email,
        role: Role::Patient,
        age,
        gender,
        contact_number,
        registration_date: None,
    })
}

async fn run_upload(client: ApiClient, file: PathBuf, user: UserProfile) -> anyhow::Result<()> {
    let client = Arc::new(client);
    let mut workflow = UploadWorkflow::new(
        client.clone(),
        client,
        Arc::new(TerminalNavigator),
        Arc::new(TerminalNotifier),
    );

    let scan = ScanFile::from_path(&file)?;
    println!(
        "{} ({}, {})",
        scan.file_name(),
        format_file_size(scan.size()),
        scan.content_type()
    );
    workflow.select_file(scan)?;

    // Render the synthetic progress while the analysis call is in flight.
    let mut progress_rx = workflow.subscribe_progress();
    let printer = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let pct = *progress_rx.borrow_and_update();
            eprint!("\rAnalyzing MRI scan... {}%", pct);
            let _ = std::io::stderr().flush();
            if pct >= 100 {
                break;
            }
        }
        eprintln!();
    });

    let result = workflow.upload(Some(&user)).await;
    printer.abort();

    match result? {
        Some(report) => {
            print_json(&report)?;
            Ok(())
        }
        None => anyhow::bail!("Nothing to upload"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to create API client. Set INTELLISCAN_API_KEY and INTELLISCAN_API_URL")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            patient_id,
            patient_name,
            email,
            age,
            gender,
            contact_number,
        } => {
            let user = patient_profile(patient_id, patient_name, email, age, gender, contact_number)?;
            run_upload(client, file, user).await?;
        }
        Commands::Reports {
            search,
            status,
            tumor_type,
        } => {
            let filter = ReportFilter {
                search,
                status: parse_status_filter(&status)?,
                tumor_type,
            };
            let reports = client.get_doctor_reports().await?;
            print_json(&filter.apply(&reports))?;
        }
        Commands::PatientReports { patient_id } => {
            let reports = client.get_patient_reports(patient_id).await?;
            print_json(&reports)?;
        }
        Commands::Report { id } => {
            let report = client.get_report(id).await?;
            print_json(&report)?;
        }
        Commands::Review { id } => {
            let report = client.mark_report_reviewed(id).await?;
            print_json(&report)?;
        }
    }

    Ok(())
}
