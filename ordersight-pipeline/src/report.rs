//! Dashboard report assembly.
//!
//! Runs every analysis section against one dataset and folds each result
//! into a [`SectionOutcome`]. A section missing its dimension column is
//! skipped with a message naming the column; any other failure is recorded
//! without aborting the rest of the report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dataset::{Dataset, DatasetError};
use crate::sections::client_segmentation::{self, ClientSegmentation};
use crate::sections::client_tiers::{self, ClientTiers};
use crate::sections::employees::{self, EmployeePerformance};
use crate::sections::kpi::{self, KpiSummary};
use crate::sections::temporal::{self, TemporalAnalysis};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    Completed { data: T },
    Skipped { reason: String },
    Failed { reason: String },
}

impl<T> SectionOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            SectionOutcome::Completed { data } => Some(data),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SectionOutcome::Completed { .. })
    }

    fn from_result(name: &str, result: Result<T, DatasetError>) -> Self {
        match result {
            Ok(data) => SectionOutcome::Completed { data },
            Err(DatasetError::MissingColumn { column }) => {
                let reason = format!(
                    "column '{}' not found; add it to the source extract to enable this section",
                    column.header_name()
                );
                log::warn!("section {name} skipped: {reason}");
                SectionOutcome::Skipped { reason }
            }
            Err(err) => {
                let reason = err.to_string();
                log::warn!("section {name} failed: {reason}");
                SectionOutcome::Failed { reason }
            }
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub rows_analyzed: usize,
    pub kpi: KpiSummary,
    pub client_segmentation: SectionOutcome<ClientSegmentation>,
    pub client_tiers: SectionOutcome<ClientTiers>,
    pub temporal: SectionOutcome<TemporalAnalysis>,
    pub employees: SectionOutcome<EmployeePerformance>,
}

/// Build the full report. The KPI section always runs; the others degrade
/// per [`SectionOutcome`] based on which columns the dataset carries.
pub fn run_all(dataset: &Dataset, top_n: usize) -> DashboardReport {
    DashboardReport {
        generated_at: Utc::now(),
        rows_analyzed: dataset.len(),
        kpi: kpi::run(dataset),
        client_segmentation: SectionOutcome::from_result(
            "client-segmentation",
            client_segmentation::run(dataset, top_n),
        ),
        client_tiers: SectionOutcome::from_result("client-tiers", client_tiers::run(dataset, top_n)),
        temporal: SectionOutcome::from_result("temporal", temporal::run(dataset, top_n)),
        employees: SectionOutcome::from_result("employees", employees::run(dataset)),
    }
}
