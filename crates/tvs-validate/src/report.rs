//! JSON report payload for cohort runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::cohort::CohortReport;
use crate::conflicts::ConflictReport;
use tvs_model::{PlannedVisit, Reminder, Violation};

const REPORT_SCHEMA: &str = "trial-visit-scheduler.cohort-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct CohortReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_date: Option<NaiveDate>,
    pub subject_count: usize,
    pub violation_count: usize,
    pub reminder_count: usize,
    pub unavoidable_count: usize,
    pub subjects: Vec<SubjectSummaryJson>,
    pub errors: Vec<SubjectErrorJson>,
}

#[derive(Debug, Serialize)]
pub struct SubjectSummaryJson {
    pub subject: String,
    pub plan: Vec<PlannedVisit>,
    pub conflicts: ConflictReport,
    pub violations: Vec<Violation>,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Serialize)]
pub struct SubjectErrorJson {
    pub subject: String,
    pub error: String,
}

pub fn build_payload(report: &CohortReport, check_date: Option<NaiveDate>) -> CohortReportPayload {
    CohortReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        check_date,
        subject_count: report.outcomes.len() + report.errors.len(),
        violation_count: report
            .outcomes
            .iter()
            .map(|outcome| outcome.violations.len())
            .sum(),
        reminder_count: report
            .outcomes
            .iter()
            .map(|outcome| outcome.reminders.len())
            .sum(),
        unavoidable_count: report.unavoidable_count(),
        subjects: report
            .outcomes
            .iter()
            .map(|outcome| SubjectSummaryJson {
                subject: outcome.key.to_string(),
                plan: outcome.plan.clone(),
                conflicts: outcome.conflicts.clone(),
                violations: outcome.violations.clone(),
                reminders: outcome.reminders.clone(),
            })
            .collect(),
        errors: report
            .errors
            .iter()
            .map(|failed| SubjectErrorJson {
                subject: failed.key.to_string(),
                error: failed.error.to_string(),
            })
            .collect(),
    }
}

/// Serialize the cohort report to pretty JSON at `path`.
pub fn write_cohort_report_json(
    path: &Path,
    report: &CohortReport,
    check_date: Option<NaiveDate>,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    let payload = build_payload(report, check_date);
    let json = serde_json::to_string_pretty(&payload).context("serialize cohort report")?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write report {}", path.display()))?;
    Ok(path.to_path_buf())
}
