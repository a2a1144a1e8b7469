//! Cohort-wide evaluation with per-subject error isolation.
//!
//! Each subject's computation is independent: a malformed spec captures a
//! typed error for that subject and the loop moves on, so a batch always
//! yields the results that could be computed plus the errors that could
//! not.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use tvs_calendar::OverrideMap;
use tvs_core::compute_planned_visits;
use tvs_model::{
    PlannedVisit, Reminder, ScheduleError, Subject, SubjectKey, Violation, VisitRecord,
};

use crate::conflicts::{ConflictReport, analyze_unavoidable_conflicts};
use crate::deviations::{detect_pending_reminders, detect_violations, sort_by_overdue};

/// Everything derived for one subject in a cohort run.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectOutcome {
    pub key: SubjectKey,
    pub plan: Vec<PlannedVisit>,
    pub conflicts: ConflictReport,
    pub violations: Vec<Violation>,
    pub reminders: Vec<Reminder>,
}

/// A subject whose plan could not be computed.
#[derive(Debug, Clone)]
pub struct SubjectError {
    pub key: SubjectKey,
    pub error: ScheduleError,
}

/// Cohort results: outcomes in subject input order, errors alongside.
#[derive(Debug, Clone, Default)]
pub struct CohortReport {
    pub outcomes: Vec<SubjectOutcome>,
    pub errors: Vec<SubjectError>,
}

impl CohortReport {
    /// All violations across the cohort in display order.
    pub fn all_violations(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .outcomes
            .iter()
            .flat_map(|outcome| outcome.violations.iter().cloned())
            .collect();
        sort_by_overdue(&mut violations);
        violations
    }

    /// All reminders across the cohort in display order.
    pub fn all_reminders(&self) -> Vec<Reminder> {
        let mut reminders: Vec<Reminder> = self
            .outcomes
            .iter()
            .flat_map(|outcome| outcome.reminders.iter().cloned())
            .collect();
        sort_by_overdue(&mut reminders);
        reminders
    }

    pub fn unavoidable_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| outcome.conflicts.unavoidable_count)
            .sum()
    }
}

/// Evaluate every subject: plan, holiday conflicts, violations, and (when a
/// check date is given) pending reminders.
pub fn evaluate_cohort(
    subjects: &[Subject],
    records_by_subject: &BTreeMap<SubjectKey, Vec<VisitRecord>>,
    overrides: &OverrideMap,
    check_date: Option<NaiveDate>,
) -> CohortReport {
    let mut report = CohortReport::default();
    for subject in subjects {
        let key = subject.key();
        let plan = match compute_planned_visits(subject) {
            Ok(plan) => plan,
            Err(error) => {
                warn!(subject = %key, %error, "skipping subject");
                report.errors.push(SubjectError { key, error });
                continue;
            }
        };
        let no_records = Vec::new();
        let records = records_by_subject.get(&key).unwrap_or(&no_records);
        let conflicts = analyze_unavoidable_conflicts(&plan, overrides);
        let violations = detect_violations(&key, &plan, records);
        let reminders = check_date
            .map(|date| detect_pending_reminders(&key, &plan, records, date))
            .unwrap_or_default();
        debug!(
            subject = %key,
            violations = violations.len(),
            reminders = reminders.len(),
            conflicts = conflicts.unavoidable_count,
            "evaluated subject"
        );
        report.outcomes.push(SubjectOutcome {
            key,
            plan,
            conflicts,
            violations,
            reminders,
        });
    }
    report
}

/// One planned visit whose window intersects a queried date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub key: SubjectKey,
    pub visit_number: u32,
    pub label: String,
    pub base_date: NaiveDate,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
}

/// List every planned visit whose `[earliest, latest]` window intersects
/// `[from, to]`, ordered by base date, then subject, then visit number.
pub fn schedule_in_range(
    outcomes: &[SubjectOutcome],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<ScheduleEntry> {
    let mut entries = Vec::new();
    for outcome in outcomes {
        for visit in &outcome.plan {
            if visit.earliest_date <= to && visit.latest_date >= from {
                entries.push(ScheduleEntry {
                    key: outcome.key.clone(),
                    visit_number: visit.visit_number,
                    label: visit.label.clone(),
                    base_date: visit.base_date,
                    earliest_date: visit.earliest_date,
                    latest_date: visit.latest_date,
                });
            }
        }
    }
    entries.sort_by(|a, b| {
        a.base_date
            .cmp(&b.base_date)
            .then_with(|| a.key.cmp(&b.key))
            .then(a.visit_number.cmp(&b.visit_number))
    });
    entries
}
