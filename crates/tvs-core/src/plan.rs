//! Planned-visit derivation and display annotation.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tvs_calendar::{DayClassification, OverrideMap, classify_date};
use tvs_model::{PlannedVisit, Result, ScheduleError, SpecField, Subject};

use crate::label::visit_label;
use crate::spec::parse_interval_list;

/// Derive the full ordered visit plan for a subject.
///
/// Visit 1 is the enrollment visit and has no window; each later visit's
/// base date advances from the previous base by the matching frequency
/// value, with the window applied symmetrically around it. All arithmetic
/// is on civil dates: adding N days advances the date by exactly N
/// regardless of daylight-saving transitions.
pub fn compute_planned_visits(subject: &Subject) -> Result<Vec<PlannedVisit>> {
    compute_planned_visits_from(subject, subject.enrollment_date)
}

/// Same derivation anchored at a substitute enrollment date.
pub fn compute_planned_visits_from(
    subject: &Subject,
    enrollment_date: NaiveDate,
) -> Result<Vec<PlannedVisit>> {
    let intervals = subject.total_visits.saturating_sub(1) as usize;
    let frequencies = parse_interval_list(&subject.frequency_spec, intervals, SpecField::Frequency)
        .map_err(|source| ScheduleError::spec(SpecField::Frequency, source))?;
    let windows = parse_interval_list(&subject.window_spec, intervals, SpecField::Window)
        .map_err(|source| ScheduleError::spec(SpecField::Window, source))?;

    let rule = subject.label_rule.as_deref();
    let mut plan = Vec::with_capacity(subject.total_visits as usize);
    plan.push(PlannedVisit {
        visit_number: 1,
        label: visit_label(rule, 1),
        base_date: enrollment_date,
        earliest_date: enrollment_date,
        latest_date: enrollment_date,
    });

    let mut base_date = enrollment_date;
    for (index, (&frequency, &window)) in frequencies.iter().zip(windows.iter()).enumerate() {
        let visit_number = index as u32 + 2;
        base_date = add_days(base_date, frequency, visit_number)?;
        plan.push(PlannedVisit {
            visit_number,
            label: visit_label(rule, visit_number),
            base_date,
            earliest_date: sub_days(base_date, window, visit_number)?,
            latest_date: add_days(base_date, window, visit_number)?,
        });
    }

    debug!(
        subject = %subject.key(),
        visits = plan.len(),
        "computed visit plan"
    );
    Ok(plan)
}

fn add_days(date: NaiveDate, days: i64, visit_number: u32) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days as u64))
        .ok_or(ScheduleError::DateOverflow { visit_number })
}

fn sub_days(date: NaiveDate, days: i64, visit_number: u32) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(days as u64))
        .ok_or(ScheduleError::DateOverflow { visit_number })
}

/// Which of a visit's three dates a plan item annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanDateKind {
    Earliest,
    Base,
    Latest,
}

/// One display row of an annotated plan: a visit date tagged with its
/// holiday classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    pub visit_number: u32,
    pub label: String,
    pub kind: PlanDateKind,
    pub date: NaiveDate,
    pub day: DayClassification,
}

/// Expand a plan into display rows. Visits with a window contribute their
/// earliest, base, and latest dates; zero-window visits only the base date.
pub fn annotate_plan(plan: &[PlannedVisit], overrides: &OverrideMap) -> Vec<PlanItem> {
    let mut items = Vec::new();
    for visit in plan {
        let dates: Vec<(PlanDateKind, NaiveDate)> = if visit.window_days() == 0 {
            vec![(PlanDateKind::Base, visit.base_date)]
        } else {
            vec![
                (PlanDateKind::Earliest, visit.earliest_date),
                (PlanDateKind::Base, visit.base_date),
                (PlanDateKind::Latest, visit.latest_date),
            ]
        };
        for (kind, date) in dates {
            items.push(PlanItem {
                visit_number: visit.visit_number,
                label: visit.label.clone(),
                kind,
                date,
                day: classify_date(date, overrides),
            });
        }
    }
    items
}
