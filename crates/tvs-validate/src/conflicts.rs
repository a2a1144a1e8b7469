//! Unavoidable-conflict analysis: visit windows in which every candidate
//! day is non-working.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tvs_calendar::{OverrideMap, classify_date};
use tvs_model::PlannedVisit;

/// A non-working day found inside a flagged window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDay {
    pub date: NaiveDate,
    pub day_label: String,
}

/// One flagged visit with the non-working days of its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetail {
    pub visit_number: u32,
    pub label: String,
    pub dates: Vec<ConflictDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub unavoidable_count: usize,
    pub details: Vec<ConflictDetail>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        self.unavoidable_count > 0
    }
}

/// Flag every visit whose window offers no working day.
///
/// A zero-window visit enumerates its single base date; it has no choice
/// regardless, so the flag is informational for those.
pub fn analyze_unavoidable_conflicts(
    plan: &[PlannedVisit],
    overrides: &OverrideMap,
) -> ConflictReport {
    let mut report = ConflictReport::default();
    for visit in plan {
        let days: Vec<(NaiveDate, bool, String)> = window_days(visit)
            .map(|date| {
                let day = classify_date(date, overrides);
                (date, day.is_non_working(), day.label())
            })
            .collect();
        if days.is_empty() || !days.iter().all(|(_, non_working, _)| *non_working) {
            continue;
        }
        report.unavoidable_count += 1;
        report.details.push(ConflictDetail {
            visit_number: visit.visit_number,
            label: visit.label.clone(),
            dates: days
                .into_iter()
                .map(|(date, _, day_label)| ConflictDay { date, day_label })
                .collect(),
        });
    }
    report
}

fn window_days(visit: &PlannedVisit) -> impl Iterator<Item = NaiveDate> {
    visit
        .earliest_date
        .iter_days()
        .take_while(move |date| *date <= visit.latest_date)
}
