use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One slot of a derived visit plan.
///
/// Never persisted; recomputed on every evaluation. Invariant:
/// `earliest_date <= base_date <= latest_date`, and visit 1 carries the
/// enrollment date in all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedVisit {
    /// 1-based visit number.
    pub visit_number: u32,
    pub label: String,
    pub base_date: NaiveDate,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
}

impl PlannedVisit {
    /// Days of tolerance on each side of the base date.
    pub fn window_days(&self) -> i64 {
        (self.latest_date - self.base_date).num_days()
    }
}

/// A recorded actual visit, matched to plan slots by visit number only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub project: String,
    pub center: String,
    pub subject_name: String,
    pub visit_number: u32,
    pub visit_date: NaiveDate,
}

/// A user correction for a single calendar date. Takes absolute precedence
/// over the built-in holiday calendar and the weekend rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayOverride {
    pub date: NaiveDate,
    pub is_holiday: bool,
    /// Display name when `is_holiday` is true; a blank name renders the
    /// generic custom-holiday label.
    #[serde(default)]
    pub holiday_name: String,
}
