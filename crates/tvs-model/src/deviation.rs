use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recorded visit dated after the latest permissible date of its plan slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub project: String,
    pub center: String,
    pub subject_name: String,
    pub visit_number: u32,
    pub actual_date: NaiveDate,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    /// Whole days past the latest permissible date, always >= 1.
    pub overdue_days: i64,
}

/// A planned visit with no recorded actual visit whose latest permissible
/// date has already passed the reference check date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub project: String,
    pub center: String,
    pub subject_name: String,
    pub visit_number: u32,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub overdue_days: i64,
}

/// Common accessors for deviation rows so display lists can share one
/// ordering rule (overdue days descending, visit number ascending).
pub trait Overdue {
    fn overdue_days(&self) -> i64;
    fn visit_number(&self) -> u32;
}

impl Overdue for Violation {
    fn overdue_days(&self) -> i64 {
        self.overdue_days
    }

    fn visit_number(&self) -> u32 {
        self.visit_number
    }
}

impl Overdue for Reminder {
    fn overdue_days(&self) -> i64 {
        self.overdue_days
    }

    fn visit_number(&self) -> u32 {
        self.visit_number
    }
}
