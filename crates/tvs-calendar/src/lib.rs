//! Holiday/workday classification for single calendar dates.
//!
//! Resolution order, first match wins: user override, built-in holiday
//! adjustment table, weekend, ordinary working day. Classification never
//! fails; a date the table knows nothing about is an ordinary day.

pub mod table;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use tvs_model::HolidayOverride;

pub use table::{HOLIDAY_NAMES, HolidayEntry, HolidayTable, holiday_table};

/// Label for the override-marked holiday when the operator left the name blank.
pub const CUSTOM_HOLIDAY_LABEL: &str = "custom holiday";

/// Label for an ordinary working day.
pub const NON_HOLIDAY_LABEL: &str = "non-holiday";

/// How a single calendar date classifies for scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayClassification {
    /// User override marked the date a holiday.
    Override { name: Option<String> },
    /// Built-in calendar rest day.
    Holiday { name: &'static str },
    /// Weekend reclassified as a working day to compensate for a holiday.
    /// Renders the holiday name but counts as a working day.
    MakeUpWorkday { name: &'static str },
    Weekend { day: Weekday },
    Ordinary,
}

impl DayClassification {
    /// The display label, matching the calendar screen wording.
    pub fn label(&self) -> String {
        match self {
            DayClassification::Override { name } => match name {
                Some(name) => name.clone(),
                None => CUSTOM_HOLIDAY_LABEL.to_string(),
            },
            DayClassification::Holiday { name } => (*name).to_string(),
            DayClassification::MakeUpWorkday { name } => format!("{name} make-up workday"),
            DayClassification::Weekend { day } => match day {
                Weekday::Sat => "Saturday".to_string(),
                _ => "Sunday".to_string(),
            },
            DayClassification::Ordinary => NON_HOLIDAY_LABEL.to_string(),
        }
    }

    /// True when no visit should be scheduled on the day. Make-up workdays
    /// render a holiday name but are working days.
    pub fn is_non_working(&self) -> bool {
        matches!(
            self,
            DayClassification::Override { .. }
                | DayClassification::Holiday { .. }
                | DayClassification::Weekend { .. }
        )
    }
}

/// User overrides indexed by date. When the same date appears more than
/// once the last row wins, matching the order the store returns them in.
#[derive(Debug, Clone, Default)]
pub struct OverrideMap {
    entries: BTreeMap<NaiveDate, HolidayOverride>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_overrides(overrides: &[HolidayOverride]) -> Self {
        let mut entries = BTreeMap::new();
        for row in overrides {
            entries.insert(row.date, row.clone());
        }
        Self { entries }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HolidayOverride> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify a single date against the overrides and the built-in table.
pub fn classify_date(date: NaiveDate, overrides: &OverrideMap) -> DayClassification {
    if let Some(row) = overrides.get(date) {
        if !row.is_holiday {
            return DayClassification::Ordinary;
        }
        let name = row.holiday_name.trim();
        return DayClassification::Override {
            name: (!name.is_empty()).then(|| name.to_string()),
        };
    }

    if let Some(entry) = holiday_table().get(date) {
        return if entry.rest {
            DayClassification::Holiday { name: entry.name }
        } else {
            DayClassification::MakeUpWorkday { name: entry.name }
        };
    }

    match date.weekday() {
        day @ (Weekday::Sat | Weekday::Sun) => DayClassification::Weekend { day },
        _ => DayClassification::Ordinary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ordinary_weekday() {
        let day = classify_date(date(2024, 3, 13), &OverrideMap::new());
        assert_eq!(day, DayClassification::Ordinary);
        assert_eq!(day.label(), "non-holiday");
        assert!(!day.is_non_working());
    }

    #[test]
    fn weekend_labels() {
        let saturday = classify_date(date(2024, 3, 16), &OverrideMap::new());
        assert_eq!(saturday.label(), "Saturday");
        let sunday = classify_date(date(2024, 3, 17), &OverrideMap::new());
        assert_eq!(sunday.label(), "Sunday");
        assert!(sunday.is_non_working());
    }

    #[test]
    fn last_override_row_wins() {
        let rows = vec![
            HolidayOverride {
                date: date(2024, 3, 13),
                is_holiday: true,
                holiday_name: "Site closure".to_string(),
            },
            HolidayOverride {
                date: date(2024, 3, 13),
                is_holiday: false,
                holiday_name: String::new(),
            },
        ];
        let overrides = OverrideMap::from_overrides(&rows);
        assert_eq!(
            classify_date(date(2024, 3, 13), &overrides),
            DayClassification::Ordinary
        );
    }
}
