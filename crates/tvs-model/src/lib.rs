pub mod deviation;
pub mod error;
pub mod subject;
pub mod visit;

pub use deviation::{Overdue, Reminder, Violation};
pub use error::{Result, ScheduleError, SpecError, SpecField};
pub use subject::{Subject, SubjectKey};
pub use visit::{HolidayOverride, PlannedVisit, VisitRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn subject_serializes_dates_as_iso_strings() {
        let subject = Subject {
            project: "P01".to_string(),
            center: "C01".to_string(),
            name: "S001".to_string(),
            enrollment_date: date(2024, 1, 1),
            total_visits: 3,
            frequency_spec: "10,10".to_string(),
            window_spec: "2,3".to_string(),
            label_rule: None,
        };
        let json = serde_json::to_string(&subject).expect("serialize subject");
        assert!(json.contains("\"2024-01-01\""));
        let round: Subject = serde_json::from_str(&json).expect("deserialize subject");
        assert_eq!(round, subject);
    }

    #[test]
    fn subject_key_display() {
        let key = SubjectKey::new("P01", "C02", "S003");
        assert_eq!(key.to_string(), "P01/C02/S003");
    }

    #[test]
    fn planned_visit_window_days() {
        let visit = PlannedVisit {
            visit_number: 2,
            label: "Visit 2".to_string(),
            base_date: date(2024, 1, 11),
            earliest_date: date(2024, 1, 9),
            latest_date: date(2024, 1, 13),
        };
        assert_eq!(visit.window_days(), 2);
    }

    #[test]
    fn schedule_error_messages_name_the_field() {
        let error = ScheduleError::spec(
            SpecField::Frequency,
            SpecError::NotNumeric {
                token: "abc".to_string(),
            },
        );
        let message = error.to_string();
        assert!(message.contains("frequency"));
    }

    #[test]
    fn override_deserializes_without_name() {
        let json = r#"{"date":"2024-05-02","is_holiday":false}"#;
        let row: HolidayOverride = serde_json::from_str(json).expect("deserialize override");
        assert!(!row.is_holiday);
        assert!(row.holiday_name.is_empty());
    }
}
