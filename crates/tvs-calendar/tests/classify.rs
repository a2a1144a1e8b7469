//! Classification precedence tests: override beats calendar beats weekend.

use chrono::NaiveDate;
use tvs_calendar::{DayClassification, OverrideMap, classify_date};
use tvs_model::HolidayOverride;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn overrides(rows: Vec<HolidayOverride>) -> OverrideMap {
    OverrideMap::from_overrides(&rows)
}

#[test]
fn builtin_rest_day_is_non_working() {
    // 2024-10-01 is National Day.
    let day = classify_date(date(2024, 10, 1), &OverrideMap::new());
    assert_eq!(day.label(), "National Day");
    assert!(day.is_non_working());
}

#[test]
fn makeup_workday_renders_holiday_name_but_is_working() {
    // 2024-09-14 is a Saturday reclassified as a working day for the
    // Mid-Autumn Festival.
    let day = classify_date(date(2024, 9, 14), &OverrideMap::new());
    assert_eq!(day.label(), "Mid-Autumn Festival make-up workday");
    assert!(!day.is_non_working());
}

#[test]
fn non_holiday_override_beats_builtin_calendar() {
    // Spec property 7: an {is_holiday: false} override classifies the date
    // as non-holiday even though the built-in calendar marks it a holiday.
    let map = overrides(vec![HolidayOverride {
        date: date(2024, 10, 1),
        is_holiday: false,
        holiday_name: String::new(),
    }]);
    let day = classify_date(date(2024, 10, 1), &map);
    assert_eq!(day, DayClassification::Ordinary);
    assert_eq!(day.label(), "non-holiday");
    assert!(!day.is_non_working());
}

#[test]
fn non_holiday_override_beats_weekend() {
    // 2024-10-05 is a Saturday (and a National Day rest day).
    let map = overrides(vec![HolidayOverride {
        date: date(2024, 10, 5),
        is_holiday: false,
        holiday_name: String::new(),
    }]);
    assert!(!classify_date(date(2024, 10, 5), &map).is_non_working());
}

#[test]
fn holiday_override_with_name_uses_the_name() {
    let map = overrides(vec![HolidayOverride {
        date: date(2024, 3, 13),
        is_holiday: true,
        holiday_name: "Site maintenance".to_string(),
    }]);
    let day = classify_date(date(2024, 3, 13), &map);
    assert_eq!(day.label(), "Site maintenance");
    assert!(day.is_non_working());
}

#[test]
fn holiday_override_with_blank_name_uses_sentinel() {
    let map = overrides(vec![HolidayOverride {
        date: date(2024, 3, 13),
        is_holiday: true,
        holiday_name: "   ".to_string(),
    }]);
    assert_eq!(classify_date(date(2024, 3, 13), &map).label(), "custom holiday");
}

#[test]
fn override_on_makeup_workday_takes_precedence() {
    let map = overrides(vec![HolidayOverride {
        date: date(2024, 9, 14),
        is_holiday: true,
        holiday_name: "Local closure".to_string(),
    }]);
    let day = classify_date(date(2024, 9, 14), &map);
    assert_eq!(day.label(), "Local closure");
    assert!(day.is_non_working());
}

#[test]
fn date_outside_table_falls_back_to_weekday_rule() {
    // 2026 has no announcement in the table; a Wednesday is ordinary.
    assert!(!classify_date(date(2026, 1, 7), &OverrideMap::new()).is_non_working());
    // A Sunday is still a weekend.
    assert!(classify_date(date(2026, 1, 4), &OverrideMap::new()).is_non_working());
}
