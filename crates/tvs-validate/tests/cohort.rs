//! Cohort evaluation: batch isolation, aggregation, and range lookup.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tvs_calendar::OverrideMap;
use tvs_model::{Subject, SubjectKey, VisitRecord};
use tvs_validate::{build_payload, evaluate_cohort, schedule_in_range};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn subject(name: &str, frequency: &str) -> Subject {
    Subject {
        project: "P01".to_string(),
        center: "C01".to_string(),
        name: name.to_string(),
        enrollment_date: date(2024, 1, 1),
        total_visits: 3,
        frequency_spec: frequency.to_string(),
        window_spec: "2".to_string(),
        label_rule: None,
    }
}

fn record(name: &str, number: u32, visit_date: NaiveDate) -> VisitRecord {
    VisitRecord {
        project: "P01".to_string(),
        center: "C01".to_string(),
        subject_name: name.to_string(),
        visit_number: number,
        visit_date,
    }
}

fn by_subject(records: Vec<VisitRecord>) -> BTreeMap<SubjectKey, Vec<VisitRecord>> {
    let mut map: BTreeMap<SubjectKey, Vec<VisitRecord>> = BTreeMap::new();
    for r in records {
        let key = SubjectKey::new(r.project.clone(), r.center.clone(), r.subject_name.clone());
        map.entry(key).or_default().push(r);
    }
    map
}

#[test]
fn one_bad_subject_does_not_abort_the_batch() {
    // Spec property 11: three subjects, one with an unparseable frequency.
    let subjects = vec![
        subject("S001", "10,10"),
        subject("S002", "banana"),
        subject("S003", "14"),
    ];
    let records = by_subject(vec![record("S001", 2, date(2024, 1, 20))]);
    let report = evaluate_cohort(&subjects, &records, &OverrideMap::new(), None);

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].key.name, "S002");

    // The healthy subjects still produced results.
    let violations = report.all_violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject_name, "S001");
    assert_eq!(violations[0].overdue_days, 7);
}

#[test]
fn reminders_require_a_check_date() {
    let subjects = vec![subject("S001", "10,10")];
    let no_records = BTreeMap::new();
    let without = evaluate_cohort(&subjects, &no_records, &OverrideMap::new(), None);
    assert!(without.all_reminders().is_empty());

    let with = evaluate_cohort(
        &subjects,
        &no_records,
        &OverrideMap::new(),
        Some(date(2024, 6, 1)),
    );
    // Visits 2 and 3 are unrecorded and long past their windows.
    assert_eq!(with.all_reminders().len(), 2);
}

#[test]
fn subjects_without_records_still_get_conflict_analysis() {
    let subjects = vec![subject("S001", "10,10")];
    let no_records = BTreeMap::new();
    let report = evaluate_cohort(&subjects, &no_records, &OverrideMap::new(), None);
    assert_eq!(report.outcomes.len(), 1);
    // No conflicts expected for this plan, but the analysis ran.
    assert_eq!(report.outcomes[0].conflicts.unavoidable_count, 0);
}

#[test]
fn schedule_range_lists_intersecting_windows() {
    let subjects = vec![subject("S001", "10,10"), subject("S002", "30,30")];
    let no_records = BTreeMap::new();
    let report = evaluate_cohort(&subjects, &no_records, &OverrideMap::new(), None);

    // S001 visit 2 window: Jan 9..13. S002 visit 2 window: Jan 29..Feb 2.
    let entries = schedule_in_range(&report.outcomes, date(2024, 1, 9), date(2024, 1, 31));
    let listed: Vec<(&str, u32)> = entries
        .iter()
        .map(|e| (e.key.name.as_str(), e.visit_number))
        .collect();
    assert_eq!(listed, vec![("S001", 2), ("S002", 2)]);
}

#[test]
fn schedule_range_includes_window_touching_the_edge() {
    let subjects = vec![subject("S001", "10,10")];
    let no_records = BTreeMap::new();
    let report = evaluate_cohort(&subjects, &no_records, &OverrideMap::new(), None);
    // Visit 2 earliest is Jan 9; a range ending that day still matches.
    let entries = schedule_in_range(&report.outcomes, date(2024, 1, 2), date(2024, 1, 9));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].visit_number, 2);
}

#[test]
fn payload_counts_cover_outcomes_and_errors() {
    let subjects = vec![subject("S001", "10,10"), subject("S002", "x")];
    let records = by_subject(vec![record("S001", 2, date(2024, 1, 20))]);
    let report = evaluate_cohort(
        &subjects,
        &records,
        &OverrideMap::new(),
        Some(date(2024, 6, 1)),
    );
    let payload = build_payload(&report, Some(date(2024, 6, 1)));
    assert_eq!(payload.subject_count, 2);
    assert_eq!(payload.violation_count, 1);
    assert_eq!(payload.errors.len(), 1);
    assert!(payload.errors[0].error.contains("frequency"));

    let json = serde_json::to_string(&payload).expect("serialize payload");
    assert!(json.contains("trial-visit-scheduler.cohort-report"));
    assert!(json.contains("\"2024-01-20\""));
}
