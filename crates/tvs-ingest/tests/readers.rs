//! CSV reader tests over in-memory input.

use std::path::Path;

use tvs_ingest::{
    IngestError, read_holiday_overrides_from_reader, read_subjects_from_reader,
    read_visit_records_from_reader,
};

fn path() -> &'static Path {
    Path::new("test.csv")
}

#[test]
fn subjects_roundtrip() {
    let csv = "\
project,center,subject,enrollment_date,total_visits,frequency,visit_window,label_rule
P01,C01,S001,2024-01-01,3,\"10,10\",\"2,3\",V1
P01,C01,S002,2024-02-01,2,14,,
";
    let subjects = read_subjects_from_reader(csv.as_bytes(), path()).expect("subjects");
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].frequency_spec, "10,10");
    assert_eq!(subjects[0].label_rule.as_deref(), Some("V1"));
    assert_eq!(subjects[1].window_spec, "");
    assert!(subjects[1].label_rule.is_none());
    assert_eq!(subjects[1].enrollment_date.to_string(), "2024-02-01");
}

#[test]
fn headers_match_case_insensitively() {
    let csv = "\
Project,Center,Subject,Enrollment_Date,Total_Visits,Frequency,Visit_Window
P01,C01,S001,2024-01-01,2,7,1
";
    let subjects = read_subjects_from_reader(csv.as_bytes(), path()).expect("subjects");
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].total_visits, 2);
}

#[test]
fn bom_in_header_is_tolerated() {
    let csv = "\u{feff}project,center,subject,enrollment_date,total_visits,frequency,visit_window
P01,C01,S001,2024-01-01,2,7,1
";
    let subjects = read_subjects_from_reader(csv.as_bytes(), path()).expect("subjects");
    assert_eq!(subjects.len(), 1);
}

#[test]
fn missing_column_is_reported_by_name() {
    let csv = "project,center,subject\nP01,C01,S001\n";
    let error = read_subjects_from_reader(csv.as_bytes(), path()).unwrap_err();
    match error {
        IngestError::MissingColumn { column, .. } => assert_eq!(column, "total_visits"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_date_reports_file_and_line() {
    let csv = "\
project,center,subject,enrollment_date,total_visits,frequency,visit_window
P01,C01,S001,2024-01-01,2,7,1
P01,C01,S002,01/15/2024,2,7,1
";
    let error = read_subjects_from_reader(csv.as_bytes(), path()).unwrap_err();
    match error {
        IngestError::Row { line, message, .. } => {
            assert_eq!(line, 3);
            assert!(message.contains("01/15/2024"));
            assert!(message.contains("YYYY-MM-DD"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_total_visits_is_rejected() {
    let csv = "\
project,center,subject,enrollment_date,total_visits,frequency,visit_window
P01,C01,S001,2024-01-01,0,7,1
";
    let error = read_subjects_from_reader(csv.as_bytes(), path()).unwrap_err();
    assert!(matches!(error, IngestError::Row { .. }));
}

#[test]
fn visit_records_roundtrip() {
    let csv = "\
project,center,subject,visit_number,visit_date
P01,C01,S001,2,2024-01-20
P01,C01,S001,3,2024-02-02
";
    let records = read_visit_records_from_reader(csv.as_bytes(), path()).expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].visit_number, 2);
    assert_eq!(records[1].visit_date.to_string(), "2024-02-02");
}

#[test]
fn override_booleans_accept_common_spellings() {
    let csv = "\
date,is_holiday,holiday_name
2024-05-02,true,Bridge day
2024-05-11,0,
2024-06-01,YES,
";
    let overrides = read_holiday_overrides_from_reader(csv.as_bytes(), path()).expect("overrides");
    assert_eq!(overrides.len(), 3);
    assert!(overrides[0].is_holiday);
    assert!(!overrides[1].is_holiday);
    assert!(overrides[2].is_holiday);
    assert_eq!(overrides[0].holiday_name, "Bridge day");
}

#[test]
fn unknown_boolean_is_rejected() {
    let csv = "date,is_holiday,holiday_name\n2024-05-02,maybe,\n";
    let error = read_holiday_overrides_from_reader(csv.as_bytes(), path()).unwrap_err();
    assert!(matches!(error, IngestError::Row { .. }));
}
