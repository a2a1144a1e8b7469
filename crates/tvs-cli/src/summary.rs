//! Result tables printed by the CLI.

use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tvs_calendar::DayClassification;
use tvs_core::{PlanDateKind, PlanItem};
use tvs_model::{Reminder, Subject, Violation};
use tvs_validate::{ConflictReport, ScheduleEntry, SubjectError, SubjectOutcome};

pub fn print_plan(subject: &Subject, items: &[PlanItem], conflicts: &ConflictReport) {
    println!(
        "Subject: {}/{}/{}  enrolled {}  visits {}",
        subject.project, subject.center, subject.name, subject.enrollment_date, subject.total_visits
    );
    let mut table = base_table(vec!["Visit", "Label", "Date type", "Date", "Day"]);
    align_right(&mut table, 0);
    for item in items {
        table.add_row(vec![
            Cell::new(item.visit_number),
            Cell::new(&item.label),
            Cell::new(kind_name(item.kind)),
            Cell::new(item.date),
            day_cell(&item.day),
        ]);
    }
    println!("{table}");
    print_conflict_details(conflicts);
}

fn print_conflict_details(conflicts: &ConflictReport) {
    if !conflicts.has_conflicts() {
        println!("No unavoidable holiday conflicts.");
        return;
    }
    println!(
        "Unavoidable holiday conflicts: {}",
        conflicts.unavoidable_count
    );
    for detail in &conflicts.details {
        let days: Vec<String> = detail
            .dates
            .iter()
            .map(|day| format!("{} ({})", day.date, day.day_label))
            .collect();
        println!(
            "  visit {} ({}): {}",
            detail.visit_number,
            detail.label,
            days.join(", ")
        );
    }
}

pub fn print_violations(violations: &[Violation]) {
    if violations.is_empty() {
        println!("No out-of-window visits found.");
        return;
    }
    let mut table = base_table(vec![
        "Project", "Center", "Subject", "Visit", "Actual", "Earliest", "Latest", "Days over",
    ]);
    align_right(&mut table, 3);
    align_right(&mut table, 7);
    for violation in violations {
        table.add_row(vec![
            Cell::new(&violation.project),
            Cell::new(&violation.center),
            Cell::new(&violation.subject_name),
            Cell::new(violation.visit_number),
            Cell::new(violation.actual_date),
            Cell::new(violation.earliest_date),
            Cell::new(violation.latest_date),
            Cell::new(violation.overdue_days).fg(Color::Red),
        ]);
    }
    println!("{table}");
}

pub fn print_reminders(reminders: &[Reminder], check_date: NaiveDate) {
    if reminders.is_empty() {
        println!("No pending visits overdue as of {check_date}.");
        return;
    }
    let mut table = base_table(vec![
        "Project", "Center", "Subject", "Visit", "Earliest", "Latest", "Days over",
    ]);
    align_right(&mut table, 3);
    align_right(&mut table, 6);
    for reminder in reminders {
        table.add_row(vec![
            Cell::new(&reminder.project),
            Cell::new(&reminder.center),
            Cell::new(&reminder.subject_name),
            Cell::new(reminder.visit_number),
            Cell::new(reminder.earliest_date),
            Cell::new(reminder.latest_date),
            Cell::new(reminder.overdue_days).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn print_conflicts(outcomes: &[SubjectOutcome]) {
    let flagged: Vec<&SubjectOutcome> = outcomes
        .iter()
        .filter(|outcome| outcome.conflicts.has_conflicts())
        .collect();
    if flagged.is_empty() {
        println!("No unavoidable holiday conflicts in the cohort.");
        return;
    }
    let mut table = base_table(vec!["Subject", "Visit", "Label", "Window days"]);
    align_right(&mut table, 1);
    for outcome in flagged {
        for detail in &outcome.conflicts.details {
            let days: Vec<String> = detail
                .dates
                .iter()
                .map(|day| format!("{} ({})", day.date, day.day_label))
                .collect();
            table.add_row(vec![
                Cell::new(outcome.key.to_string()),
                Cell::new(detail.visit_number),
                Cell::new(&detail.label),
                Cell::new(days.join(", ")).fg(Color::Red),
            ]);
        }
    }
    println!("{table}");
}

pub fn print_schedule(entries: &[ScheduleEntry], from: NaiveDate, to: NaiveDate) {
    if entries.is_empty() {
        println!("No planned visits between {from} and {to}.");
        return;
    }
    let mut table = base_table(vec!["Subject", "Visit", "Label", "Base", "Earliest", "Latest"]);
    align_right(&mut table, 1);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.key.to_string()),
            Cell::new(entry.visit_number),
            Cell::new(&entry.label),
            Cell::new(entry.base_date),
            Cell::new(entry.earliest_date),
            Cell::new(entry.latest_date),
        ]);
    }
    println!("{table}");
}

pub fn print_calendar(days: &[(NaiveDate, DayClassification)]) {
    let mut table = base_table(vec!["Date", "Weekday", "Classification"]);
    for (date, day) in days {
        table.add_row(vec![
            Cell::new(date),
            Cell::new(date.format("%A")),
            day_cell(day),
        ]);
    }
    println!("{table}");
}

pub fn print_subject_errors(errors: &[SubjectError]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Subjects that could not be evaluated:");
    for failed in errors {
        eprintln!("- {}: {}", failed.key, failed.error);
    }
}

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.into_iter().map(header_cell).collect::<Vec<_>>());
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_right(table: &mut Table, index: usize) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

fn day_cell(day: &DayClassification) -> Cell {
    let cell = Cell::new(day.label());
    if day.is_non_working() {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn kind_name(kind: PlanDateKind) -> &'static str {
    match kind {
        PlanDateKind::Earliest => "earliest",
        PlanDateKind::Base => "base",
        PlanDateKind::Latest => "latest",
    }
}
