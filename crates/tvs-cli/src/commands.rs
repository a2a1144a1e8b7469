//! Command implementations over a loaded study folder.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

use tvs_calendar::{OverrideMap, classify_date};
use tvs_cli::logging::redact_value;
use tvs_core::{annotate_plan, compute_planned_visits_from};
use tvs_ingest::{StudyData, StudyFolder};
use tvs_validate::{
    CohortReport, analyze_unavoidable_conflicts, evaluate_cohort, schedule_in_range,
    write_cohort_report_json,
};

use crate::cli::{CalendarArgs, CohortArgs, PlanArgs, RemindersArgs, ReportArgs, ScheduleArgs};
use crate::summary;

pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let data = load(&args.study.study_folder)?;
    let Some(subject) = data.find_subject(&args.project, &args.center, &args.subject) else {
        bail!(
            "subject {}/{}/{} not found in {}",
            args.project,
            args.center,
            args.subject,
            args.study.study_folder.display()
        );
    };
    debug!(subject = redact_value(&subject.name), "computing plan");

    let enrollment = args.adjust_date.unwrap_or(subject.enrollment_date);
    let plan = compute_planned_visits_from(subject, enrollment)
        .with_context(|| format!("compute plan for {}", subject.key()))?;
    let overrides = OverrideMap::from_overrides(&data.overrides);
    let items = annotate_plan(&plan, &overrides);
    let conflicts = analyze_unavoidable_conflicts(&plan, &overrides);
    summary::print_plan(subject, &items, &conflicts);
    Ok(())
}

pub fn run_violations(args: &CohortArgs) -> Result<bool> {
    let report = evaluate(args, None)?;
    let violations = report.all_violations();
    summary::print_violations(&violations);
    summary::print_subject_errors(&report.errors);
    Ok(!violations.is_empty() || !report.errors.is_empty())
}

pub fn run_reminders(args: &RemindersArgs) -> Result<bool> {
    let report = evaluate(&args.cohort, Some(args.check_date))?;
    let reminders = report.all_reminders();
    summary::print_reminders(&reminders, args.check_date);
    summary::print_subject_errors(&report.errors);
    Ok(!reminders.is_empty() || !report.errors.is_empty())
}

pub fn run_conflicts(args: &CohortArgs) -> Result<()> {
    let report = evaluate(args, None)?;
    summary::print_conflicts(&report.outcomes);
    summary::print_subject_errors(&report.errors);
    Ok(())
}

pub fn run_schedule(args: &ScheduleArgs) -> Result<()> {
    if args.to < args.from {
        bail!("--to must not be before --from");
    }
    let report = evaluate(&args.cohort, None)?;
    let entries = schedule_in_range(&report.outcomes, args.from, args.to);
    summary::print_schedule(&entries, args.from, args.to);
    summary::print_subject_errors(&report.errors);
    Ok(())
}

pub fn run_calendar(args: &CalendarArgs) -> Result<()> {
    if args.to < args.from {
        bail!("--to must not be before --from");
    }
    let data = load(&args.study.study_folder)?;
    let overrides = OverrideMap::from_overrides(&data.overrides);
    let days: Vec<(NaiveDate, _)> = args
        .from
        .iter_days()
        .take_while(|date| *date <= args.to)
        .map(|date| (date, classify_date(date, &overrides)))
        .collect();
    summary::print_calendar(&days);
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<()> {
    let report = evaluate(&args.cohort, args.check_date)?;
    let path = write_cohort_report_json(&args.output, &report, args.check_date)?;
    info!(path = %path.display(), "wrote cohort report");
    println!("Report: {}", path.display());
    Ok(())
}

fn evaluate(args: &CohortArgs, check_date: Option<NaiveDate>) -> Result<CohortReport> {
    let data = load(&args.study.study_folder)?;
    let subjects = data.subjects_for(args.project.as_deref(), args.center.as_deref());
    if subjects.is_empty() {
        info!("no subjects match the given filters");
    }
    let records = data.records_by_subject();
    let overrides = OverrideMap::from_overrides(&data.overrides);
    Ok(evaluate_cohort(&subjects, &records, &overrides, check_date))
}

fn load(folder: &std::path::Path) -> Result<StudyData> {
    let study = StudyFolder::discover(folder)
        .with_context(|| format!("discover study folder {}", folder.display()))?;
    let data = study
        .load()
        .with_context(|| format!("load study folder {}", folder.display()))?;
    Ok(data)
}
