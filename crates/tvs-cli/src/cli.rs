//! CLI argument definitions for the trial visit scheduler.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tvs",
    version,
    about = "Trial visit scheduler - plan visits and surface protocol deviations",
    long_about = "Derive planned clinical-trial visit dates from interval/window specs,\n\
                  reconcile them against the national holiday calendar (with user\n\
                  overrides), and compare them with recorded visits to surface\n\
                  out-of-window violations and pending-overdue reminders."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow subject identifiers (PHI) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show one subject's annotated visit plan and holiday conflicts.
    Plan(PlanArgs),

    /// Check recorded visits against plan windows across a cohort.
    Violations(CohortArgs),

    /// List planned visits that are unrecorded and past their window.
    Reminders(RemindersArgs),

    /// List visit windows that cannot avoid a holiday.
    Conflicts(CohortArgs),

    /// List planned visits whose windows intersect a date range.
    Schedule(ScheduleArgs),

    /// Classify each day of a date range against the holiday calendar.
    Calendar(CalendarArgs),

    /// Write the full cohort evaluation as a JSON report.
    Report(ReportArgs),
}

/// Arguments shared by every command that reads a study folder.
#[derive(Args)]
pub struct StudyArgs {
    /// Path to the study folder containing subjects.csv (and optionally
    /// visit_records.csv and holiday_overrides.csv).
    #[arg(value_name = "STUDY_FOLDER")]
    pub study_folder: PathBuf,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Project the subject belongs to.
    #[arg(long)]
    pub project: String,

    /// Center the subject belongs to.
    #[arg(long)]
    pub center: String,

    /// Subject name.
    #[arg(long)]
    pub subject: String,

    /// Recompute the plan from this enrollment date instead of the
    /// recorded one.
    #[arg(long = "adjust-date", value_name = "YYYY-MM-DD")]
    pub adjust_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct CohortArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Restrict to one project (default: all projects).
    #[arg(long)]
    pub project: Option<String>,

    /// Restrict to one center (default: all centers).
    #[arg(long)]
    pub center: Option<String>,
}

#[derive(Args)]
pub struct RemindersArgs {
    #[command(flatten)]
    pub cohort: CohortArgs,

    /// Reference date visits must have been recorded by.
    #[arg(long = "check-date", value_name = "YYYY-MM-DD")]
    pub check_date: NaiveDate,
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub cohort: CohortArgs,

    /// Start of the date range (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: NaiveDate,

    /// End of the date range (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: NaiveDate,
}

#[derive(Args)]
pub struct CalendarArgs {
    #[command(flatten)]
    pub study: StudyArgs,

    /// Start of the date range (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: NaiveDate,

    /// End of the date range (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: NaiveDate,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub cohort: CohortArgs,

    /// Reference date for pending-reminder detection.
    #[arg(long = "check-date", value_name = "YYYY-MM-DD")]
    pub check_date: Option<NaiveDate>,

    /// Where to write the JSON report.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
