mod cohort;
mod conflicts;
mod deviations;
mod report;

pub use cohort::{
    CohortReport, ScheduleEntry, SubjectError, SubjectOutcome, evaluate_cohort, schedule_in_range,
};
pub use conflicts::{ConflictDay, ConflictDetail, ConflictReport, analyze_unavoidable_conflicts};
pub use deviations::{detect_pending_reminders, detect_violations, sort_by_overdue};
pub use report::{
    CohortReportPayload, SubjectErrorJson, SubjectSummaryJson, build_payload,
    write_cohort_report_json,
};
