//! Deviation detection: out-of-window visits and pending-overdue reminders.
//!
//! Both detectors are pure and idempotent over their inputs. Records are
//! matched to plan slots by visit number only; a record whose number has no
//! plan slot is ignored, not errored.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use tvs_model::{Overdue, PlannedVisit, Reminder, SubjectKey, Violation, VisitRecord};

/// Flag every recorded visit dated after its latest permissible date.
///
/// Early arrivals, even before the earliest date, are not violations: only
/// lateness past the latest date counts.
pub fn detect_violations(
    key: &SubjectKey,
    plan: &[PlannedVisit],
    records: &[VisitRecord],
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for record in records {
        let Some(planned) = plan_slot(plan, record.visit_number) else {
            continue;
        };
        if record.visit_date > planned.latest_date {
            violations.push(Violation {
                project: key.project.clone(),
                center: key.center.clone(),
                subject_name: key.name.clone(),
                visit_number: record.visit_number,
                actual_date: record.visit_date,
                earliest_date: planned.earliest_date,
                latest_date: planned.latest_date,
                overdue_days: (record.visit_date - planned.latest_date).num_days(),
            });
        }
    }
    violations
}

/// Flag every planned visit that has no recorded actual visit and whose
/// latest permissible date already passed the check date. Visit 1 is the
/// enrollment visit and is never reminded.
pub fn detect_pending_reminders(
    key: &SubjectKey,
    plan: &[PlannedVisit],
    records: &[VisitRecord],
    check_date: NaiveDate,
) -> Vec<Reminder> {
    let recorded: BTreeSet<u32> = records.iter().map(|record| record.visit_number).collect();
    let mut reminders = Vec::new();
    for planned in plan.iter().filter(|visit| visit.visit_number > 1) {
        if recorded.contains(&planned.visit_number) {
            continue;
        }
        if planned.latest_date < check_date {
            reminders.push(Reminder {
                project: key.project.clone(),
                center: key.center.clone(),
                subject_name: key.name.clone(),
                visit_number: planned.visit_number,
                earliest_date: planned.earliest_date,
                latest_date: planned.latest_date,
                overdue_days: (check_date - planned.latest_date).num_days(),
            });
        }
    }
    reminders
}

/// Display ordering: most overdue first, ties broken by visit number.
/// The sort is stable so equal rows keep their input order.
pub fn sort_by_overdue<T: Overdue>(items: &mut [T]) {
    items.sort_by(|a, b| {
        b.overdue_days()
            .cmp(&a.overdue_days())
            .then(a.visit_number().cmp(&b.visit_number()))
    });
}

fn plan_slot(plan: &[PlannedVisit], visit_number: u32) -> Option<&PlannedVisit> {
    let index = visit_number.checked_sub(1)? as usize;
    plan.get(index)
}
