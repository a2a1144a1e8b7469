pub mod label;
pub mod plan;
pub mod spec;

pub use label::visit_label;
pub use plan::{
    PlanDateKind, PlanItem, annotate_plan, compute_planned_visits, compute_planned_visits_from,
};
pub use spec::parse_interval_list;
