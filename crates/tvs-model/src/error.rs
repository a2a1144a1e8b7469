use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which subject attribute an interval spec was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecField {
    Frequency,
    Window,
}

impl SpecField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecField::Frequency => "frequency",
            SpecField::Window => "window",
        }
    }
}

impl fmt::Display for SpecField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure modes of interval/window spec parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("expected {expected} comma-separated value(s), found {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error("`{token}` is not a valid whole number")]
    NotNumeric { token: String },

    #[error("{value} is out of range: {requirement}")]
    OutOfRange {
        value: i64,
        requirement: &'static str,
    },
}

/// Errors surfaced by a single subject's schedule evaluation.
///
/// These are values, not exceptions: in a cohort run a failing subject is
/// reported alongside the successful ones, never instead of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid {field} spec: {source}")]
    Spec {
        field: SpecField,
        #[source]
        source: SpecError,
    },

    #[error("`{value}` is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("planned date for visit {visit_number} is outside the supported calendar range")]
    DateOverflow { visit_number: u32 },
}

impl ScheduleError {
    pub fn spec(field: SpecField, source: SpecError) -> Self {
        Self::Spec { field, source }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
