use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a subject within a study: project, center, and subject name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
    pub project: String,
    pub center: String,
    pub name: String,
}

impl SubjectKey {
    pub fn new(
        project: impl Into<String>,
        center: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            center: center.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.project, self.center, self.name)
    }
}

/// An enrolled subject and the scheduling parameters captured at enrollment.
///
/// `frequency_spec` and `window_spec` are the raw operator-entered strings
/// (a single integer broadcast to every interval, or a comma list with one
/// value per interval). They are parsed lazily at evaluation time so a
/// malformed spec is an evaluation outcome, not a construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub project: String,
    pub center: String,
    pub name: String,
    pub enrollment_date: NaiveDate,
    pub total_visits: u32,
    pub frequency_spec: String,
    /// Empty means no tolerance: every window is zero days.
    pub window_spec: String,
    /// Optional display-label rule, e.g. `V1` or `C3` (prefix plus the
    /// number assigned to the first visit).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_rule: Option<String>,
}

impl Subject {
    pub fn key(&self) -> SubjectKey {
        SubjectKey::new(
            self.project.clone(),
            self.center.clone(),
            self.name.clone(),
        )
    }
}
