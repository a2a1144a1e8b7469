//! Study folder discovery.
//!
//! A study folder holds up to three CSV files, matched by file stem
//! case-insensitively: `subjects.csv` (required), `visit_records.csv`, and
//! `holiday_overrides.csv`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use tvs_model::{HolidayOverride, Subject, SubjectKey, VisitRecord};

use crate::error::{IngestError, Result};
use crate::readers::{read_holiday_overrides, read_subjects, read_visit_records};

const SUBJECTS_STEM: &str = "subjects";
const VISIT_RECORDS_STEM: &str = "visit_records";
const OVERRIDES_STEM: &str = "holiday_overrides";

/// Resolved file locations inside a study folder.
#[derive(Debug, Clone)]
pub struct StudyFolder {
    pub root: PathBuf,
    pub subjects_path: PathBuf,
    pub visit_records_path: Option<PathBuf>,
    pub overrides_path: Option<PathBuf>,
}

impl StudyFolder {
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(IngestError::FolderNotFound {
                path: root.to_path_buf(),
            });
        }
        let mut subjects_path = None;
        let mut visit_records_path = None;
        let mut overrides_path = None;

        let entries = std::fs::read_dir(root).map_err(|source| IngestError::FolderRead {
            path: root.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| IngestError::FolderRead {
                path: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !has_csv_extension(&path) {
                continue;
            }
            match file_stem_lower(&path).as_str() {
                SUBJECTS_STEM => subjects_path = Some(path),
                VISIT_RECORDS_STEM => visit_records_path = Some(path),
                OVERRIDES_STEM => overrides_path = Some(path),
                _ => {}
            }
        }

        let subjects_path = subjects_path.ok_or_else(|| IngestError::MissingSubjects {
            path: root.to_path_buf(),
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            subjects_path,
            visit_records_path,
            overrides_path,
        })
    }

    /// Read every discovered file.
    pub fn load(&self) -> Result<StudyData> {
        let subjects = read_subjects(&self.subjects_path)?;
        let visit_records = match &self.visit_records_path {
            Some(path) => read_visit_records(path)?,
            None => Vec::new(),
        };
        let overrides = match &self.overrides_path {
            Some(path) => read_holiday_overrides(path)?,
            None => Vec::new(),
        };
        info!(
            root = %self.root.display(),
            subjects = subjects.len(),
            visit_records = visit_records.len(),
            overrides = overrides.len(),
            "loaded study folder"
        );
        Ok(StudyData {
            subjects,
            visit_records,
            overrides,
        })
    }
}

/// Everything read from a study folder.
#[derive(Debug, Clone, Default)]
pub struct StudyData {
    pub subjects: Vec<Subject>,
    pub visit_records: Vec<VisitRecord>,
    pub overrides: Vec<HolidayOverride>,
}

impl StudyData {
    /// Subjects matching the optional project/center filters, in file order.
    pub fn subjects_for(&self, project: Option<&str>, center: Option<&str>) -> Vec<Subject> {
        self.subjects
            .iter()
            .filter(|subject| {
                project.is_none_or(|p| subject.project == p)
                    && center.is_none_or(|c| subject.center == c)
            })
            .cloned()
            .collect()
    }

    pub fn find_subject(&self, project: &str, center: &str, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| {
            subject.project == project && subject.center == center && subject.name == name
        })
    }

    /// Visit records grouped by subject key.
    pub fn records_by_subject(&self) -> BTreeMap<SubjectKey, Vec<VisitRecord>> {
        let mut map: BTreeMap<SubjectKey, Vec<VisitRecord>> = BTreeMap::new();
        for record in &self.visit_records {
            let key = SubjectKey::new(
                record.project.clone(),
                record.center.clone(),
                record.subject_name.clone(),
            );
            map.entry(key).or_default().push(record.clone());
        }
        map
    }

    pub fn records_for_subject(&self, key: &SubjectKey) -> Vec<VisitRecord> {
        self.visit_records
            .iter()
            .filter(|record| {
                record.project == key.project
                    && record.center == key.center
                    && record.subject_name == key.name
            })
            .cloned()
            .collect()
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn file_stem_lower(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_lowercase()
}
