//! CSV readers for the three study files.
//!
//! Headers are matched case-insensitively and BOM characters are stripped,
//! so spreadsheets exported from various tools load without fuss. Dates are
//! ISO `YYYY-MM-DD`; a bad value reports the file and line it came from.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use tvs_model::{HolidayOverride, ScheduleError, Subject, VisitRecord};

use crate::error::{IngestError, Result};

pub fn read_subjects(path: &Path) -> Result<Vec<Subject>> {
    let file = open(path)?;
    read_subjects_from_reader(file, path)
}

pub fn read_visit_records(path: &Path) -> Result<Vec<VisitRecord>> {
    let file = open(path)?;
    read_visit_records_from_reader(file, path)
}

pub fn read_holiday_overrides(path: &Path) -> Result<Vec<HolidayOverride>> {
    let file = open(path)?;
    read_holiday_overrides_from_reader(file, path)
}

pub fn read_subjects_from_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<Subject>> {
    let mut csv = csv_reader(reader);
    let header = Header::parse(&mut csv, path)?;
    let mut subjects = Vec::new();
    for record in csv.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record);
        let total_visits_raw = header.required(&record, "total_visits", path)?;
        let total_visits: u32 = total_visits_raw.parse().map_err(|_| {
            IngestError::row(
                path,
                line,
                format!("`{total_visits_raw}` is not a valid visit count"),
            )
        })?;
        if total_visits == 0 {
            return Err(IngestError::row(path, line, "total_visits must be at least 1"));
        }
        subjects.push(Subject {
            project: header.required(&record, "project", path)?,
            center: header.required(&record, "center", path)?,
            name: header.required(&record, "subject", path)?,
            enrollment_date: parse_date(&header.required(&record, "enrollment_date", path)?, path, line)?,
            total_visits,
            frequency_spec: header.required(&record, "frequency", path)?,
            window_spec: header.optional(&record, "visit_window"),
            label_rule: {
                let rule = header.optional(&record, "label_rule");
                (!rule.is_empty()).then_some(rule)
            },
        });
    }
    debug!(path = %path.display(), count = subjects.len(), "read subjects");
    Ok(subjects)
}

pub fn read_visit_records_from_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<VisitRecord>> {
    let mut csv = csv_reader(reader);
    let header = Header::parse(&mut csv, path)?;
    let mut records = Vec::new();
    for record in csv.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record);
        let number_raw = header.required(&record, "visit_number", path)?;
        let visit_number: u32 = number_raw.parse().map_err(|_| {
            IngestError::row(path, line, format!("`{number_raw}` is not a valid visit number"))
        })?;
        records.push(VisitRecord {
            project: header.required(&record, "project", path)?,
            center: header.required(&record, "center", path)?,
            subject_name: header.required(&record, "subject", path)?,
            visit_number,
            visit_date: parse_date(&header.required(&record, "visit_date", path)?, path, line)?,
        });
    }
    debug!(path = %path.display(), count = records.len(), "read visit records");
    Ok(records)
}

pub fn read_holiday_overrides_from_reader<R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<HolidayOverride>> {
    let mut csv = csv_reader(reader);
    let header = Header::parse(&mut csv, path)?;
    let mut overrides = Vec::new();
    for record in csv.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record_line(&record);
        let is_holiday_raw = header.required(&record, "is_holiday", path)?;
        let is_holiday = parse_bool(&is_holiday_raw)
            .ok_or_else(|| {
                IngestError::row(path, line, format!("`{is_holiday_raw}` is not a valid boolean"))
            })?;
        let holiday_name = header.optional(&record, "holiday_name");
        if is_holiday && holiday_name.trim().is_empty() {
            debug!(path = %path.display(), line, "override without a name, will use the generic label");
        }
        overrides.push(HolidayOverride {
            date: parse_date(&header.required(&record, "date", path)?, path, line)?,
            is_holiday,
            holiday_name,
        });
    }
    Ok(overrides)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Case-insensitive header lookup for one file.
struct Header {
    columns: BTreeMap<String, usize>,
}

impl Header {
    fn parse<R: Read>(csv: &mut csv::Reader<R>, path: &Path) -> Result<Self> {
        let headers = csv.headers().map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let mut columns = BTreeMap::new();
        for (index, name) in headers.iter().enumerate() {
            let key = name.trim_matches('\u{feff}').trim().to_lowercase();
            columns.entry(key).or_insert(index);
        }
        Ok(Self { columns })
    }

    fn required(&self, record: &StringRecord, column: &str, path: &Path) -> Result<String> {
        let index = self
            .columns
            .get(column)
            .ok_or_else(|| IngestError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })?;
        Ok(record.get(*index).unwrap_or_default().trim().to_string())
    }

    fn optional(&self, record: &StringRecord, column: &str) -> String {
        self.columns
            .get(column)
            .and_then(|index| record.get(*index))
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_date(value: &str, path: &Path, line: u64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let error = ScheduleError::InvalidDate {
            value: value.to_string(),
        };
        IngestError::row(path, line, error.to_string())
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
