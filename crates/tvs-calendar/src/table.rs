//! The built-in national holiday adjustment table.
//!
//! Each yearly State Council announcement is embedded as one packed string
//! of fixed-width records. A record is 18 characters: the affected day
//! (`YYYYMMDD`), one digit indexing [`HOLIDAY_NAMES`], one digit rest flag
//! (`1` = rest day, `0` = make-up workday), and the `YYYYMMDD` of the
//! holiday the adjustment belongs to. Supporting a new year means adding
//! its announcement string here; no code changes.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use tracing::warn;

/// Holiday display names, indexed by the digit in the packed records.
pub const HOLIDAY_NAMES: &[&str] = &[
    "New Year's Day",
    "Spring Festival",
    "Tomb-Sweeping Day",
    "Labour Day",
    "Dragon Boat Festival",
    "Mid-Autumn Festival",
    "National Day",
    "National Day & Mid-Autumn Festival",
    "V-J Day",
];

/// Packed adjustment records, keyed by announcement year. An announcement
/// may reach into the adjacent year (the 2024 New Year rest days start on
/// 2023-12-30).
const ADJUSTMENTS: &[(i32, &str)] = &[
    (
        2024,
        "202312300120240101202312310120240101202401010120240101202402041020240210\
         202402101120240210202402111120240210202402121120240210202402131120240210\
         202402141120240210202402151120240210202402161120240210202402171120240210\
         202402181020240210202404042120240404202404052120240404202404062120240404\
         202404072020240404202404283020240501202405013120240501202405023120240501\
         202405033120240501202405043120240501202405053120240501202405113020240501\
         202406084120240610202406094120240610202406104120240610202409145020240917\
         202409155120240917202409165120240917202409175120240917202409296020241001\
         202410016120241001202410026120241001202410036120241001202410046120241001\
         202410056120241001202410066120241001202410076120241001202410126020241001",
    ),
    (
        2025,
        "202501010120250101202501261020250129202501281120250129202501291120250129\
         202501301120250129202501311120250129202502011120250129202502021120250129\
         202502031120250129202502041120250129202502081020250129202504042120250404\
         202504052120250404202504062120250404202504273020250501202505013120250501\
         202505023120250501202505033120250501202505043120250501202505053120250501\
         202505314120250531202506014120250531202506024120250531202509287020251001\
         202510017120251001202510027120251001202510037120251001202510047120251001\
         202510057120251001202510067120251001202510077120251001202510087120251001\
         202510117020251001",
    ),
];

const RECORD_LEN: usize = 18;

/// One decoded adjustment day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayEntry {
    pub name: &'static str,
    /// True for a rest day, false for a make-up workday.
    pub rest: bool,
    /// The holiday date this adjustment compensates for.
    pub linked: NaiveDate,
}

/// The decoded table: adjustment day -> entry.
#[derive(Debug, Clone)]
pub struct HolidayTable {
    entries: BTreeMap<NaiveDate, HolidayEntry>,
    years: Vec<i32>,
}

impl HolidayTable {
    fn decode(raw: &[(i32, &'static str)]) -> Self {
        let mut entries = BTreeMap::new();
        let mut years = Vec::new();
        for &(year, packed) in raw {
            years.push(year);
            for record in PackedRecords::new(packed) {
                match decode_record(record) {
                    Some((date, entry)) => {
                        entries.insert(date, entry);
                    }
                    None => warn!(year, record, "skipping malformed holiday record"),
                }
            }
        }
        Self { entries, years }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HolidayEntry> {
        self.entries.get(&date)
    }

    /// Announcement years carried by the table.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct PackedRecords<'a> {
    rest: &'a str,
}

impl<'a> PackedRecords<'a> {
    fn new(packed: &'a str) -> Self {
        Self { rest: packed }
    }
}

impl<'a> Iterator for PackedRecords<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // The embedded strings are line-wrapped; whitespace is not data.
        self.rest = self.rest.trim_start();
        if self.rest.len() < RECORD_LEN {
            return None;
        }
        let (record, rest) = self.rest.split_at(RECORD_LEN);
        self.rest = rest;
        Some(record)
    }
}

fn decode_record(record: &str) -> Option<(NaiveDate, HolidayEntry)> {
    let date = parse_packed_date(record.get(0..8)?)?;
    let name_index: usize = record.get(8..9)?.parse().ok()?;
    let name = HOLIDAY_NAMES.get(name_index).copied()?;
    let rest = match record.get(9..10)? {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    let linked = parse_packed_date(record.get(10..18)?)?;
    Some((date, HolidayEntry { name, rest, linked }))
}

fn parse_packed_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y%m%d").ok()
}

/// The process-wide table, decoded once on first use.
pub fn holiday_table() -> &'static HolidayTable {
    static TABLE: LazyLock<HolidayTable> = LazyLock::new(|| HolidayTable::decode(ADJUSTMENTS));
    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn table_decodes_all_records() {
        let table = holiday_table();
        assert_eq!(table.len(), 73);
        assert_eq!(table.years(), &[2024, 2025]);
    }

    #[test]
    fn new_year_rest_day() {
        let entry = holiday_table().get(date(2025, 1, 1)).expect("entry");
        assert_eq!(entry.name, "New Year's Day");
        assert!(entry.rest);
    }

    #[test]
    fn spring_festival_makeup_workday() {
        let entry = holiday_table().get(date(2025, 1, 26)).expect("entry");
        assert_eq!(entry.name, "Spring Festival");
        assert!(!entry.rest);
        assert_eq!(entry.linked, date(2025, 1, 29));
    }

    #[test]
    fn announcement_reaches_into_previous_year() {
        let entry = holiday_table().get(date(2023, 12, 30)).expect("entry");
        assert_eq!(entry.name, "New Year's Day");
        assert!(entry.rest);
    }

    #[test]
    fn unknown_date_has_no_entry() {
        assert!(holiday_table().get(date(2024, 3, 15)).is_none());
    }
}
