pub mod discovery;
pub mod error;
pub mod readers;

pub use discovery::{StudyData, StudyFolder};
pub use error::{IngestError, Result};
pub use readers::{
    read_holiday_overrides, read_holiday_overrides_from_reader, read_subjects,
    read_subjects_from_reader, read_visit_records, read_visit_records_from_reader,
};
