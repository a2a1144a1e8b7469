use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("study folder not found: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("failed to read study folder {path}: {source}")]
    FolderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("study folder {path} has no subjects.csv")]
    MissingSubjects { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column `{column}` in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path} line {line}: {message}")]
    Row {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl IngestError {
    pub(crate) fn row(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        Self::Row {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
