use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown history format {0:?} (expected txt, csv, or json)")]
    UnknownFormat(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
