// ABOUTME: Error types for report export
// ABOUTME: Wraps CSV, encoding and filesystem failures

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
