// Error handling utilities

use thiserror::Error;

use crate::io::DataError;
use crate::processing::ProcessingError;
use crate::table::TableError;

/// Application error type rolling up every module error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("processing error: {0}")]
    Processing(#[from] ProcessingError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
