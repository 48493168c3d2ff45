// Import and export of tables in text formats

mod csv;
mod json;

pub use csv::*;
pub use json::*;

use thiserror::Error;

use crate::table::{Table, TableError};

/// Represents an error in the io module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("table error: {0}")]
    Table(#[from] TableError),
}

/// Represents a source tables can be read from
pub trait DataSource {
    /// Read a table from the source
    fn read(&self) -> Result<Table, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Represents a sink tables can be written to
pub trait DataSink {
    /// Write a table to the sink
    fn write(&self, table: &Table) -> Result<(), DataError>;

    /// Get the sink name
    fn name(&self) -> &str;
}
