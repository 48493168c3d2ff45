// Processing module for table transformation and analysis

mod aggregate;
mod join;
mod pivot;
mod reshape;
mod sort;
mod transform;

pub use aggregate::*;
pub use join::*;
pub use pivot::*;
pub use reshape::*;
pub use sort::*;
pub use transform::*;

use log::debug;
use thiserror::Error;

use crate::table::{Table, TableError};

/// Represents a table processor that produces a new table
pub trait TableProcessor {
    /// Process a table and return a new table
    fn process(&self, input: &Table) -> Result<Table, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;

    /// Get the processor type
    fn processor_type(&self) -> ProcessorType;
}

/// Represents a table processor that mutates a table in place
pub trait InPlaceTableProcessor {
    /// Process a table in place
    fn process_in_place(&self, input: &mut Table) -> Result<(), ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;

    /// Get the processor type
    fn processor_type(&self) -> ProcessorType;
}

/// Represents a processor type
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorType {
    Transform,
    Filter,
    Aggregate,
    Sort,
    Reshape,
    Join,
    Pivot,
    Custom(String),
}

/// Represents an error in the processing module
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("aggregation '{name}' failed: {message}")]
    Aggregation { name: String, message: String },
}

/// Parse a cell as a floating-point number, if it is one
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// Format a number with at least one fractional digit
///
/// Whole numbers render as "60.0" rather than "60"; everything else uses
/// the shortest round-trip form.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Materialize a column at the table's full row count
///
/// Stored columns may be shorter than the row count; this reads through
/// `get_cell` so trailing cells come back as empty strings.
pub(crate) fn full_column(table: &Table, name: &str) -> Vec<String> {
    (0..table.row_count())
        .map(|row| table.get_cell(name, row).to_string())
        .collect()
}

/// Pipeline for chaining multiple processors
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn TableProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline with the given name
    pub fn new(name: &str) -> Self {
        Pipeline {
            name: name.to_string(),
            processors: Vec::new(),
        }
    }

    /// Add a processor to the pipeline
    pub fn add<P: TableProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Execute the pipeline on a table
    pub fn execute(&self, input: &Table) -> Result<Table, ProcessingError> {
        let mut current = input.clone();

        for processor in &self.processors {
            debug!(
                "pipeline '{}': stage '{}' on {} rows",
                self.name,
                processor.name(),
                current.row_count()
            );
            current = processor.process(&current)?;
        }

        Ok(current)
    }
}

impl TableProcessor for Pipeline {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        self.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Custom("pipeline".to_string())
    }
}
