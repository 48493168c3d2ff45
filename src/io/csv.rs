// CSV data source and sink implementation

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;

use crate::processing::full_column;
use crate::table::Table;

use super::{DataError, DataSink, DataSource};

/// CSV data source
///
/// Every cell is read as text. Headerless files get generated
/// `column_N` names.
pub struct CsvSource {
    path: String,
    has_header: bool,
    delimiter: char,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P, has_header: bool, delimiter: char) -> Self {
        CsvSource {
            path: path.as_ref().to_string_lossy().to_string(),
            has_header,
            delimiter,
        }
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<Table, DataError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter as u8)
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut headers: Vec<String> = if self.has_header {
            csv_reader
                .headers()
                .map_err(|e| DataError::Parse(e.to_string()))?
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut table = Table::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| DataError::Parse(e.to_string()))?;

            while headers.len() < record.len() {
                headers.push(format!("column_{}", headers.len()));
            }

            let cells: Vec<(&str, &str)> = headers
                .iter()
                .map(String::as_str)
                .zip(record.iter())
                .collect();
            table.add_row(&cells);
        }

        // Header-only files still carry their column set
        for name in &headers {
            if !table.has_column(name) {
                table.add_column(name.clone(), Vec::new())?;
            }
        }

        debug!(
            "read {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            self.path
        );
        Ok(table)
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// CSV data sink
pub struct CsvSink {
    path: String,
    delimiter: char,
}

impl CsvSink {
    /// Create a new CSV data sink
    pub fn new<P: AsRef<Path>>(path: P, delimiter: char) -> Self {
        CsvSink {
            path: path.as_ref().to_string_lossy().to_string(),
            delimiter,
        }
    }
}

impl DataSink for CsvSink {
    fn write(&self, table: &Table) -> Result<(), DataError> {
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter as u8)
            .from_writer(writer);

        let names = table.column_names();
        csv_writer
            .write_record(&names)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let columns: Vec<Vec<String>> = names
            .iter()
            .map(|name| full_column(table, name))
            .collect();
        for row in 0..table.row_count() {
            let record: Vec<&str> = columns.iter().map(|col| col[row].as_str()).collect();
            csv_writer
                .write_record(&record)
                .map_err(|e| DataError::Parse(e.to_string()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.path
    }
}
