// JSON data source and sink implementation

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::processing::full_column;
use crate::table::Table;

use super::{DataError, DataSink, DataSource};

/// JSON data source reading an array of flat objects
///
/// The column set is the union of all object keys in first-occurrence
/// order. Scalar values are stringified; `null` reads as the empty
/// string; nested arrays and objects keep their JSON text.
pub struct JsonSource {
    path: String,
}

impl JsonSource {
    /// Create a new JSON data source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonSource {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    fn json_to_cell(value: &JsonValue) -> String {
        match value {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl DataSource for JsonSource {
    fn read(&self) -> Result<Table, DataError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let root: JsonValue =
            serde_json::from_reader(reader).map_err(|e| DataError::Parse(e.to_string()))?;

        let rows = root
            .as_array()
            .ok_or_else(|| DataError::Parse("expected a JSON array of objects".to_string()))?;

        let mut table = Table::new();
        for row in rows {
            let object = row
                .as_object()
                .ok_or_else(|| DataError::Parse("expected a JSON object row".to_string()))?;

            let cells: Vec<(String, String)> = object
                .iter()
                .map(|(key, value)| (key.clone(), Self::json_to_cell(value)))
                .collect();
            let cells: Vec<(&str, &str)> = cells
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            table.add_row(&cells);
        }

        Ok(table)
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// JSON data sink writing an array of flat objects
pub struct JsonSink {
    path: String,
    pretty: bool,
}

impl JsonSink {
    /// Create a new JSON data sink
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonSink {
            path: path.as_ref().to_string_lossy().to_string(),
            pretty: false,
        }
    }

    /// Write pretty-printed JSON
    pub fn pretty<P: AsRef<Path>>(path: P) -> Self {
        JsonSink {
            path: path.as_ref().to_string_lossy().to_string(),
            pretty: true,
        }
    }
}

impl DataSink for JsonSink {
    fn write(&self, table: &Table) -> Result<(), DataError> {
        let names = table.column_names();
        let columns: Vec<Vec<String>> = names
            .iter()
            .map(|name| full_column(table, name))
            .collect();

        let mut rows: Vec<JsonValue> = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let mut object = Map::new();
            for (position, name) in names.iter().enumerate() {
                object.insert(
                    (*name).to_string(),
                    JsonValue::String(columns[position][row].clone()),
                );
            }
            rows.push(JsonValue::Object(object));
        }

        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, &JsonValue::Array(rows))
        } else {
            serde_json::to_writer(writer, &JsonValue::Array(rows))
        };
        result.map_err(|e| DataError::Parse(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &str {
        &self.path
    }
}
