// Pivot tables: two-dimensional cross tabulation

use std::collections::HashMap;

use crate::table::{Table, TableError};

use super::AggregateFunction;

/// Represents a pivot table
///
/// A cross tabulation of one value field by a row field and a column
/// field, with each occupied cell reduced by an aggregation function.
/// Label axes keep the first-occurrence order of the source scan; pairs
/// that never co-occur are simply absent and read as empty.
#[derive(Debug, Clone, Default)]
pub struct Pivot {
    row_field: String,
    column_field: String,
    value_field: String,
    aggregation: String,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: HashMap<(String, String), String>,
}

impl Pivot {
    /// Build a pivot table from a source table
    ///
    /// If any of the three field names is absent from the table, the
    /// result is an empty pivot rather than an error.
    pub fn from_table(
        table: &Table,
        row_field: &str,
        column_field: &str,
        value_field: &str,
        aggregation: &dyn AggregateFunction,
    ) -> Self {
        let mut pivot = Pivot {
            row_field: row_field.to_string(),
            column_field: column_field.to_string(),
            value_field: value_field.to_string(),
            aggregation: aggregation.name().to_string(),
            row_labels: Vec::new(),
            column_labels: Vec::new(),
            values: HashMap::new(),
        };

        if !table.has_column(row_field)
            || !table.has_column(column_field)
            || !table.has_column(value_field)
        {
            return pivot;
        }

        // Single scan: label discovery and per-pair cell collection
        let mut pairs: HashMap<(String, String), Vec<String>> = HashMap::new();
        for row in 0..table.row_count() {
            let row_label = table.get_cell(row_field, row).to_string();
            let column_label = table.get_cell(column_field, row).to_string();

            if !pivot.row_labels.contains(&row_label) {
                pivot.row_labels.push(row_label.clone());
            }
            if !pivot.column_labels.contains(&column_label) {
                pivot.column_labels.push(column_label.clone());
            }

            pairs
                .entry((row_label, column_label))
                .or_default()
                .push(table.get_cell(value_field, row).to_string());
        }

        for (pair, cells) in pairs {
            pivot.values.insert(pair, aggregation.apply(&cells));
        }

        pivot
    }

    /// Get the row field name
    pub fn row_field(&self) -> &str {
        &self.row_field
    }

    /// Get the column field name
    pub fn column_field(&self) -> &str {
        &self.column_field
    }

    /// Get the value field name
    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    /// Get the name of the aggregation that built this pivot
    pub fn aggregation(&self) -> &str {
        &self.aggregation
    }

    /// Get the row labels in first-occurrence order
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Get the column labels in first-occurrence order
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Check whether the pivot has no labels at all
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() && self.column_labels.is_empty()
    }

    /// Get an aggregated cell, or the empty string for a pair that never
    /// co-occurred in the source
    pub fn get(&self, row_label: &str, column_label: &str) -> &str {
        self.values
            .get(&(row_label.to_string(), column_label.to_string()))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Reconstruct a table from the pivot
    ///
    /// The first column is the row field holding the row labels; one
    /// column per column label follows, in label order, with empty
    /// strings where a pair was absent.
    pub fn to_table(&self) -> Result<Table, TableError> {
        let mut table = Table::new();
        table.add_column(self.row_field.clone(), self.row_labels.clone())?;

        for column_label in &self.column_labels {
            let values: Vec<String> = self
                .row_labels
                .iter()
                .map(|row_label| self.get(row_label, column_label).to_string())
                .collect();
            table.add_column(column_label.clone(), values)?;
        }

        Ok(table)
    }
}
