// Table module for in-memory columnar storage

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents an error in the table module
#[derive(Debug, Error)]
pub enum TableError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// Represents a named column of text cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<String>,
}

impl Column {
    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the stored cell values
    ///
    /// The stored length may be shorter than the owning table's row count;
    /// cells past the stored length read as the empty string through
    /// [`Table::get_cell`].
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Represents a table of named text columns with a shared row count
///
/// Columns keep their insertion order. Column names are unique; violating
/// uniqueness is the one hard error the storage layer reports. Cell reads
/// are total: an out-of-range index, or a column the table does not have,
/// reads as the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Add a column to the table
    ///
    /// A column shorter than the current row count is padded with empty
    /// strings; a longer one raises the row count to its length. Existing
    /// columns are not rewritten, they stay under-allocated and read as
    /// empty past their stored length.
    pub fn add_column<S: Into<String>>(
        &mut self,
        name: S,
        mut values: Vec<String>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }

        if values.len() < self.row_count {
            values.resize(self.row_count, String::new());
        } else {
            self.row_count = values.len();
        }

        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Add a row to the table
    ///
    /// Every named cell is written at the new row index, creating absent
    /// columns first. Existing columns that are not named are left
    /// under-allocated. The row count always grows by exactly one. If the
    /// same column is named twice, the last cell wins.
    pub fn add_row(&mut self, cells: &[(&str, &str)]) {
        for (name, value) in cells {
            let pos = match self.position(name) {
                Some(pos) => pos,
                None => {
                    self.columns.push(Column {
                        name: (*name).to_string(),
                        values: Vec::new(),
                    });
                    self.columns.len() - 1
                }
            };

            let column = &mut self.columns[pos];
            if column.values.len() > self.row_count {
                // Second write to this column within the same call
                let last = column.values.len() - 1;
                column.values[last] = (*value).to_string();
            } else {
                column.values.resize(self.row_count, String::new());
                column.values.push((*value).to_string());
            }
        }

        self.row_count += 1;
    }

    /// Get the cells of a column by name
    pub fn get_column(&self, name: &str) -> Result<&[String], TableError> {
        self.position(name)
            .map(|pos| self.columns[pos].values.as_slice())
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Get a single cell by column name and row index
    ///
    /// Never fails: an absent column or an index past the stored length
    /// yields the empty string.
    pub fn get_cell(&self, name: &str, index: usize) -> &str {
        match self.position(name) {
            Some(pos) => self.columns[pos]
                .values
                .get(index)
                .map(String::as_str)
                .unwrap_or(""),
            None => "",
        }
    }

    /// Check whether the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Check whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Force the row count, used by transforms that must carry the source
    /// row count even when no column survives
    pub(crate) fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
    }

    /// Get the column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate over the columns in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Get a read-only name-to-cell view of one row
    pub fn row_view(&self, index: usize) -> RowView<'_> {
        RowView { table: self, index }
    }

    /// Add a column computed from the existing rows
    ///
    /// The computation receives each row as a [`RowView`] in row order and
    /// the results are appended as a new column, mutating the table in
    /// place.
    pub fn add_computed_column<F>(&mut self, name: &str, compute: F) -> Result<(), TableError>
    where
        F: Fn(&RowView<'_>) -> String,
    {
        let values: Vec<String> = (0..self.row_count)
            .map(|index| compute(&self.row_view(index)))
            .collect();

        self.add_column(name, values)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.column_names();
        writeln!(f, "{}", names.join("\t"))?;

        for index in 0..self.row_count {
            let cells: Vec<&str> = names.iter().map(|name| self.get_cell(name, index)).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }

        Ok(())
    }
}

/// Read-only snapshot view of one table row
///
/// Lent to predicates and computed-column closures; cells are looked up by
/// column name with the same empty-string fallback as [`Table::get_cell`].
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowView<'a> {
    /// Get a cell of this row by column name
    pub fn get(&self, name: &str) -> &'a str {
        self.table.get_cell(name, self.index)
    }

    /// Get the row index within the table
    pub fn index(&self) -> usize {
        self.index
    }
}
