// Transform operations over tables

use crate::table::{RowView, Table};

use super::{
    full_column, parse_number, InPlaceTableProcessor, ProcessingError, ProcessorType,
    TableProcessor,
};

/// Filter rows based on a predicate
///
/// The predicate receives each row as a [`RowView`]; accepted rows keep
/// their relative order and the column set is preserved.
pub struct FilterProcessor {
    name: String,
    predicate: Box<dyn Fn(&RowView<'_>) -> bool>,
}

impl FilterProcessor {
    /// Create a new filter processor with a predicate function
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&RowView<'_>) -> bool + 'static,
    {
        FilterProcessor {
            name: name.to_string(),
            predicate: Box::new(predicate),
        }
    }

    /// Create a filter that keeps rows where a column equals a value
    pub fn equals(column: &str, value: &str) -> Self {
        let column = column.to_string();
        let value = value.to_string();
        Self::new(&format!("equals_{}", column), move |row| {
            row.get(&column) == value
        })
    }

    /// Create a filter that keeps rows where a column is not empty
    pub fn not_empty(column: &str) -> Self {
        let column = column.to_string();
        Self::new(&format!("not_empty_{}", column), move |row| {
            !row.get(&column).is_empty()
        })
    }

    /// Create a filter that keeps rows where a column is greater than a value
    ///
    /// Numeric comparison when both cells parse as numbers, lexicographic
    /// otherwise, matching the sort comparison rules.
    pub fn greater_than(column: &str, value: &str) -> Self {
        let column = column.to_string();
        let value = value.to_string();
        Self::new(&format!("greater_than_{}", column), move |row| {
            let cell = row.get(&column);
            match (parse_number(cell), parse_number(&value)) {
                (Some(a), Some(b)) => a > b,
                _ => cell > value.as_str(),
            }
        })
    }

    /// Create a filter that keeps rows where a column is less than a value
    pub fn less_than(column: &str, value: &str) -> Self {
        let column = column.to_string();
        let value = value.to_string();
        Self::new(&format!("less_than_{}", column), move |row| {
            let cell = row.get(&column);
            match (parse_number(cell), parse_number(&value)) {
                (Some(a), Some(b)) => a < b,
                _ => cell < value.as_str(),
            }
        })
    }
}

impl TableProcessor for FilterProcessor {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let kept: Vec<usize> = (0..input.row_count())
            .filter(|&row| (self.predicate)(&input.row_view(row)))
            .collect();

        let mut result = Table::new();
        for name in input.column_names() {
            let values: Vec<String> = kept
                .iter()
                .map(|&row| input.get_cell(name, row).to_string())
                .collect();
            result.add_column(name, values)?;
        }
        result.set_row_count(kept.len());

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Filter
    }
}

/// Select specific columns from a table
///
/// Output columns appear in the requested order; unknown names are
/// silently skipped. The row count is copied from the source even when a
/// requested column is absent.
pub struct SelectTransform {
    columns: Vec<String>,
}

impl SelectTransform {
    /// Create a new select transform with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        SelectTransform { columns }
    }
}

impl TableProcessor for SelectTransform {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let mut result = Table::new();

        for column in &self.columns {
            if input.has_column(column) {
                result.add_column(column.clone(), full_column(input, column))?;
            }
        }
        result.set_row_count(input.row_count());

        Ok(result)
    }

    fn name(&self) -> &str {
        "select"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Rename columns in a table
///
/// Renamed columns come first, under their new names, in pair order; the
/// remaining columns follow in their original order. An absent old name
/// is skipped. A new name clashing with a retained column is a hard
/// duplicate-column error.
pub struct RenameTransform {
    renames: Vec<(String, String)>, // (old_name, new_name)
}

impl RenameTransform {
    /// Create a new rename transform with the given column renames
    pub fn new(renames: Vec<(String, String)>) -> Self {
        RenameTransform { renames }
    }
}

impl TableProcessor for RenameTransform {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let mut result = Table::new();
        let mut renamed: Vec<&str> = Vec::new();

        for (old_name, new_name) in &self.renames {
            if input.has_column(old_name) {
                result.add_column(new_name.clone(), full_column(input, old_name))?;
                renamed.push(old_name);
            }
        }

        for name in input.column_names() {
            if !renamed.contains(&name) {
                result.add_column(name, full_column(input, name))?;
            }
        }
        result.set_row_count(input.row_count());

        Ok(result)
    }

    fn name(&self) -> &str {
        "rename"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Append a computed column to a table in place
///
/// The computation receives each existing row as a [`RowView`] in row
/// order; the table is extended with one new column.
pub struct ComputedColumnTransform {
    column: String,
    compute: Box<dyn Fn(&RowView<'_>) -> String>,
}

impl ComputedColumnTransform {
    /// Create a new computed column transform
    pub fn new<F>(column: &str, compute: F) -> Self
    where
        F: Fn(&RowView<'_>) -> String + 'static,
    {
        ComputedColumnTransform {
            column: column.to_string(),
            compute: Box::new(compute),
        }
    }
}

impl InPlaceTableProcessor for ComputedColumnTransform {
    fn process_in_place(&self, input: &mut Table) -> Result<(), ProcessingError> {
        input.add_computed_column(&self.column, |row| (self.compute)(row))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "computed_column"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Replace whole columns through a batch function
///
/// The function maps a column's cells to a replacement sequence, applied
/// independently to each named column; other columns are copied through.
pub struct ApplyTransform {
    columns: Vec<String>,
    apply: Box<dyn Fn(&[String]) -> Vec<String>>,
}

impl ApplyTransform {
    /// Create a new apply transform over the given columns
    pub fn new<F>(columns: Vec<String>, apply: F) -> Self
    where
        F: Fn(&[String]) -> Vec<String> + 'static,
    {
        ApplyTransform {
            columns,
            apply: Box::new(apply),
        }
    }
}

impl TableProcessor for ApplyTransform {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let mut result = Table::new();

        for name in input.column_names() {
            let values = full_column(input, name);
            let values = if self.columns.iter().any(|c| c == name) {
                (self.apply)(&values)
            } else {
                values
            };
            result.add_column(name, values)?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "apply"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}
