// Multi-key stable sort over tables

use std::cmp::Ordering;

use crate::table::Table;

use super::{parse_number, ProcessingError, ProcessorType, TableProcessor};

/// Represents one sort key
#[derive(Debug, Clone)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    /// Create an ascending sort key
    pub fn asc(column: &str) -> Self {
        SortKey {
            column: column.to_string(),
            descending: false,
        }
    }

    /// Create a descending sort key
    pub fn desc(column: &str) -> Self {
        SortKey {
            column: column.to_string(),
            descending: true,
        }
    }
}

/// Compare two cells numerically when both parse, lexicographically
/// otherwise
pub(crate) fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        _ => a.cmp(b),
    }
}

/// Sort processor applying a list of keys in order
///
/// Keys naming absent columns contribute no ordering. Rows that compare
/// equal on every key keep their original relative order; the output is a
/// full rebuild of every column through the computed permutation.
pub struct SortProcessor {
    keys: Vec<SortKey>,
}

impl SortProcessor {
    /// Create a new sort processor with the given keys
    pub fn new(keys: Vec<SortKey>) -> Self {
        SortProcessor { keys }
    }

    /// Create a sort processor over a single column
    pub fn by(column: &str, descending: bool) -> Self {
        SortProcessor {
            keys: vec![SortKey {
                column: column.to_string(),
                descending,
            }],
        }
    }
}

impl TableProcessor for SortProcessor {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let keys: Vec<&SortKey> = self
            .keys
            .iter()
            .filter(|key| input.has_column(&key.column))
            .collect();

        let mut permutation: Vec<usize> = (0..input.row_count()).collect();
        // Vec::sort_by is stable, which keeps tied rows in source order
        permutation.sort_by(|&left, &right| {
            for key in &keys {
                let ordering = compare_cells(
                    input.get_cell(&key.column, left),
                    input.get_cell(&key.column, right),
                );
                let ordering = if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        let mut result = Table::new();
        for name in input.column_names() {
            let values: Vec<String> = permutation
                .iter()
                .map(|&row| input.get_cell(name, row).to_string())
                .collect();
            result.add_column(name, values)?;
        }
        result.set_row_count(input.row_count());

        Ok(result)
    }

    fn name(&self) -> &str {
        "sort"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Sort
    }
}
