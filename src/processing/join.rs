// Equi-join operations between two tables

use std::collections::{HashMap, HashSet};

use crate::table::Table;

use super::ProcessingError;

/// Join type for combining tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

/// Join processor matching rows on a shared list of key columns
///
/// Output columns are the left table's columns in order, then the right
/// table's non-key columns in the right table's order; a right column
/// name clashing with an earlier output column is deduplicated with a
/// numeric suffix. Key ties produce the cross product of the matching
/// rows.
pub struct JoinProcessor {
    join_type: JoinType,
    by_columns: Vec<String>,
}

impl JoinProcessor {
    /// Create a new join processor
    pub fn new(join_type: JoinType, by_columns: Vec<String>) -> Self {
        JoinProcessor {
            join_type,
            by_columns,
        }
    }

    /// Create a new inner join processor
    pub fn inner(by_columns: Vec<String>) -> Self {
        Self::new(JoinType::Inner, by_columns)
    }

    /// Create a new left join processor
    pub fn left(by_columns: Vec<String>) -> Self {
        Self::new(JoinType::Left, by_columns)
    }

    /// Create a new right join processor
    pub fn right(by_columns: Vec<String>) -> Self {
        Self::new(JoinType::Right, by_columns)
    }

    /// Create a new full join processor
    pub fn full(by_columns: Vec<String>) -> Self {
        Self::new(JoinType::Full, by_columns)
    }

    /// Join two tables
    pub fn process_join(&self, left: &Table, right: &Table) -> Result<Table, ProcessingError> {
        if self.by_columns.is_empty() {
            return Err(ProcessingError::InvalidArgument(
                "join requires at least one key column".to_string(),
            ));
        }

        let left_names: Vec<String> = left
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let right_names: Vec<String> = right
            .column_names()
            .into_iter()
            .filter(|name| !self.by_columns.iter().any(|by| by == name))
            .map(str::to_string)
            .collect();

        // Output headers; clashing right names get a numeric suffix
        let mut output_names: Vec<String> = left_names.clone();
        let mut right_output_names: Vec<String> = Vec::with_capacity(right_names.len());
        for name in &right_names {
            let mut candidate = name.clone();
            let mut counter = 1;
            while output_names.iter().any(|existing| existing == &candidate) {
                candidate = format!("{}_{}", name, counter);
                counter += 1;
            }
            output_names.push(candidate.clone());
            right_output_names.push(candidate);
        }

        // Index the right table by composite key, keeping first-occurrence
        // key order for the unmatched-key pass
        let mut key_order: Vec<Vec<String>> = Vec::new();
        let mut right_index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for row in 0..right.row_count() {
            let key: Vec<String> = self
                .by_columns
                .iter()
                .map(|by| right.get_cell(by, row).to_string())
                .collect();
            if !right_index.contains_key(&key) {
                key_order.push(key.clone());
            }
            right_index.entry(key).or_default().push(row);
        }

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); output_names.len()];
        let mut matched_keys: HashSet<Vec<String>> = HashSet::new();
        let mut output_rows = 0usize;

        for row in 0..left.row_count() {
            let key: Vec<String> = self
                .by_columns
                .iter()
                .map(|by| left.get_cell(by, row).to_string())
                .collect();

            if let Some(right_rows) = right_index.get(&key) {
                matched_keys.insert(key);
                for &right_row in right_rows {
                    for (position, name) in left_names.iter().enumerate() {
                        columns[position].push(left.get_cell(name, row).to_string());
                    }
                    for (offset, name) in right_names.iter().enumerate() {
                        columns[left_names.len() + offset]
                            .push(right.get_cell(name, right_row).to_string());
                    }
                    output_rows += 1;
                }
            } else if self.join_type == JoinType::Left || self.join_type == JoinType::Full {
                for (position, name) in left_names.iter().enumerate() {
                    columns[position].push(left.get_cell(name, row).to_string());
                }
                for offset in 0..right_names.len() {
                    columns[left_names.len() + offset].push(String::new());
                }
                output_rows += 1;
            }
        }

        // Trailing rows for right-side keys no left row ever matched:
        // key columns carry the key itself, every other column is empty
        if self.join_type == JoinType::Right || self.join_type == JoinType::Full {
            for key in &key_order {
                if matched_keys.contains(key) {
                    continue;
                }
                for (position, name) in left_names.iter().enumerate() {
                    let cell = self
                        .by_columns
                        .iter()
                        .position(|by| by == name)
                        .map(|by_pos| key[by_pos].clone())
                        .unwrap_or_default();
                    columns[position].push(cell);
                }
                for offset in 0..right_names.len() {
                    columns[left_names.len() + offset].push(String::new());
                }
                output_rows += 1;
            }
        }

        let mut result = Table::new();
        for (position, name) in output_names.iter().enumerate() {
            result.add_column(name.clone(), std::mem::take(&mut columns[position]))?;
        }
        result.set_row_count(output_rows);

        Ok(result)
    }
}
