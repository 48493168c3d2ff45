// Reshape operations: melt (wide to long) and cast (long to wide)

use std::collections::HashMap;

use crate::table::Table;

use super::{ProcessingError, ProcessorType, TableProcessor};

/// Melt processor, turning wide data into long data
///
/// Every source row emits one output row per value variable, in the
/// value-variable order given, carrying the row's id values, the
/// variable's name and its cell. The output has exactly
/// `row_count * value_vars.len()` rows.
pub struct MeltProcessor {
    id_vars: Vec<String>,
    value_vars: Vec<String>,
    var_name: String,
    value_name: String,
}

impl MeltProcessor {
    /// Create a new melt processor with the default "variable" and
    /// "value" output column names
    pub fn new(id_vars: Vec<String>, value_vars: Vec<String>) -> Self {
        MeltProcessor {
            id_vars,
            value_vars,
            var_name: "variable".to_string(),
            value_name: "value".to_string(),
        }
    }

    /// Override the variable and value output column names
    pub fn with_names(mut self, var_name: &str, value_name: &str) -> Self {
        self.var_name = var_name.to_string();
        self.value_name = value_name.to_string();
        self
    }
}

impl TableProcessor for MeltProcessor {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let total_rows = input.row_count() * self.value_vars.len();

        let mut id_columns: Vec<Vec<String>> =
            vec![Vec::with_capacity(total_rows); self.id_vars.len()];
        let mut variables: Vec<String> = Vec::with_capacity(total_rows);
        let mut values: Vec<String> = Vec::with_capacity(total_rows);

        for row in 0..input.row_count() {
            for var in &self.value_vars {
                for (position, id_var) in self.id_vars.iter().enumerate() {
                    id_columns[position].push(input.get_cell(id_var, row).to_string());
                }
                variables.push(var.clone());
                values.push(input.get_cell(var, row).to_string());
            }
        }

        let mut result = Table::new();
        for (position, id_var) in self.id_vars.iter().enumerate() {
            result.add_column(id_var.clone(), std::mem::take(&mut id_columns[position]))?;
        }
        result.add_column(self.var_name.clone(), variables)?;
        result.add_column(self.value_name.clone(), values)?;
        result.set_row_count(total_rows);

        Ok(result)
    }

    fn name(&self) -> &str {
        "melt"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Reshape
    }
}

/// Cast processor, turning long data back into wide data
///
/// Unique values of the variable column become output columns in
/// first-occurrence order; rows group by the id-variable key, also in
/// first-occurrence order. A variable repeated within one id group keeps
/// the last scanned cell; a pair that never occurs reads as empty.
pub struct CastProcessor {
    id_vars: Vec<String>,
    var_column: String,
    value_column: String,
}

impl CastProcessor {
    /// Create a new cast processor
    pub fn new(id_vars: Vec<String>, var_column: &str, value_column: &str) -> Self {
        CastProcessor {
            id_vars,
            var_column: var_column.to_string(),
            value_column: value_column.to_string(),
        }
    }
}

impl TableProcessor for CastProcessor {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        let mut var_order: Vec<String> = Vec::new();
        let mut var_index: HashMap<String, usize> = HashMap::new();

        let mut key_order: Vec<Vec<String>> = Vec::new();
        let mut group_index: HashMap<Vec<String>, usize> = HashMap::new();

        // (group, variable) -> cell, last write wins
        let mut cells: HashMap<(usize, usize), String> = HashMap::new();

        for row in 0..input.row_count() {
            let variable = input.get_cell(&self.var_column, row).to_string();
            let var_pos = match var_index.get(&variable) {
                Some(&pos) => pos,
                None => {
                    var_order.push(variable.clone());
                    var_index.insert(variable, var_order.len() - 1);
                    var_order.len() - 1
                }
            };

            let key: Vec<String> = self
                .id_vars
                .iter()
                .map(|id_var| input.get_cell(id_var, row).to_string())
                .collect();
            let group_pos = match group_index.get(&key) {
                Some(&pos) => pos,
                None => {
                    key_order.push(key.clone());
                    group_index.insert(key, key_order.len() - 1);
                    key_order.len() - 1
                }
            };

            cells.insert(
                (group_pos, var_pos),
                input.get_cell(&self.value_column, row).to_string(),
            );
        }

        let mut result = Table::new();
        for (position, id_var) in self.id_vars.iter().enumerate() {
            let values: Vec<String> = key_order.iter().map(|key| key[position].clone()).collect();
            result.add_column(id_var.clone(), values)?;
        }

        for (var_pos, variable) in var_order.iter().enumerate() {
            let values: Vec<String> = (0..key_order.len())
                .map(|group_pos| {
                    cells
                        .get(&(group_pos, var_pos))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            result.add_column(variable.clone(), values)?;
        }
        result.set_row_count(key_order.len());

        Ok(result)
    }

    fn name(&self) -> &str {
        "cast"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Reshape
    }
}
