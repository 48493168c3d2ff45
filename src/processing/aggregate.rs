// Aggregation functions and group-by processing

use std::collections::HashMap;
use std::sync::Arc;

use crate::table::Table;

use super::{format_number, parse_number, ProcessingError, ProcessorType, TableProcessor};

/// Represents an aggregation function over the cells of one group
///
/// The input is the full multiset of cells collected for a group, in
/// first-encountered row order. Implementations must be deterministic;
/// the built-ins are additionally order-insensitive.
pub trait AggregateFunction: Send + Sync {
    /// Get the name of the aggregation function
    fn name(&self) -> &str;

    /// Reduce a group of cells to a single cell
    fn apply(&self, values: &[String]) -> String;
}

/// Sum aggregation function
///
/// Empty input yields "0". If every cell parses as a number the total is
/// returned with at least one fractional digit; a single unparsable cell
/// makes the whole result "0", never a partial sum.
pub struct SumFunction;

impl AggregateFunction for SumFunction {
    fn name(&self) -> &str {
        "sum"
    }

    fn apply(&self, values: &[String]) -> String {
        if values.is_empty() {
            return "0".to_string();
        }

        let mut total = 0.0;
        for value in values {
            match parse_number(value) {
                Some(number) => total += number,
                None => return "0".to_string(),
            }
        }

        format_number(total)
    }
}

/// Average aggregation function
///
/// Same all-or-nothing parse rule as [`SumFunction`].
pub struct AvgFunction;

impl AggregateFunction for AvgFunction {
    fn name(&self) -> &str {
        "avg"
    }

    fn apply(&self, values: &[String]) -> String {
        if values.is_empty() {
            return "0".to_string();
        }

        let mut total = 0.0;
        for value in values {
            match parse_number(value) {
                Some(number) => total += number,
                None => return "0".to_string(),
            }
        }

        format_number(total / values.len() as f64)
    }
}

/// Count aggregation function
pub struct CountFunction;

impl AggregateFunction for CountFunction {
    fn name(&self) -> &str {
        "count"
    }

    fn apply(&self, values: &[String]) -> String {
        values.len().to_string()
    }
}

/// Max aggregation function
///
/// Numeric maximum when every cell parses; any unparsable cell switches
/// the whole comparison to a lexicographic maximum over the raw strings.
/// Empty input yields the empty string.
pub struct MaxFunction;

impl AggregateFunction for MaxFunction {
    fn name(&self) -> &str {
        "max"
    }

    fn apply(&self, values: &[String]) -> String {
        extreme(values, true)
    }
}

/// Min aggregation function
///
/// Mirror of [`MaxFunction`], including the lexicographic fallback.
pub struct MinFunction;

impl AggregateFunction for MinFunction {
    fn name(&self) -> &str {
        "min"
    }

    fn apply(&self, values: &[String]) -> String {
        extreme(values, false)
    }
}

fn extreme(values: &[String], take_max: bool) -> String {
    if values.is_empty() {
        return String::new();
    }

    let mut numbers = Vec::with_capacity(values.len());
    for value in values {
        match parse_number(value) {
            Some(number) => numbers.push(number),
            None => {
                // One bad cell disables numeric comparison for the group
                let pick = if take_max {
                    values.iter().max()
                } else {
                    values.iter().min()
                };
                return pick.cloned().unwrap_or_default();
            }
        }
    }

    let result = if take_max {
        numbers.into_iter().fold(f64::NEG_INFINITY, f64::max)
    } else {
        numbers.into_iter().fold(f64::INFINITY, f64::min)
    };

    format_number(result)
}

/// Registry of aggregation functions, keyed by name
///
/// Pre-loaded with the five built-ins (sum, avg, count, max, min);
/// user-supplied functions register under their own name. The registry
/// does not validate purity.
pub struct AggregateRegistry {
    functions: HashMap<String, Arc<dyn AggregateFunction>>,
}

impl AggregateRegistry {
    /// Create a registry holding the built-in functions
    pub fn new() -> Self {
        let mut registry = AggregateRegistry {
            functions: HashMap::new(),
        };

        registry.register(Arc::new(SumFunction));
        registry.register(Arc::new(AvgFunction));
        registry.register(Arc::new(CountFunction));
        registry.register(Arc::new(MaxFunction));
        registry.register(Arc::new(MinFunction));
        registry
    }

    /// Register an aggregation function under its own name
    pub fn register(&mut self, function: Arc<dyn AggregateFunction>) {
        self.functions
            .insert(function.name().to_string(), function);
    }

    /// Look up an aggregation function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn AggregateFunction>> {
        self.functions.get(name).cloned()
    }
}

impl Default for AggregateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Group by processor for aggregating tables
///
/// Rows are partitioned by the composite key built from the group
/// columns, and groups are emitted in first-occurrence order of their
/// key. An aggregation source column absent from the table produces
/// empty-string output instead of failing.
pub struct GroupByProcessor {
    group_columns: Vec<String>,
    aggregations: Vec<(String, String, Arc<dyn AggregateFunction>)>, // (output_name, source_column, function)
}

impl GroupByProcessor {
    /// Create a new group by processor
    pub fn new() -> Self {
        GroupByProcessor {
            group_columns: Vec::new(),
            aggregations: Vec::new(),
        }
    }

    /// Add a column to group by
    pub fn group_by(mut self, column: &str) -> Self {
        self.group_columns.push(column.to_string());
        self
    }

    /// Add an aggregation
    pub fn aggregate(
        mut self,
        output_name: &str,
        source_column: &str,
        function: Arc<dyn AggregateFunction>,
    ) -> Self {
        self.aggregations.push((
            output_name.to_string(),
            source_column.to_string(),
            function,
        ));
        self
    }

    /// Add a sum aggregation
    pub fn sum(self, output_name: &str, source_column: &str) -> Self {
        self.aggregate(output_name, source_column, Arc::new(SumFunction))
    }

    /// Add an average aggregation
    pub fn avg(self, output_name: &str, source_column: &str) -> Self {
        self.aggregate(output_name, source_column, Arc::new(AvgFunction))
    }

    /// Add a count aggregation
    pub fn count(self, output_name: &str, source_column: &str) -> Self {
        self.aggregate(output_name, source_column, Arc::new(CountFunction))
    }

    /// Add a min aggregation
    pub fn min(self, output_name: &str, source_column: &str) -> Self {
        self.aggregate(output_name, source_column, Arc::new(MinFunction))
    }

    /// Add a max aggregation
    pub fn max(self, output_name: &str, source_column: &str) -> Self {
        self.aggregate(output_name, source_column, Arc::new(MaxFunction))
    }
}

impl Default for GroupByProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableProcessor for GroupByProcessor {
    fn process(&self, input: &Table) -> Result<Table, ProcessingError> {
        if self.group_columns.is_empty() && self.aggregations.is_empty() {
            return Err(ProcessingError::InvalidArgument(
                "group by requires at least one group column or aggregation".to_string(),
            ));
        }

        // Partition rows; key_order pins first-occurrence emission order
        let mut key_order: Vec<Vec<String>> = Vec::new();
        let mut groups: HashMap<Vec<String>, Vec<usize>> = HashMap::new();

        for row in 0..input.row_count() {
            let key: Vec<String> = self
                .group_columns
                .iter()
                .map(|column| input.get_cell(column, row).to_string())
                .collect();

            if !groups.contains_key(&key) {
                key_order.push(key.clone());
            }
            groups.entry(key).or_default().push(row);
        }

        let mut result = Table::new();

        for (position, column) in self.group_columns.iter().enumerate() {
            let values: Vec<String> = key_order.iter().map(|key| key[position].clone()).collect();
            result.add_column(column.clone(), values)?;
        }

        for (output_name, source_column, function) in &self.aggregations {
            let values: Vec<String> = if input.has_column(source_column) {
                key_order
                    .iter()
                    .map(|key| {
                        let cells: Vec<String> = groups[key]
                            .iter()
                            .map(|&row| input.get_cell(source_column, row).to_string())
                            .collect();
                        function.apply(&cells)
                    })
                    .collect()
            } else {
                vec![String::new(); key_order.len()]
            };

            result.add_column(output_name.clone(), values)?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "group_by"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Aggregate
    }
}
