// Aggregation function and group-by tests

use std::sync::Arc;

use tabular_engine::processing::{
    AggregateFunction, AggregateRegistry, AvgFunction, CountFunction, GroupByProcessor,
    MaxFunction, MinFunction, SumFunction, TableProcessor,
};
use tabular_engine::table::Table;

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn sample_sales() -> Table {
    let mut table = Table::new();
    table.add_row(&[("Region", "North"), ("Product", "Apples"), ("Sales", "100")]);
    table.add_row(&[("Region", "North"), ("Product", "Oranges"), ("Sales", "150")]);
    table.add_row(&[("Region", "South"), ("Product", "Apples"), ("Sales", "200")]);
    table.add_row(&[("Region", "South"), ("Product", "Oranges"), ("Sales", "250")]);
    table.add_row(&[("Region", "East"), ("Product", "Apples"), ("Sales", "300")]);
    table.add_row(&[("Region", "East"), ("Product", "Oranges"), ("Sales", "120")]);
    table.add_row(&[("Region", "West"), ("Product", "Apples"), ("Sales", "180")]);
    table.add_row(&[("Region", "West"), ("Product", "Oranges"), ("Sales", "90")]);
    table
}

#[test]
fn test_sum() {
    assert_eq!(SumFunction.apply(&[]), "0");
    assert_eq!(SumFunction.apply(&cells(&["10", "20", "30"])), "60.0");
    // One bad cell poisons the whole sum
    assert_eq!(SumFunction.apply(&cells(&["10", "invalid", "30"])), "0");
    assert_eq!(SumFunction.apply(&cells(&["1.5", "2.25"])), "3.75");
}

#[test]
fn test_avg() {
    assert_eq!(AvgFunction.apply(&[]), "0");
    assert_eq!(AvgFunction.apply(&cells(&["10", "20", "30"])), "20.0");
    assert_eq!(AvgFunction.apply(&cells(&["10", "x", "30"])), "0");
}

#[test]
fn test_count() {
    assert_eq!(CountFunction.apply(&[]), "0");
    assert_eq!(CountFunction.apply(&cells(&["10", "20", "30"])), "3");
    assert_eq!(CountFunction.apply(&cells(&["a", "", "c"])), "3");
}

#[test]
fn test_max() {
    assert_eq!(MaxFunction.apply(&[]), "");
    assert_eq!(MaxFunction.apply(&cells(&["10", "20", "30"])), "30.0");
    assert_eq!(MaxFunction.apply(&cells(&["a", "b", "c"])), "c");
    // A single bad value switches the whole group to lexicographic
    assert_eq!(MaxFunction.apply(&cells(&["10", "9", "oops"])), "oops");
}

#[test]
fn test_min() {
    assert_eq!(MinFunction.apply(&[]), "");
    assert_eq!(MinFunction.apply(&cells(&["10", "20", "30"])), "10.0");
    assert_eq!(MinFunction.apply(&cells(&["a", "b", "c"])), "a");
    // Lexicographic fallback: "10" < "9" as strings
    assert_eq!(MinFunction.apply(&cells(&["10", "9", "oops"])), "10");
}

#[test]
fn test_registry_builtins_and_user_function() {
    let mut registry = AggregateRegistry::new();
    for name in ["sum", "avg", "count", "max", "min"] {
        assert!(registry.get(name).is_some(), "missing builtin '{}'", name);
    }
    assert!(registry.get("median").is_none());

    struct FirstFunction;
    impl AggregateFunction for FirstFunction {
        fn name(&self) -> &str {
            "first"
        }
        fn apply(&self, values: &[String]) -> String {
            values.first().cloned().unwrap_or_default()
        }
    }

    registry.register(Arc::new(FirstFunction));
    let first = registry.get("first").unwrap();
    assert_eq!(first.apply(&cells(&["a", "b"])), "a");
}

#[test]
fn test_group_by_region_totals() {
    let result = GroupByProcessor::new()
        .group_by("Region")
        .sum("TotalSales", "Sales")
        .process(&sample_sales())
        .unwrap();

    assert_eq!(result.row_count(), 4);
    // Groups come out in first-occurrence order
    assert_eq!(result.get_column("Region").unwrap(), &["North", "South", "East", "West"]);
    assert_eq!(result.get_cell("TotalSales", 0), "250.0");
    assert_eq!(result.get_cell("TotalSales", 2), "420.0");
}

#[test]
fn test_group_by_composite_key() {
    let mut table = Table::new();
    // Cells containing the old "||" delimiter must not collide
    table.add_row(&[("a", "x||"), ("b", "y"), ("v", "1")]);
    table.add_row(&[("a", "x"), ("b", "||y"), ("v", "2")]);

    let result = GroupByProcessor::new()
        .group_by("a")
        .group_by("b")
        .count("n", "v")
        .process(&table)
        .unwrap();

    assert_eq!(result.row_count(), 2);
    assert_eq!(result.get_cell("n", 0), "1");
    assert_eq!(result.get_cell("n", 1), "1");
}

#[test]
fn test_group_by_missing_source_column_yields_empty() {
    let result = GroupByProcessor::new()
        .group_by("Region")
        .sum("Total", "NoSuchColumn")
        .process(&sample_sales())
        .unwrap();

    assert_eq!(result.row_count(), 4);
    for row in 0..4 {
        assert_eq!(result.get_cell("Total", row), "");
    }
}

#[test]
fn test_group_by_multiple_aggregations() {
    let result = GroupByProcessor::new()
        .group_by("Product")
        .count("Count", "Sales")
        .min("Lowest", "Sales")
        .max("Highest", "Sales")
        .avg("Average", "Sales")
        .process(&sample_sales())
        .unwrap();

    assert_eq!(result.row_count(), 2);
    assert_eq!(result.get_cell("Product", 0), "Apples");
    assert_eq!(result.get_cell("Count", 0), "4");
    assert_eq!(result.get_cell("Lowest", 0), "100.0");
    assert_eq!(result.get_cell("Highest", 0), "300.0");
    assert_eq!(result.get_cell("Average", 0), "195.0");
}

#[test]
fn test_group_by_requires_something_to_do() {
    assert!(GroupByProcessor::new().process(&sample_sales()).is_err());
}
