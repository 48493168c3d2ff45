// Equi-join tests

use tabular_engine::processing::JoinProcessor;
use tabular_engine::table::Table;

fn employees() -> Table {
    let mut table = Table::new();
    table.add_row(&[("dept", "eng"), ("name", "Alice")]);
    table.add_row(&[("dept", "ops"), ("name", "Bob")]);
    table.add_row(&[("dept", "hr"), ("name", "Carol")]);
    table
}

fn departments() -> Table {
    let mut table = Table::new();
    table.add_row(&[("dept", "eng"), ("floor", "3")]);
    table.add_row(&[("dept", "ops"), ("floor", "1")]);
    table.add_row(&[("dept", "sales"), ("floor", "2")]);
    table
}

#[test]
fn test_inner_join() {
    let result = JoinProcessor::inner(vec!["dept".to_string()])
        .process_join(&employees(), &departments())
        .unwrap();

    assert_eq!(result.column_names(), vec!["dept", "name", "floor"]);
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.get_cell("name", 0), "Alice");
    assert_eq!(result.get_cell("floor", 0), "3");
    assert_eq!(result.get_cell("floor", 1), "1");
}

#[test]
fn test_left_join_pads_missing_right() {
    let result = JoinProcessor::left(vec!["dept".to_string()])
        .process_join(&employees(), &departments())
        .unwrap();

    assert_eq!(result.row_count(), 3);
    assert_eq!(result.get_cell("name", 2), "Carol");
    assert_eq!(result.get_cell("floor", 2), "");
}

#[test]
fn test_right_join_emits_unmatched_keys() {
    let result = JoinProcessor::right(vec!["dept".to_string()])
        .process_join(&employees(), &departments())
        .unwrap();

    // Two matches plus one trailing row for the never-matched "sales" key
    assert_eq!(result.row_count(), 3);
    assert_eq!(result.get_cell("dept", 2), "sales");
    assert_eq!(result.get_cell("name", 2), "");
    assert_eq!(result.get_cell("floor", 2), "");
}

#[test]
fn test_full_join() {
    let result = JoinProcessor::full(vec!["dept".to_string()])
        .process_join(&employees(), &departments())
        .unwrap();

    assert_eq!(result.row_count(), 4);
    // Left rows first, in order, then the unmatched right key
    assert_eq!(result.get_cell("dept", 2), "hr");
    assert_eq!(result.get_cell("floor", 2), "");
    assert_eq!(result.get_cell("dept", 3), "sales");
    assert_eq!(result.get_cell("name", 3), "");
}

#[test]
fn test_join_cross_product_on_ties() {
    let mut left = Table::new();
    left.add_row(&[("k", "a"), ("l", "l1")]);

    let mut right = Table::new();
    right.add_row(&[("k", "a"), ("r", "r1")]);
    right.add_row(&[("k", "a"), ("r", "r2")]);

    let result = JoinProcessor::inner(vec!["k".to_string()])
        .process_join(&left, &right)
        .unwrap();

    assert_eq!(result.row_count(), 2);
    assert_eq!(result.get_cell("r", 0), "r1");
    assert_eq!(result.get_cell("r", 1), "r2");
}

#[test]
fn test_join_composite_key() {
    let mut left = Table::new();
    left.add_row(&[("a", "1"), ("b", "x"), ("l", "L1")]);
    left.add_row(&[("a", "1"), ("b", "y"), ("l", "L2")]);

    let mut right = Table::new();
    right.add_row(&[("a", "1"), ("b", "x"), ("r", "R1")]);

    let result = JoinProcessor::inner(vec!["a".to_string(), "b".to_string()])
        .process_join(&left, &right)
        .unwrap();

    assert_eq!(result.row_count(), 1);
    assert_eq!(result.get_cell("l", 0), "L1");
    assert_eq!(result.get_cell("r", 0), "R1");
}

#[test]
fn test_join_deduplicates_clashing_column_names() {
    let mut left = Table::new();
    left.add_row(&[("k", "a"), ("note", "left-note")]);

    let mut right = Table::new();
    right.add_row(&[("k", "a"), ("note", "right-note")]);

    let result = JoinProcessor::inner(vec!["k".to_string()])
        .process_join(&left, &right)
        .unwrap();

    assert_eq!(result.column_names(), vec!["k", "note", "note_1"]);
    assert_eq!(result.get_cell("note", 0), "left-note");
    assert_eq!(result.get_cell("note_1", 0), "right-note");
}

#[test]
fn test_join_requires_key_columns() {
    assert!(JoinProcessor::inner(Vec::new())
        .process_join(&employees(), &departments())
        .is_err());
}
