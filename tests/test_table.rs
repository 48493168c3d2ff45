// Table storage tests

use tabular_engine::table::{Table, TableError};

#[test]
fn test_row_count_tracks_longest_column() {
    let mut table = Table::new();
    table
        .add_column("a", vec!["1".to_string(), "2".to_string()])
        .unwrap();
    assert_eq!(table.row_count(), 2);

    table
        .add_column(
            "b",
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        )
        .unwrap();
    assert_eq!(table.row_count(), 3);

    // Shorter column: row count unchanged, column padded
    table.add_column("c", vec!["only".to_string()]).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.get_cell("c", 1), "");
    assert_eq!(table.get_cell("c", 2), "");
}

#[test]
fn test_get_cell_reads_empty_past_stored_length() {
    let mut table = Table::new();
    table.add_column("a", vec!["1".to_string()]).unwrap();
    table
        .add_column("b", vec!["x".to_string(), "y".to_string(), "z".to_string()])
        .unwrap();

    // "a" stays under-allocated but reads as empty up to the row count
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.get_cell("a", 0), "1");
    assert_eq!(table.get_cell("a", 1), "");
    assert_eq!(table.get_cell("a", 2), "");
    assert_eq!(table.get_cell("a", 99), "");
    assert_eq!(table.get_cell("missing", 0), "");
}

#[test]
fn test_add_row_creates_columns_and_increments_once() {
    let mut table = Table::new();
    table.add_row(&[("name", "Alice"), ("age", "30")]);
    table.add_row(&[("name", "Bob"), ("city", "Lyon")]);

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.column_names(), vec!["name", "age", "city"]);

    // "age" was not named in the second row and reads as empty there;
    // "city" did not exist for the first row
    assert_eq!(table.get_cell("age", 1), "");
    assert_eq!(table.get_cell("city", 0), "");
    assert_eq!(table.get_cell("city", 1), "Lyon");
}

#[test]
fn test_duplicate_column_is_an_error() {
    let mut table = Table::new();
    table.add_column("a", vec!["1".to_string()]).unwrap();

    let err = table.add_column("a", vec!["2".to_string()]).unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn(name) if name == "a"));
}

#[test]
fn test_get_column() {
    let mut table = Table::new();
    table
        .add_column("a", vec!["1".to_string(), "2".to_string()])
        .unwrap();

    assert_eq!(table.get_column("a").unwrap(), &["1", "2"]);
    assert!(matches!(
        table.get_column("missing"),
        Err(TableError::ColumnNotFound(_))
    ));
}

#[test]
fn test_computed_column_mutates_in_place() {
    let mut table = Table::new();
    table.add_row(&[("a", "2"), ("b", "3")]);
    table.add_row(&[("a", "10"), ("b", "4")]);

    table
        .add_computed_column("concat", |row| format!("{}-{}", row.get("a"), row.get("b")))
        .unwrap();

    assert_eq!(table.column_count(), 3);
    assert_eq!(table.get_cell("concat", 0), "2-3");
    assert_eq!(table.get_cell("concat", 1), "10-4");
}

#[test]
fn test_display_renders_headers_and_rows() {
    let mut table = Table::new();
    table.add_row(&[("a", "1"), ("b", "x")]);
    table.add_row(&[("a", "2"), ("b", "y")]);

    let text = table.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["a\tb", "1\tx", "2\ty"]);
}
