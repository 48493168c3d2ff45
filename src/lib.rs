// Tabular Engine

//! # Tabular Engine
//!
//! An in-memory tabular data engine. Tables are named columns of text
//! cells sharing a row count; every operation takes one or two tables and
//! produces a new one.
//!
//! ## Features
//!
//! - Grouping and aggregation with built-in and user-supplied reducers
//! - Filtering, selection, renaming and computed columns
//! - Multi-key stable sorting with numeric-aware comparison
//! - Reshaping between wide and long formats (melt / cast)
//! - Inner, left, right and full equi-joins
//! - Two-dimensional pivot tables
//! - CSV and JSON import/export, text rendering
//!
//! ## Example
//!
//! ```rust
//! use tabular_engine::{
//!     processing::{GroupByProcessor, SortProcessor, TableProcessor},
//!     table::Table,
//! };
//!
//! let mut sales = Table::new();
//! sales.add_row(&[("Region", "North"), ("Sales", "100")]);
//! sales.add_row(&[("Region", "South"), ("Sales", "150")]);
//! sales.add_row(&[("Region", "North"), ("Sales", "120")]);
//!
//! let totals = GroupByProcessor::new()
//!     .group_by("Region")
//!     .sum("TotalSales", "Sales")
//!     .process(&sales)
//!     .unwrap();
//!
//! assert_eq!(totals.get_cell("TotalSales", 0), "220.0");
//!
//! let sorted = SortProcessor::by("TotalSales", true).process(&totals).unwrap();
//! assert_eq!(sorted.get_cell("Region", 0), "North");
//! ```

pub mod io;
pub mod processing;
pub mod render;
pub mod table;
pub mod utils;

// Re-export main types
pub use processing::{
    AggregateFunction, AggregateRegistry, GroupByProcessor, JoinProcessor, JoinType, Pipeline,
    Pivot, TableProcessor,
};
pub use table::{RowView, Table, TableError};
pub use utils::{AppError, AppResult};
