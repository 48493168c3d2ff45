// Text rendering of tables and simple charts

use crate::processing::parse_number;
use crate::table::Table;

/// Options for chart rendering
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Width of the longest bar, in characters
    pub width: usize,
    /// Character used to draw bars
    pub bar: char,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            width: 40,
            bar: '#',
        }
    }
}

/// Render a table as aligned text columns
///
/// Read-only: consumes the column order, row count and cell accessors.
pub fn render_table(table: &Table) -> String {
    let names = table.column_names();
    let mut widths: Vec<usize> = names.iter().map(|name| name.chars().count()).collect();

    for (position, name) in names.iter().enumerate() {
        for row in 0..table.row_count() {
            let len = table.get_cell(name, row).chars().count();
            if len > widths[position] {
                widths[position] = len;
            }
        }
    }

    let mut output = String::new();
    let mut header = Vec::with_capacity(names.len());
    for (position, name) in names.iter().enumerate() {
        header.push(format!("{:<width$}", name, width = widths[position]));
    }
    output.push_str(header.join("  ").trim_end());
    output.push('\n');

    for row in 0..table.row_count() {
        let mut line = Vec::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            line.push(format!(
                "{:<width$}",
                table.get_cell(name, row),
                width = widths[position]
            ));
        }
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    output
}

/// Render a horizontal bar chart from a label column and a value column
///
/// Bars scale to the largest value; cells that do not parse as numbers,
/// and negative values, draw no bar.
pub fn bar_chart(
    table: &Table,
    label_column: &str,
    value_column: &str,
    options: &ChartOptions,
) -> String {
    let rows = table.row_count();
    let labels: Vec<&str> = (0..rows).map(|row| table.get_cell(label_column, row)).collect();
    let values: Vec<f64> = (0..rows)
        .map(|row| parse_number(table.get_cell(value_column, row)).unwrap_or(0.0))
        .collect();

    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max_value = values.iter().cloned().fold(0.0f64, f64::max);

    let mut output = String::new();
    for row in 0..rows {
        let length = if max_value > 0.0 && values[row] > 0.0 {
            ((values[row] / max_value) * options.width as f64).round() as usize
        } else {
            0
        };

        let bar: String = std::iter::repeat(options.bar).take(length).collect();
        output.push_str(
            format!(
                "{:<label_width$} | {} {}",
                labels[row],
                bar,
                table.get_cell(value_column, row),
                label_width = label_width
            )
            .trim_end(),
        );
        output.push('\n');
    }

    output
}
