use crate::model::Grid;
use crate::parsing::normalize::{after_colon, clean, norm, starts_with_label};

/// Find the project address near the top of the sheet.
///
/// Scans the first `max_rows` rows cell by cell. For each cell the inline
/// form (`LABEL: value`) is tried before the next-column form (a cell that
/// is just `LABEL` or `LABEL:` with the value to its right). Returns the
/// first non-empty value, or `""`.
pub fn extract_address(grid: &Grid, label: &str, max_rows: usize) -> String {
    let label = norm(label);

    for r in 0..grid.len().min(max_rows) {
        let row = grid.row(r);
        for c in 0..row.len() {
            if let Some(value) = inline_address(&row[c], &label) {
                return value.to_string();
            }
            if let Some(value) = next_column_address(row, c, &label) {
                return value.to_string();
            }
        }
    }

    String::new()
}

/// `LABEL: value` within one cell.
fn inline_address<'a>(cell: &'a str, label: &str) -> Option<&'a str> {
    let cell = clean(cell);
    if starts_with_label(cell, label) {
        after_colon(cell)
    } else {
        None
    }
}

/// A bare `LABEL` / `LABEL:` cell followed by the value in the next column.
fn next_column_address<'a>(row: &'a [String], col: usize, label: &str) -> Option<&'a str> {
    let key = norm(&row[col]);
    let is_label = key
        .strip_prefix(label)
        .is_some_and(|rest| rest.is_empty() || rest == ":");
    if !is_label {
        return None;
    }
    let value = clean(row.get(col + 1)?);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
