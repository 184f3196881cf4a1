use std::collections::HashSet;

use crate::model::Grid;
use crate::parsing::normalize::norm;

/// Index of the first row containing every title (compared normalized).
///
/// Scans top to bottom; if several rows qualify only the first is used.
pub fn find_row_index_by_titles<S: AsRef<str>>(grid: &Grid, titles: &[S]) -> Option<usize> {
    let wanted: Vec<String> = titles.iter().map(|t| norm(t.as_ref())).collect();

    grid.rows().position(|row| {
        let present: HashSet<String> = row.iter().map(|c| norm(c)).collect();
        wanted.iter().all(|t| present.contains(t))
    })
}

/// Index of the first cell in `row` equal to `title` (compared normalized).
pub fn find_col_index(row: &[String], title: &str) -> Option<usize> {
    let wanted = norm(title);
    row.iter().position(|c| norm(c) == wanted)
}
