use crate::layout::schema::TableSpec;
use crate::model::{Grid, MiniTable, TableRow};
use crate::parsing::normalize::{after_colon, clean, norm, starts_with_label};

const BLOCK_SEPARATOR: &str = "\n\n";

/// Join every non-empty cell of `col` in `start..end`, separated by a
/// blank line. Empty cells are dropped rather than kept as blank entries.
pub fn read_column_block(grid: &Grid, col: usize, start: usize, end: usize) -> String {
    (start..end)
        .map(|r| clean(grid.cell(r, col)))
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Narrative text of a column plus the small table embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAndTable {
    pub text: String,
    pub table: Option<MiniTable>,
}

/// Split a column into narrative text and a labelled table.
///
/// The table header cell (if the table has one) is consumed without
/// output. A cell matching one of the labels, either exactly or as
/// `LABEL: value`, records a value for that label; the first match per
/// label wins. Everything else is narrative.
///
/// The table is present when the header was seen or any label matched,
/// and then always lists every label, using `placeholder` for the ones
/// without a value.
pub fn read_block_and_table(
    grid: &Grid,
    col: usize,
    start: usize,
    end: usize,
    spec: &TableSpec,
    neighbor_scan: usize,
    placeholder: &str,
) -> BlockAndTable {
    let header = spec.header.as_deref().map(norm).filter(|h| !h.is_empty());
    let labels: Vec<String> = spec.labels.iter().map(|l| norm(l)).collect();

    let mut found: Vec<Option<String>> = vec![None; labels.len()];
    let mut narrative = Vec::new();
    let mut saw_header = false;

    for r in start..end {
        let cell = clean(grid.cell(r, col));
        if cell.is_empty() {
            continue;
        }
        let key = norm(cell);

        if header.as_deref() == Some(key.as_str()) {
            saw_header = true;
            continue;
        }

        if let Some(idx) = match_label(cell, &key, &labels) {
            if found[idx].is_none() {
                let value = pick_neighbor_value(grid.row(r), col, neighbor_scan);
                found[idx] = Some(if value.is_empty() {
                    placeholder.to_string()
                } else {
                    value
                });
            }
            continue;
        }

        narrative.push(cell);
    }

    let table = if saw_header || found.iter().any(Option::is_some) {
        let rows = spec
            .labels
            .iter()
            .zip(found)
            .map(|(label, value)| TableRow {
                label: label.clone(),
                value: value.unwrap_or_else(|| placeholder.to_string()),
            })
            .collect();
        Some(MiniTable {
            title: spec.title.clone(),
            rows,
        })
    } else {
        None
    };

    BlockAndTable {
        text: narrative.join(BLOCK_SEPARATOR),
        table,
    }
}

/// Which label a cell names, if any: `LABEL` or `LABEL: ...`.
fn match_label(cell: &str, key: &str, labels: &[String]) -> Option<usize> {
    labels
        .iter()
        .position(|label| key == label || starts_with_label(cell, label))
}

/// Value for a table label found at `row[col]`.
///
/// Looks right first, then falls back to the label cell's own
/// `LABEL: value` text. Returns `""` when neither rule finds anything.
pub fn pick_neighbor_value(row: &[String], col: usize, span: usize) -> String {
    scan_right(row, col, span)
        .or_else(|| same_cell_value(row, col))
        .unwrap_or_default()
}

/// First non-empty cell in `col+1..=col+span`. Tolerates values pushed
/// right by merged or empty cells.
pub fn scan_right(row: &[String], col: usize, span: usize) -> Option<String> {
    (1..=span)
        .filter_map(|k| row.get(col + k))
        .map(|c| clean(c))
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// Text after the first colon of the label cell itself.
pub fn same_cell_value(row: &[String], col: usize) -> Option<String> {
    let cell = row.get(col)?;
    after_colon(clean(cell)).map(str::to_string)
}
