use std::collections::BTreeMap;

use crate::error::TableroError;
use crate::layout::schema::{CanvasLayout, TableSpec};
use crate::model::{CanvasDocument, CanvasMeta, CanvasPayload, Grid, MiniTable};
use crate::parsing::{
    build_team_content, extract_address, find_col_index, find_row_index_by_titles, norm,
    prettify_title, read_block_and_table, read_column_block, BlockAndTable,
};

/// Assemble the canvas document for one sheet.
///
/// Pure and total: missing header rows leave their section empty, missing
/// columns and empty blocks become the layout placeholder. Running it twice
/// on the same input gives identical documents.
pub fn build_canvas(
    grid: &Grid,
    meta: Option<&CanvasMeta>,
    source_id: &str,
    layout: &CanvasLayout,
) -> CanvasDocument {
    let top_header = find_row_index_by_titles(grid, &layout.top_titles);
    let mid_header = find_row_index_by_titles(grid, &layout.mid_titles);
    tracing::debug!(
        source_id,
        rows = grid.len(),
        ?top_header,
        ?mid_header,
        "located canvas header rows"
    );

    let mut doc = CanvasDocument {
        title: prettify_title(source_id),
        address: extract_address(grid, &layout.address_label, layout.address_scan_rows),
        responsible_director: meta
            .and_then(|m| m.responsible_director.clone())
            .unwrap_or_default(),
        functional_lead: meta
            .and_then(|m| m.functional_lead.clone())
            .unwrap_or_default(),
        financial_ratio_display: meta
            .and_then(|m| m.financial_ratio_display.clone())
            .unwrap_or_default(),
        top: BTreeMap::new(),
        mid: BTreeMap::new(),
        cost_table: None,
        finance_table: None,
    };

    if let Some(header) = top_header {
        let end = mid_header.unwrap_or(grid.len());
        doc.top = read_top_section(grid, meta, header, end, layout);
    }

    if let Some(header) = mid_header {
        let mid = read_mid_section(grid, header, layout);
        doc.mid = mid.texts;
        doc.cost_table = mid.cost_table;
        doc.finance_table = mid.finance_table;
    }

    doc
}

/// Build the canvas from a fetched payload.
///
/// An empty grid is the "no canvas data" state and is reported as an error
/// instead of producing a document full of placeholders.
pub fn canvas_from_payload(
    payload: &CanvasPayload,
    source_id: &str,
    layout: &CanvasLayout,
) -> Result<CanvasDocument, TableroError> {
    if payload.rows.is_empty() {
        return Err(TableroError::EmptyCanvas(source_id.to_string()));
    }
    Ok(build_canvas(
        &payload.rows,
        payload.meta.as_ref(),
        source_id,
        layout,
    ))
}

fn read_top_section(
    grid: &Grid,
    meta: Option<&CanvasMeta>,
    header: usize,
    end: usize,
    layout: &CanvasLayout,
) -> BTreeMap<String, String> {
    let header_row = grid.row(header);
    let team_key = norm(&layout.team_title);
    let mut top = BTreeMap::new();

    for title in &layout.top_titles {
        let text = find_col_index(header_row, title)
            .map(|col| read_column_block(grid, col, header + 1, end))
            .unwrap_or_default();

        // The team entry is always the merged narrative, even when the
        // column is missing or empty, so metadata-only team data shows up.
        let text = if norm(title) == team_key {
            build_team_content(&text, meta, &layout.team, &layout.placeholder)
        } else {
            or_placeholder(text, &layout.placeholder)
        };
        top.insert(title.clone(), text);
    }

    top
}

struct MidSection {
    texts: BTreeMap<String, String>,
    cost_table: Option<MiniTable>,
    finance_table: Option<MiniTable>,
}

fn read_mid_section(grid: &Grid, header: usize, layout: &CanvasLayout) -> MidSection {
    let header_row = grid.row(header);
    let (start, end) = (header + 1, grid.len());
    let mut section = MidSection {
        texts: BTreeMap::new(),
        cost_table: None,
        finance_table: None,
    };

    for title in &layout.mid_titles {
        let Some(col) = find_col_index(header_row, title) else {
            section
                .texts
                .insert(title.clone(), layout.placeholder.clone());
            continue;
        };

        let text = if is_section(title, &layout.cost_table) {
            let out = read_table(grid, col, start, end, &layout.cost_table, layout);
            section.cost_table = out.table;
            out.text
        } else if is_section(title, &layout.finance_table) {
            let out = read_table(grid, col, start, end, &layout.finance_table, layout);
            section.finance_table = out.table;
            out.text
        } else {
            read_column_block(grid, col, start, end)
        };

        section
            .texts
            .insert(title.clone(), or_placeholder(text, &layout.placeholder));
    }

    section
}

fn read_table(
    grid: &Grid,
    col: usize,
    start: usize,
    end: usize,
    spec: &TableSpec,
    layout: &CanvasLayout,
) -> BlockAndTable {
    let out = read_block_and_table(
        grid,
        col,
        start,
        end,
        spec,
        layout.neighbor_scan,
        &layout.placeholder,
    );
    tracing::debug!(
        section = %spec.section,
        table = out.table.is_some(),
        "read table column"
    );
    out
}

fn is_section(title: &str, spec: &TableSpec) -> bool {
    norm(title) == norm(&spec.section)
}

fn or_placeholder(text: String, placeholder: &str) -> String {
    if text.trim().is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}
