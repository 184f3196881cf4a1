use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::TableroError;
use crate::extraction::CanvasSource;
use crate::model::{CanvasMeta, CanvasPayload, Grid};
use crate::parsing::normalize::norm;

/// Names of the worksheets in an xlsx workbook, in workbook order.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>, TableroError> {
    Ok(open(bytes)?.sheet_names())
}

/// Convert one worksheet into a grid of display strings.
///
/// Picks the first sheet when `sheet` is `None`. Positions are kept
/// absolute: a sheet whose data starts at C3 gets two empty leading rows
/// and two empty leading cells per row.
pub fn read_grid(bytes: &[u8], sheet: Option<&str>) -> Result<Grid, TableroError> {
    let mut workbook = open(bytes)?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => resolve_sheet(&names, wanted)
            .ok_or_else(|| TableroError::SheetNotFound(wanted.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| TableroError::Spreadsheet("workbook has no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| TableroError::Spreadsheet(format!("sheet '{name}': {e}")))?;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }

    tracing::debug!(sheet = %name, rows = rows.len(), "read worksheet");
    Ok(Grid::from_rows(rows))
}

fn open(bytes: &[u8]) -> Result<Xlsx<Cursor<&[u8]>>, TableroError> {
    calamine::open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| TableroError::Spreadsheet(format!("failed to open xlsx: {e}")))
}

/// Exact sheet name first, then a case/accent-insensitive match.
fn resolve_sheet(names: &[String], wanted: &str) -> Option<String> {
    names
        .iter()
        .find(|n| n.as_str() == wanted)
        .or_else(|| {
            let key = norm(wanted);
            names.iter().find(|n| norm(n) == key)
        })
        .cloned()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty | Data::Error(_) => String::new(),
        _ => format!("{cell}"),
    }
}

/// Canvas source backed by an xlsx workbook held in memory.
///
/// The sheet identifier selects the worksheet; an empty identifier reads
/// the first sheet. Metadata, if any, comes from the caller.
pub struct XlsxCanvasSource {
    bytes: Vec<u8>,
    meta: Option<CanvasMeta>,
}

impl XlsxCanvasSource {
    pub fn new(bytes: Vec<u8>, meta: Option<CanvasMeta>) -> Self {
        XlsxCanvasSource { bytes, meta }
    }
}

impl CanvasSource for XlsxCanvasSource {
    fn fetch(&self, sheet_id: &str) -> Result<CanvasPayload, TableroError> {
        let sheet = Some(sheet_id).filter(|s| !s.trim().is_empty());
        Ok(CanvasPayload {
            rows: read_grid(&self.bytes, sheet)?,
            meta: self.meta.clone(),
        })
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}
