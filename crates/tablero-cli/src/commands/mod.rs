pub mod fetch;
pub mod improve;
pub mod layouts;
pub mod parse;
pub mod projects;

use std::path::{Path, PathBuf};

use tablero_core::config::AppConfig;
use tablero_core::error::TableroError;
use tablero_core::extraction::json::JsonCanvasSource;
use tablero_core::extraction::xlsx::{self, XlsxCanvasSource};
use tablero_core::layout::{self, builtin, schema::CanvasLayout};
use tablero_core::model::{CanvasDocument, CanvasMeta};
use tablero_core::{load_canvas, parsing};

use crate::{output, LayoutArgs, OutputArgs};

/// Layout from the command line, falling back to the configured one.
pub fn resolve_layout(config: &AppConfig, args: &LayoutArgs) -> Result<CanvasLayout, TableroError> {
    match (&args.layout_file, &args.layout) {
        (Some(path), _) => layout::load_layout(path),
        (None, Some(preset)) => builtin::load_preset(preset),
        (None, None) => config.layout(),
    }
}

/// Build a canvas from a local workbook or saved payload.
///
/// JSON payloads are named after the file stem; workbooks after the sheet
/// that was read.
pub fn canvas_from_file(
    input_file: &Path,
    sheet: Option<String>,
    meta_file: Option<PathBuf>,
    layout: &CanvasLayout,
) -> Result<CanvasDocument, TableroError> {
    if is_json(input_file) {
        let sheet_id = sheet.unwrap_or_else(|| file_stem(input_file));
        let source = JsonCanvasSource::new(input_file);
        return load_canvas(&source, &sheet_id, layout);
    }

    let bytes = std::fs::read(input_file)?;
    let meta = meta_file.as_deref().map(read_meta).transpose()?;

    let sheet_id = match sheet {
        Some(name) => name,
        None => xlsx::sheet_names(&bytes)?
            .into_iter()
            .next()
            .ok_or_else(|| TableroError::Spreadsheet("workbook has no sheets".into()))?,
    };

    let source = XlsxCanvasSource::new(bytes, meta);
    load_canvas(&source, &sheet_id, layout)
}

fn read_meta(path: &Path) -> Result<CanvasMeta, TableroError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Print the canvas, or save it as JSON when `--out` is given.
pub fn emit_canvas(
    doc: &CanvasDocument,
    layout: &CanvasLayout,
    args: &OutputArgs,
) -> Result<(), TableroError> {
    match &args.out {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(doc)?;
            std::fs::write(path, json)?;
            eprintln!("Canvas '{}' written to {}", doc.title, path.display());
            let pending = count_pending(doc, &layout.placeholder);
            if pending > 0 {
                eprintln!("  {pending} field(s) pending definition");
            }
        }
        None => match args.output.as_str() {
            "json" => output::json::print(doc)?,
            _ => output::table::print_canvas(doc, layout),
        },
    }
    Ok(())
}

fn count_pending(doc: &CanvasDocument, placeholder: &str) -> usize {
    let placeholder = parsing::clean(placeholder);
    let tables = doc
        .cost_table
        .iter()
        .chain(doc.finance_table.iter())
        .flat_map(|t| t.rows.iter().map(|r| r.value.as_str()));

    doc.top
        .values()
        .chain(doc.mid.values())
        .map(String::as_str)
        .chain(tables)
        .filter(|v| parsing::clean(v) == placeholder)
        .count()
}
