use std::path::PathBuf;

use serde::Serialize;
use tablero_core::config::AppConfig;
use tablero_core::error::TableroError;
use tablero_core::extraction::http::HttpCanvasSource;
use tablero_core::load_canvas;
use tablero_core::model::CanvasDocument;
use tablero_core::notes::AnnotationStore;
use tablero_core::suggest::{annotate, Annotation, HttpSuggestionClient};

use super::{canvas_from_file, resolve_layout};
use crate::{output, LayoutArgs};

#[derive(Serialize)]
struct ImproveReport<'a> {
    canvas: &'a CanvasDocument,
    #[serde(flatten)]
    annotation: &'a Annotation,
    notes: &'a AnnotationStore,
}

pub fn run(
    config: &AppConfig,
    input_file: Option<PathBuf>,
    remote: Option<String>,
    sheet: Option<String>,
    note_keys: &[String],
    layout_args: &LayoutArgs,
    output_format: &str,
) -> Result<(), TableroError> {
    let layout = resolve_layout(config, layout_args)?;

    let doc = match (remote, input_file) {
        (Some(sheet_id), _) => {
            let source = HttpCanvasSource::new(config.api.base_url.clone(), config.timeout())?;
            load_canvas(&source, &sheet_id, &layout)?
        }
        (None, Some(path)) => canvas_from_file(&path, sheet, None, &layout)?,
        (None, None) => {
            return Err(TableroError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "give an input file or --remote SHEET_ID",
            )))
        }
    };

    // The canvas is still shown when the service fails.
    let annotation = match HttpSuggestionClient::new(&config.api.ai_base_url, config.timeout()) {
        Ok(client) => annotate(&doc, &client),
        Err(e) => Annotation {
            analysis: None,
            error: Some(e.to_string()),
        },
    };

    let mut notes = AnnotationStore::new();
    if let Some(analysis) = &annotation.analysis {
        if note_keys.iter().any(|k| k.eq_ignore_ascii_case("all")) {
            notes.add_all(analysis);
        } else {
            for key in note_keys {
                if !notes.add_from(analysis, key) {
                    tracing::warn!(section = %key, "no suggestion to keep for section");
                }
            }
        }
    }

    match output_format {
        "json" => output::json::print(&ImproveReport {
            canvas: &doc,
            annotation: &annotation,
            notes: &notes,
        })?,
        _ => {
            output::table::print_canvas(&doc, &layout);
            output::table::print_annotation(&annotation);
            output::table::print_notes(&notes);
        }
    }

    Ok(())
}
