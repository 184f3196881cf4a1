pub mod canvas;
pub mod config;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod notes;
pub mod parsing;
pub mod portfolio;
pub mod suggest;

pub use canvas::{build_canvas, canvas_from_payload};

use error::TableroError;
use extraction::CanvasSource;
use layout::schema::CanvasLayout;
use model::CanvasDocument;

/// Main API entry point: fetch a sheet from a source and build its canvas.
///
/// The sheet identifier both selects the sheet in the source and becomes
/// the document title.
pub fn load_canvas(
    source: &dyn CanvasSource,
    sheet_id: &str,
    layout: &CanvasLayout,
) -> Result<CanvasDocument, TableroError> {
    let payload = source.fetch(sheet_id)?;
    tracing::info!(
        backend = source.backend_name(),
        sheet_id,
        rows = payload.rows.len(),
        has_meta = payload.meta.is_some(),
        "fetched canvas payload"
    );
    canvas_from_payload(&payload, sheet_id, layout)
}
