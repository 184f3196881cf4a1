use tablero_core::config::AppConfig;
use tablero_core::error::TableroError;
use tablero_core::extraction::http::HttpCanvasSource;
use tablero_core::load_canvas;

use super::{emit_canvas, resolve_layout};
use crate::{LayoutArgs, OutputArgs};

pub fn run(
    config: &AppConfig,
    sheet_id: &str,
    base_url: Option<String>,
    layout_args: &LayoutArgs,
    output_args: &OutputArgs,
) -> Result<(), TableroError> {
    let layout = resolve_layout(config, layout_args)?;
    let base_url = base_url.unwrap_or_else(|| config.api.base_url.clone());
    let source = HttpCanvasSource::new(base_url, config.timeout())?;

    let doc = load_canvas(&source, sheet_id, &layout)?;
    emit_canvas(&doc, &layout, output_args)
}
