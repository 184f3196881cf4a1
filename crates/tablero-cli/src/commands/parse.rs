use std::path::PathBuf;

use tablero_core::config::AppConfig;
use tablero_core::error::TableroError;

use super::{canvas_from_file, emit_canvas, resolve_layout};
use crate::{LayoutArgs, OutputArgs};

pub fn run(
    config: &AppConfig,
    input_file: PathBuf,
    sheet: Option<String>,
    meta: Option<PathBuf>,
    layout_args: &LayoutArgs,
    output_args: &OutputArgs,
) -> Result<(), TableroError> {
    let layout = resolve_layout(config, layout_args)?;
    let doc = canvas_from_file(&input_file, sheet, meta, &layout)?;
    emit_canvas(&doc, &layout, output_args)
}
