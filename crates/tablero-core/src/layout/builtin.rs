use crate::error::TableroError;
use crate::layout::parse_layout_str;
use crate::layout::schema::CanvasLayout;

const CANVAS_ES_JSON: &str = include_str!("../../../../layouts/canvas-es.json");
const CANVAS_EN_JSON: &str = include_str!("../../../../layouts/canvas-en.json");

/// Available predefined layouts. The first one is the default.
pub const PRESETS: &[&str] = &["es", "en"];

pub const DEFAULT_PRESET: &str = "es";

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<CanvasLayout, TableroError> {
    match name {
        "es" => parse_layout_str(CANVAS_ES_JSON),
        "en" => parse_layout_str(CANVAS_EN_JSON),
        _ => Err(TableroError::UnknownPreset {
            name: name.to_string(),
            available: PRESETS.join(", "),
        }),
    }
}

/// The default (Spanish) layout.
pub fn default_layout() -> Result<CanvasLayout, TableroError> {
    load_preset(DEFAULT_PRESET)
}
