use std::path::PathBuf;

use crate::error::TableroError;
use crate::extraction::CanvasSource;
use crate::model::CanvasPayload;

/// Canvas source reading a saved endpoint response from disk.
///
/// The file holds either `{"rows": [...], "meta": {...}}` or a bare array
/// of rows. The sheet identifier only names the result.
pub struct JsonCanvasSource {
    path: PathBuf,
}

impl JsonCanvasSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonCanvasSource { path: path.into() }
    }
}

impl CanvasSource for JsonCanvasSource {
    fn fetch(&self, _sheet_id: &str) -> Result<CanvasPayload, TableroError> {
        let bytes = std::fs::read(&self.path)?;
        CanvasPayload::from_json(&bytes)
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}
