pub mod http;
pub mod json;
pub mod xlsx;

use crate::error::TableroError;
use crate::model::CanvasPayload;

/// Trait for canvas data providers: given a sheet identifier, return the
/// grid and its metadata.
pub trait CanvasSource: Send + Sync {
    /// Fetch the grid and metadata for one canvas sheet.
    fn fetch(&self, sheet_id: &str) -> Result<CanvasPayload, TableroError>;

    /// Name of this source (for diagnostics).
    fn backend_name(&self) -> &str;
}
