use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TableroError {
    #[error("failed to load layout from {path}: {reason}")]
    Layout { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("unknown layout preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("no canvas data for '{0}'")]
    EmptyCanvas(String),

    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        url: String,
        status: u16,
        message: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("could not generate the analysis: {0}")]
    Suggestion(String),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
