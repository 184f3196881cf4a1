pub mod builtin;
pub mod schema;

use crate::error::TableroError;
use crate::parsing::normalize::norm;
use schema::{CanvasLayout, TableSpec, TeamField};
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<CanvasLayout, TableroError> {
    let content = std::fs::read_to_string(path).map_err(|e| TableroError::Layout {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<CanvasLayout, TableroError> {
    let layout: CanvasLayout = serde_json::from_str(json).map_err(|e| TableroError::Layout {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<CanvasLayout, TableroError> {
    let layout: CanvasLayout = serde_json::from_str(json).map_err(TableroError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &CanvasLayout) -> Result<(), TableroError> {
    if layout.placeholder.trim().is_empty() {
        return Err(TableroError::LayoutInvalid(
            "placeholder must not be empty".into(),
        ));
    }

    check_titles("top_titles", &layout.top_titles)?;
    check_titles("mid_titles", &layout.mid_titles)?;

    if !contains_title(&layout.top_titles, &layout.team_title) {
        return Err(TableroError::LayoutInvalid(format!(
            "team_title '{}' is not one of the top titles",
            layout.team_title
        )));
    }

    check_table("cost_table", &layout.cost_table, &layout.mid_titles)?;
    check_table("finance_table", &layout.finance_table, &layout.mid_titles)?;

    if norm(&layout.address_label).is_empty() {
        return Err(TableroError::LayoutInvalid(
            "address_label must not be empty".into(),
        ));
    }

    for field in TeamField::ALL {
        let label = layout.team.get(field);
        if label.names.iter().all(|n| norm(n).is_empty()) {
            return Err(TableroError::LayoutInvalid(format!(
                "team label '{}' has no accepted spelling",
                label.display
            )));
        }
    }

    if layout.neighbor_scan == 0 {
        return Err(TableroError::LayoutInvalid(
            "neighbor_scan must be at least 1".into(),
        ));
    }

    if layout.address_scan_rows == 0 {
        return Err(TableroError::LayoutInvalid(
            "address_scan_rows must be at least 1".into(),
        ));
    }

    Ok(())
}

fn check_titles(field: &str, titles: &[String]) -> Result<(), TableroError> {
    if titles.is_empty() {
        return Err(TableroError::LayoutInvalid(format!(
            "{field} must not be empty"
        )));
    }

    let mut seen = HashSet::new();
    for title in titles {
        let key = norm(title);
        if key.is_empty() {
            return Err(TableroError::LayoutInvalid(format!(
                "{field} contains a blank title"
            )));
        }
        if !seen.insert(key) {
            return Err(TableroError::LayoutInvalid(format!(
                "{field} contains '{title}' more than once"
            )));
        }
    }

    Ok(())
}

fn check_table(field: &str, spec: &TableSpec, mid_titles: &[String]) -> Result<(), TableroError> {
    if !contains_title(mid_titles, &spec.section) {
        return Err(TableroError::LayoutInvalid(format!(
            "{field} section '{}' is not one of the mid titles",
            spec.section
        )));
    }

    if spec.labels.is_empty() {
        return Err(TableroError::LayoutInvalid(format!(
            "{field} labels must not be empty"
        )));
    }

    if spec.labels.iter().any(|l| norm(l).is_empty()) {
        return Err(TableroError::LayoutInvalid(format!(
            "{field} contains a blank label"
        )));
    }

    Ok(())
}

fn contains_title(titles: &[String], title: &str) -> bool {
    let key = norm(title);
    titles.iter().any(|t| norm(t) == key)
}
