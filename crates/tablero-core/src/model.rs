use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::TableroError;

/// A loosely rectangular table of spreadsheet cells.
///
/// Rows may have different lengths. Any out-of-range access yields the
/// empty string, so callers never have to bounds-check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Value>", into = "Vec<Vec<String>>")]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Grid
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Grid {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Raw cell text, or `""` when the row or column does not exist.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The cells of one row, or an empty slice past the end of the grid.
    pub fn row(&self, row: usize) -> &[String] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Only string cells carry text; numbers, booleans, nulls and nested
/// values read as empty. A row that is not an array reads as an empty row.
impl From<Vec<Value>> for Grid {
    fn from(raw: Vec<Value>) -> Self {
        let rows = raw
            .into_iter()
            .map(|row| match row {
                Value::Array(cells) => cells
                    .into_iter()
                    .map(|cell| match cell {
                        Value::String(s) => s,
                        _ => String::new(),
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .collect();
        Grid { rows }
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

/// Side-channel metadata delivered together with a canvas grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMeta {
    #[serde(
        default,
        alias = "dirResponsable",
        deserialize_with = "string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub responsible_director: Option<String>,
    #[serde(
        default,
        alias = "liderFuncional",
        deserialize_with = "string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub functional_lead: Option<String>,
    #[serde(
        default,
        alias = "tirVpn",
        deserialize_with = "string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub financial_ratio_display: Option<String>,
}

fn string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Grid plus metadata, as returned by a canvas source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanvasPayload {
    pub rows: Grid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<CanvasMeta>,
}

impl CanvasPayload {
    /// Decode a canvas endpoint body.
    ///
    /// Accepts either a bare array of rows or an object `{rows, meta}`.
    /// A missing or non-array `rows` decodes as an empty grid.
    pub fn from_json(bytes: &[u8]) -> Result<CanvasPayload, TableroError> {
        let value: Value = serde_json::from_slice(bytes)?;
        match value {
            rows @ Value::Array(_) => Ok(CanvasPayload {
                rows: serde_json::from_value(rows)?,
                meta: None,
            }),
            Value::Object(mut map) => {
                let rows = match map.remove("rows") {
                    Some(rows @ Value::Array(_)) => serde_json::from_value(rows)?,
                    _ => Grid::default(),
                };
                let meta = match map.remove("meta") {
                    Some(meta @ Value::Object(_)) => Some(serde_json::from_value(meta)?),
                    _ => None,
                };
                Ok(CanvasPayload { rows, meta })
            }
            _ => Ok(CanvasPayload::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

/// A small fixed-shape table of labelled values, e.g. cost by area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniTable {
    pub title: String,
    pub rows: Vec<TableRow>,
}

impl MiniTable {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// The assembled, placeholder-filled canvas for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    pub title: String,
    pub address: String,
    pub responsible_director: String,
    pub functional_lead: String,
    pub financial_ratio_display: String,
    pub top: BTreeMap<String, String>,
    pub mid: BTreeMap<String, String>,
    pub cost_table: Option<MiniTable>,
    pub finance_table: Option<MiniTable>,
}

impl CanvasDocument {
    /// Whether the address is long enough to be shown collapsed.
    pub fn has_long_address(&self, threshold: usize) -> bool {
        self.address.chars().count() > threshold
    }
}
