use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The AI service's reading of a canvas. Every field defaults so partial
/// payloads still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasAnalysis {
    pub executive_one_pager: ExecutiveOnePager,
    /// Free-text suggestion per canvas section, keyed by section title.
    pub section_suggestions: BTreeMap<String, String>,
    pub technical_report: TechnicalReport,
    /// Soft error reported by the service alongside otherwise usable data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutiveOnePager {
    pub title: Option<String>,
    pub summary_bullets: Vec<String>,
    pub value_statement: Option<String>,
    pub scope_in: Vec<String>,
    pub scope_out: Vec<String>,
    pub kpis: Vec<KpiDefinition>,
    pub risks: Vec<Risk>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiDefinition {
    pub name: String,
    pub formula: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub risk: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalReport {
    pub diagnostic: Diagnostic,
    pub architecture_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostic {
    pub missing: Vec<String>,
    pub inconsistencies: Vec<String>,
    pub assumptions: Vec<String>,
}

/// Response wrapper of the suggestion endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub ok: bool,
    pub message: Option<String>,
    pub data: Option<CanvasAnalysis>,
}
