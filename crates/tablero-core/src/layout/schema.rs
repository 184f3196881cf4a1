use serde::{Deserialize, Serialize};

/// The vocabulary of one canvas spreadsheet family: which titles head the
/// two sections, which columns carry tables, and how the team block and
/// address are labelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasLayout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Text used for any declared field with no data.
    pub placeholder: String,
    /// Titles that must all appear in the top header row, in display order.
    pub top_titles: Vec<String>,
    /// Titles that must all appear in the mid header row, in display order.
    pub mid_titles: Vec<String>,
    /// Top title whose block is merged with metadata into the team narrative.
    pub team_title: String,
    pub cost_table: TableSpec,
    pub finance_table: TableSpec,
    pub address_label: String,
    pub team: TeamLabels,
    /// How many cells to the right of a table label to look for its value.
    #[serde(default = "default_neighbor_scan")]
    pub neighbor_scan: usize,
    #[serde(default = "default_address_scan_rows")]
    pub address_scan_rows: usize,
    #[serde(default = "default_long_address_threshold")]
    pub long_address_threshold: usize,
}

fn default_neighbor_scan() -> usize {
    5
}

fn default_address_scan_rows() -> usize {
    12
}

fn default_long_address_threshold() -> usize {
    80
}

/// A mid-section column that also carries a small labelled table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    /// Mid title of the column holding the table.
    pub section: String,
    /// Optional header cell announcing the table; consumed without output.
    #[serde(default)]
    pub header: Option<String>,
    pub title: String,
    /// Row labels, in output order.
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamLabels {
    pub director: TeamLabel,
    pub manager: TeamLabel,
    pub functional_lead: TeamLabel,
    pub support_areas: TeamLabel,
    /// Heading placed before unrecognised team lines.
    pub extra_heading: String,
}

impl TeamLabels {
    pub fn get(&self, field: TeamField) -> &TeamLabel {
        match field {
            TeamField::Director => &self.director,
            TeamField::Manager => &self.manager,
            TeamField::FunctionalLead => &self.functional_lead,
            TeamField::SupportAreas => &self.support_areas,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamLabel {
    /// Label used in the merged narrative.
    pub display: String,
    /// Accepted spellings in the spreadsheet (compared normalized).
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamField {
    Director,
    Manager,
    FunctionalLead,
    SupportAreas,
}

impl TeamField {
    /// Narrative order.
    pub const ALL: [TeamField; 4] = [
        TeamField::Director,
        TeamField::Manager,
        TeamField::FunctionalLead,
        TeamField::SupportAreas,
    ];
}
