use std::collections::BTreeSet;

use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TableroError;
use crate::extraction::http::get_bytes;
use crate::parsing::normalize::norm;
use crate::parsing::values::parse_amount;

/// One initiative as listed by the portfolio endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "nombre", default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub sponsor: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub year: Option<String>,
    #[serde(alias = "cumplimiento", default, deserialize_with = "opt_text_or_number")]
    pub compliance: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub canvas_link: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub canvas: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub canvas_tab: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    pub canvas_title: Option<String>,
}

fn opt_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    opt_text_or_number(deserializer).map(Option::unwrap_or_default)
}

impl Project {
    /// Completion percentage, clamped to 0..=100. Unparseable or missing
    /// compliance counts as 0.
    pub fn progress_pct(&self) -> Decimal {
        self.compliance
            .as_deref()
            .and_then(parse_amount)
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    pub fn status(&self) -> ProgressStatus {
        ProgressStatus::from_pct(self.progress_pct())
    }

    /// Name of the worksheet holding this project's canvas.
    ///
    /// Takes the first non-blank of the canvas reference fields. The
    /// generic value "CANVAS" is expanded to "Canvas <name>".
    pub fn sheet_title(&self) -> Option<String> {
        let raw = [
            &self.canvas_link,
            &self.canvas,
            &self.canvas_tab,
            &self.canvas_title,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref().map(str::trim))
        .find(|s| !s.is_empty())?;

        if raw.to_uppercase() == "CANVAS" {
            let name = self.name.trim();
            if name.is_empty() {
                return None;
            }
            return Some(collapse_whitespace(&format!("Canvas {name}")));
        }
        Some(collapse_whitespace(raw))
    }

    pub fn has_canvas(&self) -> bool {
        self.sheet_title().is_some()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Done,
    Active,
    Pending,
}

impl ProgressStatus {
    pub fn from_pct(pct: Decimal) -> Self {
        if pct >= Decimal::ONE_HUNDRED {
            ProgressStatus::Done
        } else if pct > Decimal::ZERO {
            ProgressStatus::Active
        } else {
            ProgressStatus::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProgressStatus::Done => "done",
            ProgressStatus::Active => "active",
            ProgressStatus::Pending => "pending",
        }
    }
}

/// Board filters. Empty or absent fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub text: Option<String>,
    pub sponsor: Option<String>,
    pub year: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            Some(n) => norm(haystack).contains(&norm(n)),
            None => true,
        };

        let year_ok = match self.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
            Some(y) => project.year.as_deref().map(str::trim) == Some(y),
            None => true,
        };

        contains(&project.name, &self.text)
            && contains(project.sponsor.as_deref().unwrap_or(""), &self.sponsor)
            && year_ok
    }
}

/// Projects that pass the filter and have either a canvas or some progress.
pub fn visible_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| filter.matches(p))
        .filter(|p| p.has_canvas() || p.progress_pct() > Decimal::ZERO)
        .collect()
}

/// Distinct non-empty years, newest first.
pub fn years(projects: &[Project]) -> Vec<String> {
    let distinct: BTreeSet<&str> = projects
        .iter()
        .filter_map(|p| p.year.as_deref().map(str::trim))
        .filter(|y| !y.is_empty())
        .collect();

    let mut years: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    years.sort_by(|a, b| {
        let key = |s: &str| parse_amount(s).unwrap_or(Decimal::MIN);
        key(b).cmp(&key(a)).then_with(|| b.cmp(a))
    });
    years
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressRange {
    #[default]
    All,
    From10To29,
    From30To59,
    From60To90,
    Complete,
}

impl ProgressRange {
    pub fn contains(self, pct: Decimal) -> bool {
        let between = |lo: i64, hi: i64| pct >= Decimal::from(lo) && pct <= Decimal::from(hi);
        match self {
            ProgressRange::All => true,
            ProgressRange::From10To29 => between(10, 29),
            ProgressRange::From30To59 => between(30, 59),
            ProgressRange::From60To90 => between(60, 90),
            ProgressRange::Complete => pct == Decimal::ONE_HUNDRED,
        }
    }
}

impl std::str::FromStr for ProgressRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "ALL" => Ok(ProgressRange::All),
            "10-29" => Ok(ProgressRange::From10To29),
            "30-59" => Ok(ProgressRange::From30To59),
            "60-90" => Ok(ProgressRange::From60To90),
            "100" => Ok(ProgressRange::Complete),
            other => Err(format!(
                "unknown range '{other}'. Available: all, 10-29, 30-59, 60-90, 100"
            )),
        }
    }
}

/// Colour band of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Low,
    Mid,
    High,
    Full,
}

impl ProgressBand {
    pub fn of(pct: Decimal) -> Self {
        if pct == Decimal::ONE_HUNDRED {
            ProgressBand::Full
        } else if pct >= Decimal::from(60) {
            ProgressBand::High
        } else if pct >= Decimal::from(30) {
            ProgressBand::Mid
        } else {
            ProgressBand::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ProgressBand::Low => "#FAD1E8",
            ProgressBand::Mid => "#4bf180",
            ProgressBand::High => "#4f83e4",
            ProgressBand::Full => "#e100a9",
        }
    }
}

/// One bar of the progress chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressPoint {
    pub name: String,
    pub value: Decimal,
    pub sheet: String,
    pub band: ProgressBand,
}

/// Chart data: projects with a canvas link and a compliance value, inside
/// `range`, highest progress first.
pub fn progress_series(projects: &[Project], range: ProgressRange) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = projects
        .iter()
        .filter_map(|p| {
            let link = p.canvas_link.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
            p.compliance.as_deref().filter(|c| !c.trim().is_empty())?;
            let value = p.progress_pct();
            Some(ProgressPoint {
                name: p.name.clone(),
                value,
                sheet: link.to_string(),
                band: ProgressBand::of(value),
            })
        })
        .filter(|point| range.contains(point.value))
        .collect();

    // Stable: equal values keep input order.
    points.sort_by(|a, b| b.value.cmp(&a.value));
    points
}

/// Download the project list.
pub fn fetch_projects(client: &Client, url: &str) -> Result<Vec<Project>, TableroError> {
    let bytes = get_bytes(client, url)?;
    let projects: Vec<Project> = serde_json::from_slice(&bytes)?;
    tracing::debug!(%url, count = projects.len(), "fetched projects");
    Ok(projects)
}

/// Read a saved project list from disk.
pub fn load_projects(path: &std::path::Path) -> Result<Vec<Project>, TableroError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn project(json: &str) -> Project {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decodes_legacy_names_and_numbers() {
        let p = project(r#"{"nombre": "Valet Parking", "year": 2024, "cumplimiento": 45, "canvasLink": "CANVAS"}"#);
        assert_eq!(p.name, "Valet Parking");
        assert_eq!(p.year.as_deref(), Some("2024"));
        assert_eq!(p.compliance.as_deref(), Some("45"));
        assert_eq!(p.canvas_link.as_deref(), Some("CANVAS"));
    }

    #[test]
    fn test_progress_pct_clamps_and_defaults() {
        let pct = |c: &str| Project { compliance: Some(c.into()), ..Default::default() }.progress_pct();
        assert_eq!(pct("45%"), dec!(45));
        assert_eq!(pct("130"), dec!(100));
        assert_eq!(pct("-5"), dec!(0));
        assert_eq!(pct("n/a"), dec!(0));
        assert_eq!(Project::default().progress_pct(), dec!(0));
    }

    #[test]
    fn test_status() {
        assert_eq!(ProgressStatus::from_pct(dec!(100)), ProgressStatus::Done);
        assert_eq!(ProgressStatus::from_pct(dec!(0.5)), ProgressStatus::Active);
        assert_eq!(ProgressStatus::from_pct(dec!(0)), ProgressStatus::Pending);
    }

    #[test]
    fn test_sheet_title_generic_canvas() {
        let p = project(r#"{"nombre": " Valet   Parking ", "canvasLink": "canvas"}"#);
        assert_eq!(p.sheet_title().as_deref(), Some("Canvas Valet Parking"));

        let unnamed = project(r#"{"canvasLink": "CANVAS"}"#);
        assert_eq!(unnamed.sheet_title(), None);
    }

    #[test]
    fn test_sheet_title_falls_through_blank_fields() {
        let p = project(r#"{"nombre": "X", "canvasLink": "  ", "canvasTab": "Canvas  Pagos\tDigitales"}"#);
        assert_eq!(p.sheet_title().as_deref(), Some("Canvas Pagos Digitales"));
    }

    #[test]
    fn test_filter_is_accent_and_case_insensitive() {
        let projects = vec![
            project(r#"{"nombre": "Migración ERP", "sponsor": "Finanzas", "year": "2024", "cumplimiento": "20"}"#),
            project(r#"{"nombre": "App Móvil", "sponsor": "Tecnología", "year": "2025", "canvasLink": "Canvas App"}"#),
            project(r#"{"nombre": "Sin avance", "year": "2025"}"#),
        ];

        let filter = ProjectFilter { text: Some("migracion".into()), ..Default::default() };
        let names: Vec<_> = visible_projects(&projects, &filter).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Migración ERP"]);

        let filter = ProjectFilter { sponsor: Some("TECNOLOGIA".into()), year: Some("2025".into()), ..Default::default() };
        let names: Vec<_> = visible_projects(&projects, &filter).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["App Móvil"]);

        // Neither a canvas nor progress.
        let all = visible_projects(&projects, &ProjectFilter::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_years_distinct_newest_first() {
        let projects = vec![
            project(r#"{"nombre": "a", "year": 2023}"#),
            project(r#"{"nombre": "b", "year": "2025"}"#),
            project(r#"{"nombre": "c", "year": "2023"}"#),
            project(r#"{"nombre": "d"}"#),
        ];
        assert_eq!(years(&projects), vec!["2025", "2023"]);
    }

    #[test]
    fn test_progress_series_sorted_and_ranged() {
        let projects = vec![
            project(r#"{"nombre": "a", "cumplimiento": "20%", "canvasLink": "Canvas a"}"#),
            project(r#"{"nombre": "b", "cumplimiento": "100", "canvasLink": "Canvas b"}"#),
            project(r#"{"nombre": "c", "cumplimiento": "70", "canvasLink": ""}"#),
            project(r#"{"nombre": "d", "canvasLink": "Canvas d"}"#),
            project(r#"{"nombre": "e", "cumplimiento": "35", "canvasLink": "Canvas e"}"#),
        ];

        let all = progress_series(&projects, ProgressRange::All);
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "e", "a"]);
        assert_eq!(all[0].band, ProgressBand::Full);
        assert_eq!(all[1].band, ProgressBand::Mid);
        assert_eq!(all[2].band, ProgressBand::Low);

        let mid = progress_series(&projects, ProgressRange::From30To59);
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].sheet, "Canvas e");
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("60-90".parse::<ProgressRange>(), Ok(ProgressRange::From60To90));
        assert!("5-9".parse::<ProgressRange>().is_err());
        assert!(!ProgressRange::From10To29.contains(dec!(29.5)));
        assert!(ProgressRange::Complete.contains(dec!(100)));
    }

    #[test]
    fn test_band_color() {
        assert_eq!(ProgressBand::of(dec!(60)).color(), "#4f83e4");
    }
}
