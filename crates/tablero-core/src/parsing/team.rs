use std::collections::BTreeMap;

use crate::layout::schema::{TeamField, TeamLabels};
use crate::model::CanvasMeta;
use crate::parsing::normalize::{after_colon, clean, norm, starts_with_label};

/// A team block split into recognised fields and leftover lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamBlock {
    pub known: BTreeMap<TeamField, String>,
    /// Unrecognised lines, in order, joined by newlines.
    pub extra: String,
}

/// Parse the raw team column into labelled fields.
///
/// A line is a label line when its normalized form starts with one of the
/// accepted spellings followed by a colon. The value is the text after the
/// colon; when that is empty, the next line is taken instead unless it is
/// itself a label line. Only one line is ever taken, and it is not consumed:
/// every line that is not a label line ends up in `extra`, in order.
pub fn parse_team_block(raw: &str, labels: &TeamLabels) -> TeamBlock {
    let spellings: Vec<(TeamField, Vec<String>)> = TeamField::ALL
        .iter()
        .map(|&field| {
            let names = labels
                .get(field)
                .names
                .iter()
                .map(|n| norm(n))
                .filter(|n| !n.is_empty())
                .collect();
            (field, names)
        })
        .collect();

    let label_of = |line: &str| -> Option<TeamField> {
        spellings.iter().find_map(|(field, names)| {
            names
                .iter()
                .any(|name| starts_with_label(line, name))
                .then_some(*field)
        })
    };

    let lines: Vec<&str> = clean(raw)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut block = TeamBlock::default();
    let mut extra = Vec::new();

    for (i, &line) in lines.iter().enumerate() {
        let Some(field) = label_of(line) else {
            extra.push(line);
            continue;
        };

        if let Some(value) = after_colon(line) {
            block.known.insert(field, value.to_string());
        } else if let Some(value) = lookahead_value(&lines[i + 1..], &label_of) {
            block.known.insert(field, value.to_string());
        }
    }

    block.extra = extra.join("\n");
    block
}

/// The value line following an empty label line: the next line, unless it
/// is another label line.
fn lookahead_value<'a>(
    rest: &[&'a str],
    label_of: &impl Fn(&str) -> Option<TeamField>,
) -> Option<&'a str> {
    let next: &'a str = rest.first().copied()?;
    if label_of(next).is_some() {
        None
    } else {
        Some(next)
    }
}

/// Merge the team block with metadata into the displayed team narrative.
///
/// Each field takes the value parsed from the grid, then the matching
/// metadata field (director and functional lead only), then the
/// placeholder. Unrecognised lines follow under the extra heading.
pub fn build_team_content(
    raw: &str,
    meta: Option<&CanvasMeta>,
    labels: &TeamLabels,
    placeholder: &str,
) -> String {
    let block = parse_team_block(raw, labels);

    let mut parts = Vec::with_capacity(8);
    for (i, field) in TeamField::ALL.into_iter().enumerate() {
        let value = block
            .known
            .get(&field)
            .map(|v| clean(v))
            .filter(|v| !v.is_empty())
            .or_else(|| meta_fallback(field, meta))
            .unwrap_or(placeholder);
        if i > 0 {
            parts.push(String::new());
        }
        parts.push(format!("{}: {}", labels.get(field).display, value));
    }

    let extra = clean(&block.extra);
    if !extra.is_empty() {
        parts.push(String::new());
        parts.push(labels.extra_heading.clone());
        parts.push(extra.to_string());
    }

    parts.join("\n")
}

fn meta_fallback(field: TeamField, meta: Option<&CanvasMeta>) -> Option<&str> {
    let meta = meta?;
    let value = match field {
        TeamField::Director => meta.responsible_director.as_deref(),
        TeamField::FunctionalLead => meta.functional_lead.as_deref(),
        TeamField::Manager | TeamField::SupportAreas => None,
    }?;
    let value = clean(value);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin::load_preset;

    const PENDING: &str = "Pendiente por definir.";

    fn labels() -> TeamLabels {
        load_preset("es").unwrap().team
    }

    #[test]
    fn test_lookahead_and_same_line_values() {
        let raw = "DIRECTOR DE PROYECTO:\nJuan Pérez\nGERENTE DE PROYECTO: Ana";
        let block = parse_team_block(raw, &labels());
        assert_eq!(block.known[&TeamField::Director], "Juan Pérez");
        assert_eq!(block.known[&TeamField::Manager], "Ana");
        assert_eq!(block.extra, "Juan Pérez");
    }

    #[test]
    fn test_build_content_with_empty_meta() {
        let raw = "DIRECTOR DE PROYECTO:\nJuan Pérez\nGERENTE DE PROYECTO: Ana";
        let content = build_team_content(raw, Some(&CanvasMeta::default()), &labels(), PENDING);
        assert_eq!(
            content,
            "Director de Proyecto: Juan Pérez\n\n\
             Gerente de Proyecto: Ana\n\n\
             Líder Funcional: Pendiente por definir.\n\n\
             Áreas de apoyo: Pendiente por definir.\n\n\
             Otros:\n\
             Juan Pérez"
        );
    }

    #[test]
    fn test_lookahead_stops_at_label_line() {
        let raw = "Director de proyecto:\n\nGerente de proyecto: Ana";
        let block = parse_team_block(raw, &labels());
        assert!(!block.known.contains_key(&TeamField::Director));
        assert_eq!(block.known[&TeamField::Manager], "Ana");
    }

    #[test]
    fn test_lookahead_takes_single_line() {
        let raw = "ÁREAS DE APOYO:\nFinanzas\nJurídico";
        let block = parse_team_block(raw, &labels());
        assert_eq!(block.known[&TeamField::SupportAreas], "Finanzas");
        assert_eq!(block.extra, "Finanzas\nJurídico");
    }

    #[test]
    fn test_accented_spellings_match() {
        let raw = "líder funcional: Marta\nAreas de apoyo: TI, Compras";
        let block = parse_team_block(raw, &labels());
        assert_eq!(block.known[&TeamField::FunctionalLead], "Marta");
        assert_eq!(block.known[&TeamField::SupportAreas], "TI, Compras");
    }

    #[test]
    fn test_meta_fills_director_and_lead_only() {
        let meta = CanvasMeta {
            responsible_director: Some(" Laura Ríos ".into()),
            functional_lead: Some("Pedro".into()),
            financial_ratio_display: None,
        };
        let content = build_team_content("", Some(&meta), &labels(), PENDING);
        assert!(content.starts_with("Director de Proyecto: Laura Ríos\n"));
        assert!(content.contains("Gerente de Proyecto: Pendiente por definir."));
        assert!(content.contains("Líder Funcional: Pedro"));
        assert!(content.contains("Áreas de apoyo: Pendiente por definir."));
    }

    #[test]
    fn test_grid_value_beats_meta() {
        let meta = CanvasMeta {
            responsible_director: Some("Laura".into()),
            ..Default::default()
        };
        let content = build_team_content("DIRECTOR DE PROYECTO: Juan", Some(&meta), &labels(), PENDING);
        assert!(content.starts_with("Director de Proyecto: Juan\n"));
    }

    #[test]
    fn test_extra_lines_are_appended() {
        let raw = "Equipo de datos\n\nGERENTE DE PROYECTO: Ana\nConsultor externo";
        let content = build_team_content(raw, None, &labels(), PENDING);
        assert!(content.ends_with("\n\nOtros:\nEquipo de datos\nConsultor externo"));
    }

    #[test]
    fn test_empty_block_without_meta_is_all_placeholders() {
        let content = build_team_content("", None, &labels(), PENDING);
        assert_eq!(content.matches(PENDING).count(), 4);
        assert!(!content.contains("Otros:"));
    }
}
