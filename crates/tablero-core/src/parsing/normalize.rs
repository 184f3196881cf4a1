use unicode_normalization::UnicodeNormalization;

/// Trimmed text of a cell.
pub fn clean(value: &str) -> &str {
    value.trim()
}

/// Comparison key for labels: trimmed, accents stripped, upper-cased.
///
/// "Dirección", "DIRECCION" and " direccion " all map to "DIRECCION".
pub fn norm(value: &str) -> String {
    clean(value)
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// True when `value` is the label itself followed by a colon, with or
/// without text after it. `label` must already be normalized.
pub fn starts_with_label(value: &str, label: &str) -> bool {
    norm(value)
        .strip_prefix(label)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Text after the first colon, trimmed. `None` when there is no colon or
/// nothing follows it.
pub fn after_colon(value: &str) -> Option<&str> {
    let (_, rest) = value.split_once(':')?;
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Turn a sheet identifier into a display title.
///
/// Percent-decodes, replaces runs of `_`/`-` with a space and collapses
/// whitespace. Falls back to "Canvas" when nothing is left.
pub fn prettify_title(raw: &str) -> String {
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    let mut spaced = String::with_capacity(decoded.len());
    let mut prev_separator = false;
    for c in decoded.chars() {
        if c == '_' || c == '-' {
            if !prev_separator {
                spaced.push(' ');
            }
            prev_separator = true;
        } else {
            spaced.push(c);
            prev_separator = false;
        }
    }

    let title = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        "Canvas".to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_and_case_equivalence() {
        assert_eq!(norm("Dirección"), "DIRECCION");
        assert_eq!(norm("DIRECCION"), norm(" direccion "));
        assert_eq!(norm("Análisis de Impacto"), "ANALISIS DE IMPACTO");
    }

    #[test]
    fn test_norm_empty() {
        assert_eq!(norm("   "), "");
    }

    #[test]
    fn test_enye_is_folded() {
        assert_eq!(norm("Año"), "ANO");
    }

    #[test]
    fn test_starts_with_label() {
        assert!(starts_with_label("Dirección: Av. Reforma", "DIRECCION"));
        assert!(starts_with_label("direccion:", "DIRECCION"));
        assert!(!starts_with_label("DIRECCION", "DIRECCION"));
        assert!(!starts_with_label("DIRECCIONES: x", "DIRECCION"));
    }

    #[test]
    fn test_after_colon() {
        assert_eq!(after_colon("TI: 100"), Some("100"));
        assert_eq!(after_colon("URL: http://x"), Some("http://x"));
        assert_eq!(after_colon("TOTAL:   "), None);
        assert_eq!(after_colon("TOTAL"), None);
    }

    #[test]
    fn test_prettify_title() {
        assert_eq!(prettify_title("Canvas%20Valet_Parking"), "Canvas Valet Parking");
        assert_eq!(prettify_title("app--movil__v2"), "app movil v2");
        assert_eq!(prettify_title("  "), "Canvas");
        assert_eq!(prettify_title(""), "Canvas");
    }
}
