use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a numeric display value from a sheet into a Decimal.
///
/// Handles formats like:
/// - "68" -> 68
/// - "$1,200.50" -> 1200.50
/// - "45%" -> 45
/// - "(300)" -> -300
/// - "1e2" -> 100
///
/// Returns None for empty or non-numeric text.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (negative, s) = match s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, s),
    };

    let cleaned: String = s
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;

    Some(if negative { -value } else { value })
}
