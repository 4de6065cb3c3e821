/// Literals with more digits than this are treated as run-on text, not numbers.
const MAX_DIGITS: usize = 9;

/// Parse a numeric literal from report text and scale it to tons.
///
/// Handles formats like:
/// - "1,234.5" -> 1234.5 (comma thousands, period decimal)
/// - "1.234,5" -> 1234.5 (period thousands, comma decimal)
/// - "1,234" -> 1234 (single comma followed by three digits is thousands)
/// - "12,3" -> 12.3 (decimal comma)
/// - "1 234" -> 1234 (space thousands)
///
/// The unit token is matched case-insensitively; empty means tons.
/// "kt" scales by 1,000, "mn t" by 1,000,000 and "kg" divides by 1,000.
/// Returns None for anything that does not parse.
pub fn normalize_quantity(literal: &str, unit: &str) -> Option<f64> {
    let cleaned = canonical_literal(literal)?;
    if cleaned.chars().filter(|c| c.is_ascii_digit()).count() > MAX_DIGITS {
        return None;
    }
    let value: f64 = cleaned.parse().ok().filter(|v: &f64| v.is_finite())?;
    Some(scale_to_tons(value, unit))
}

/// Resolve thousands/decimal separators into a plain `1234.5` literal.
fn canonical_literal(literal: &str) -> Option<String> {
    let s: String = literal.trim().chars().filter(|c| *c != ' ').collect();
    if s.is_empty() {
        return None;
    }

    let last_comma = s.rfind(',');
    let last_period = s.rfind('.');

    let out = match (last_comma, last_period) {
        // Rightmost separator is the decimal point
        (Some(c), Some(p)) if c > p => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) => {
            let tail_len = s.rsplit(',').next().map_or(0, |t| t.chars().count());
            if s.matches(',').count() == 1 && tail_len == 3 {
                s.replace(',', "")
            } else {
                s.replace(',', ".")
            }
        }
        (None, _) => s,
    };
    Some(out)
}

fn scale_to_tons(value: f64, unit: &str) -> f64 {
    let unit = unit.trim().to_lowercase();
    let unit = if unit.is_empty() { "t".to_string() } else { unit };

    let mut value = value;
    if unit.starts_with('k') && !unit.contains('g') {
        value *= 1_000.0;
    }
    if unit.contains("mn") && !unit.contains("kg") {
        value *= 1_000_000.0;
    }
    if unit.contains("kg") {
        value /= 1_000.0;
    }
    value
}
