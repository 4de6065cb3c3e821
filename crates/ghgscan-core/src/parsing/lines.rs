use crate::extraction::PageContent;

/// Normalize one raw text line from PDF extraction.
///
/// Steps:
/// 1. Non-breaking spaces become plain spaces
/// 2. Subscript two ("CO₂e") becomes ASCII "2"
/// 3. En/em dashes and the minus sign become "-"
/// 4. Whitespace runs collapse to a single space, ends trimmed
///
/// Returns None if nothing but whitespace remains.
pub fn normalize_line(raw: &str) -> Option<String> {
    let mut mapped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\u{00A0}' | '\u{202F}' | '\u{2007}' => mapped.push(' '),
            '₂' => mapped.push('2'),
            '–' | '—' | '‒' | '−' => mapped.push('-'),
            _ => mapped.push(c),
        }
    }

    let collapsed = mapped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Split already-extracted text into normalized lines.
///
/// Form feeds (pdftotext page breaks) are treated as line breaks.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.split(['\n', '\x0c'])
        .filter_map(normalize_line)
        .collect()
}

/// Flatten extracted pages into one normalized line sequence.
pub fn lines_from_pages(pages: &[PageContent]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| p.lines.iter())
        .filter_map(|l| normalize_line(l))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nbsp_and_subscript() {
        assert_eq!(
            normalize_line("Scope 1\u{00A0}\u{00A0}12 t CO₂e").as_deref(),
            Some("Scope 1 12 t CO2e")
        );
    }

    #[test]
    fn test_dash_variants() {
        assert_eq!(
            normalize_line("(Scope 1–3) — TOTAL −5").as_deref(),
            Some("(Scope 1-3) - TOTAL -5")
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            normalize_line("   Gross Scope 1     GHG\temissions   ").as_deref(),
            Some("Gross Scope 1 GHG emissions")
        );
    }

    #[test]
    fn test_blank_is_none() {
        assert!(normalize_line("").is_none());
        assert!(normalize_line(" \u{00A0} \t").is_none());
    }

    #[test]
    fn test_lines_from_text_drops_empty() {
        let text = "First line\r\n\n  \nSecond\x0cThird page";
        assert_eq!(lines_from_text(text), vec!["First line", "Second", "Third page"]);
    }

    #[test]
    fn test_lines_from_pages() {
        let pages = vec![
            PageContent {
                page_number: 1,
                lines: vec!["  a  b ".into(), "".into()],
            },
            PageContent {
                page_number: 2,
                lines: vec!["c".into()],
            },
        ];
        assert_eq!(lines_from_pages(&pages), vec!["a b", "c"]);
    }
}
