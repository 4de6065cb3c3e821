use crate::model::{fields, MetricRecord, SectionTag};
use crate::parsing::number::normalize_quantity;
use crate::rules::rows::{CompiledRowRule, NumberCapture, RowCatalog};
use crate::scan::section::SectionTracker;
use crate::scan::window_at;
use crate::trace::{DropReason, DroppedCandidate, Evidence, ScanTrace};

/// Read labelled table rows from a sustainability supplement.
///
/// Rows are only read while the tracker places the line inside a known
/// section. A label split over two lines is found in the joined window.
pub fn scan_supplement<S: AsRef<str>>(
    lines: &[S],
    tracker: &SectionTracker,
    rows: &RowCatalog,
    window: usize,
) -> MetricRecord {
    scan_supplement_traced(lines, tracker, rows, window).record
}

pub fn scan_supplement_traced<S: AsRef<str>>(
    lines: &[S],
    tracker: &SectionTracker,
    rows: &RowCatalog,
    window: usize,
) -> ScanTrace {
    let mut trace = ScanTrace::default();
    let tags = tracker.tag_lines(lines);

    for (i, (line, tag)) in lines.iter().zip(&tags).enumerate() {
        if *tag == SectionTag::None {
            continue;
        }
        let line = line.as_ref();
        let joined = window_at(lines, i, window);

        for rule in rows.for_section(*tag) {
            read_row(&mut trace, rule, line, &joined, i);
        }
    }

    if !trace.record.contains(fields::OWNOPS_SCOPE2_T) {
        if let Some(mut evidence) = trace.evidence_for(fields::OWNOPS_SCOPE2_MARKET_T).cloned() {
            evidence.field = fields::OWNOPS_SCOPE2_T.to_string();
            trace.accept(evidence);
        }
    }

    trace
}

fn read_row(trace: &mut ScanTrace, rule: &CompiledRowRule, line: &str, joined: &str, line_index: usize) {
    let in_line = rule.find_label(line).is_some();
    let in_joined = rule.find_label(joined).is_some();
    if !in_line && !in_joined {
        return;
    }

    let source = match rule.rule.capture {
        NumberCapture::DirectlyAfter if !in_joined => line,
        _ => joined,
    };
    let Some(raw) = rule.value_literal(source) else {
        return;
    };

    let field = rule.rule.field;
    match normalize_quantity(raw, "t") {
        Some(value) => trace.accept(Evidence {
            field: field.to_string(),
            rule: field.to_string(),
            line_index,
            matched_text: source.to_string(),
            raw_value: raw.to_string(),
            unit: "t".to_string(),
            value,
        }),
        None => trace.reject(DroppedCandidate {
            field: field.to_string(),
            rule: field.to_string(),
            line_index: Some(line_index),
            raw_value: raw.to_string(),
            reason: DropReason::Unparseable,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_WINDOW;
    use crate::profile::builtin::load_preset;

    fn scan(lines: &[&str]) -> MetricRecord {
        let tracker = SectionTracker::new(&load_preset("en-cs").unwrap().sections);
        let rows = RowCatalog::compile().unwrap();
        scan_supplement(lines, &tracker, &rows, DEFAULT_WINDOW)
    }

    #[test]
    fn test_own_operations_rows() {
        let r = scan(&[
            "GHG emissions of own operations",
            "Gross Scope 1 GHG emissions 12,345 13,001",
            "Gross location-based Scope 2 GHG emissions 4,100 4,500",
            "Gross market-based Scope 2 GHG emissions 2,050 2,300",
            "Total own operations GHG emissions (market-based) 52,310 55,120",
        ]);
        assert_eq!(r.get(fields::OWNOPS_SCOPE1_T), Some(12345.0));
        assert_eq!(r.get(fields::OWNOPS_SCOPE2_LOCATION_T), Some(4100.0));
        assert_eq!(r.get(fields::OWNOPS_SCOPE2_MARKET_T), Some(2050.0));
        assert_eq!(r.get(fields::OWNOPS_SCOPE2_T), Some(2050.0));
        assert_eq!(r.get(fields::OWNOPS_TOTAL_MARKET_T), Some(52310.0));
    }

    #[test]
    fn test_per_employee_row_ignored() {
        let r = scan(&[
            "Own operations",
            "Gross Scope 1 GHG emissions per employee 0.5",
        ]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_per_employee_on_next_line_keeps_line_value() {
        let r = scan(&[
            "Own operations",
            "Gross Scope 1 GHG emissions 1,200",
            "Gross Scope 1 GHG emissions per employee 0.5",
        ]);
        assert_eq!(r.get(fields::OWNOPS_SCOPE1_T), Some(1200.0));
    }

    #[test]
    fn test_label_split_over_two_lines() {
        let r = scan(&[
            "Own operations",
            "Total own operations GHG emissions",
            "(location-based) 60,100 61,000",
        ]);
        assert_eq!(r.get(fields::OWNOPS_TOTAL_LOCATION_T), Some(60100.0));
    }

    #[test]
    fn test_rows_outside_section_ignored() {
        let r = scan(&[
            "Gross Scope 1 GHG emissions 12,345",
            "Own operations",
            "Tables of the sustainability statement",
            "Gross Scope 1 GHG emissions 99",
        ]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_proprietary_total_signed() {
        let r = scan(&[
            "Proprietary investments GHG emissions",
            "Proprietary investments GHG emissions (Scope 1-3) - TOTAL mn t -1,5",
        ]);
        assert_eq!(r.get(fields::PROPINV_TOTAL_T), Some(-1.5));
    }

    #[test]
    fn test_proprietary_value_on_next_line() {
        let r = scan(&[
            "Proprietary investments GHG emissions",
            "Proprietary investments GHG emissions (Scope 1-3) - TOTAL",
            "12.8",
        ]);
        assert_eq!(r.get(fields::PROPINV_TOTAL_T), Some(12.8));
    }

    #[test]
    fn test_own_ops_rules_not_read_in_proprietary_section() {
        let r = scan(&[
            "Proprietary investments GHG emissions",
            "Gross Scope 1 GHG emissions 12,345",
        ]);
        assert!(!r.contains(fields::OWNOPS_SCOPE1_T));
    }

    #[test]
    fn test_scope2_not_filled_without_market_row() {
        let r = scan(&["Own operations", "Gross location-based Scope 2 GHG emissions 4,100"]);
        assert!(!r.contains(fields::OWNOPS_SCOPE2_T));
    }
}
