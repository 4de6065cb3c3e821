use ghgscan_core::model::DocumentMetrics;
use ghgscan_core::trace::ScanTrace;
use std::fmt::Write;

pub fn format_documents(docs: &[DocumentMetrics]) -> String {
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ===\n", doc.source);

        if doc.metrics.is_empty() {
            out.push_str("  (no metrics found)\n");
            continue;
        }

        let width = doc.metrics.keys().map(str::len).max().unwrap_or(20);
        for (field, value) in doc.metrics.iter_ordered() {
            let _ = writeln!(out, "  {:<width$}  {:>16}", field, format_value(value));
        }
    }
    out
}

pub fn format_traces(traces: &[(String, ScanTrace)]) -> String {
    let mut out = String::new();
    for (i, (source, trace)) in traces.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ===\n", source);

        if trace.record.is_empty() {
            out.push_str("  (no metrics found)\n");
        }
        for (field, value) in trace.record.iter_ordered() {
            let _ = writeln!(out, "  {}  = {}", field, format_value(value));
            if let Some(e) = trace.evidence_for(field) {
                let _ = writeln!(
                    out,
                    "      {} @ line {}: \"{}\" ({} {})",
                    e.rule, e.line_index, e.matched_text, e.raw_value, e.unit
                );
            }
        }

        if !trace.dropped.is_empty() {
            out.push_str("\n  Dropped:\n");
            for d in &trace.dropped {
                let line = d
                    .line_index
                    .map(|l| format!(" @ line {}", l))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "    {} {}{}: {} ({})",
                    d.field, d.rule, line, d.raw_value, d.reason
                );
            }
        }
    }
    out
}

/// Whole numbers without decimals, fractions with up to four places.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let s = format!("{:.4}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
