use crate::model::{fields, MetricRecord};
use crate::parsing::number::normalize_quantity;
use crate::rules::catalog::{CompiledRule, MatchMode, PatternCatalog};
use crate::scan::window_at;
use crate::trace::{DropReason, DroppedCandidate, Evidence, ScanTrace};
use regex::Captures;

/// Scan free-form text for emission figures and intensity ratios.
///
/// Every line starts a window of `window` consecutive lines joined by a
/// space, so labels wrapped onto the next line are still matched.
pub fn scan_metrics<S: AsRef<str>>(
    lines: &[S],
    catalog: &PatternCatalog,
    window: usize,
) -> MetricRecord {
    scan_metrics_traced(lines, catalog, window).record
}

/// Same as [`scan_metrics`], keeping evidence for every captured value.
pub fn scan_metrics_traced<S: AsRef<str>>(
    lines: &[S],
    catalog: &PatternCatalog,
    window: usize,
) -> ScanTrace {
    let mut trace = ScanTrace::default();

    for i in 0..lines.len() {
        let text = window_at(lines, i, window);
        for compiled in catalog.rules() {
            match compiled.rule.mode {
                MatchMode::All => {
                    for caps in compiled.regex.captures_iter(&text) {
                        apply_match(&mut trace, compiled, &caps, i);
                    }
                }
                MatchMode::First => {
                    if let Some(caps) = compiled.regex.captures(&text) {
                        apply_match(&mut trace, compiled, &caps, i);
                    }
                }
            }
        }
    }

    reconcile(&mut trace);
    trace
}

fn apply_match(trace: &mut ScanTrace, compiled: &CompiledRule, caps: &Captures<'_>, line_index: usize) {
    let rule = compiled.rule;
    let Some(field) = compiled.field_for(caps) else {
        return;
    };
    let raw = caps.name("val").map_or("", |m| m.as_str());
    let unit = compiled.unit_for(caps);

    let dropped = |reason| DroppedCandidate {
        field: field.to_string(),
        rule: rule.name.to_string(),
        line_index: Some(line_index),
        raw_value: raw.to_string(),
        reason,
    };

    let Some(value) = normalize_quantity(raw, unit).map(|v| rule.transform.apply(v)) else {
        trace.reject(dropped(DropReason::Unparseable));
        return;
    };
    if !rule.plausibility.accepts(value) {
        trace.reject(dropped(DropReason::OutOfBounds));
        return;
    }
    if trace.record.contains(field) && !rule.precedence.may_replace(field) {
        trace.reject(dropped(DropReason::ExistingValueKept));
        return;
    }

    let matched_text = caps.get(0).map_or("", |m| m.as_str());
    for target in std::iter::once(field).chain(rule.aliases.iter().copied()) {
        trace.accept(Evidence {
            field: target.to_string(),
            rule: rule.name.to_string(),
            line_index,
            matched_text: matched_text.to_string(),
            raw_value: raw.to_string(),
            unit: unit.to_string(),
            value,
        });
    }
}

/// Fill the combined Scope 2 figure and drop totals smaller than their parts.
fn reconcile(trace: &mut ScanTrace) {
    if !trace.record.contains(fields::SCOPE2_CO2E_T) {
        let fallback = [fields::SCOPE2_MARKET_T, fields::SCOPE2_LOCATION_T]
            .into_iter()
            .find_map(|f| trace.evidence_for(f).cloned());
        if let Some(mut evidence) = fallback {
            evidence.field = fields::SCOPE2_CO2E_T.to_string();
            trace.accept(evidence);
        }
    }

    let components = trace.record.get(fields::SCOPE1_CO2E_T).unwrap_or(0.0)
        + trace.record.get(fields::SCOPE2_CO2E_T).unwrap_or(0.0);
    if let Some(total) = trace.record.get(fields::TOTAL_CO2E_T) {
        if total < components {
            trace.record.remove(fields::TOTAL_CO2E_T);
            trace.reject(DroppedCandidate {
                field: fields::TOTAL_CO2E_T.to_string(),
                rule: "reconcile".to_string(),
                line_index: None,
                raw_value: total.to_string(),
                reason: DropReason::TotalBelowComponents,
            });
        }
    }
}
