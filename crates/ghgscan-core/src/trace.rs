use crate::model::MetricRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// A value written into the record, and where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub field: String,
    pub rule: String,
    /// Index of the first line of the window that matched.
    pub line_index: usize,
    pub matched_text: String,
    pub raw_value: String,
    pub unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The literal did not normalize to a number.
    Unparseable,
    /// The value failed the rule's plausibility check.
    OutOfBounds,
    /// A value already present for the field took precedence.
    ExistingValueKept,
    /// The grand total was smaller than Scope 1 + Scope 2.
    TotalBelowComponents,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Unparseable => write!(f, "unparseable number"),
            DropReason::OutOfBounds => write!(f, "outside plausible range"),
            DropReason::ExistingValueKept => write!(f, "existing value kept"),
            DropReason::TotalBelowComponents => write!(f, "total below scope 1 + scope 2"),
        }
    }
}

/// A candidate value that did not end up in the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedCandidate {
    pub field: String,
    pub rule: String,
    /// None for drops made during post-scan reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_index: Option<usize>,
    pub raw_value: String,
    pub reason: DropReason,
}

/// Result of a traced scan: the record plus how it was assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTrace {
    pub trace_schema_version: String,
    pub record: MetricRecord,
    pub evidence: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedCandidate>,
}

impl Default for ScanTrace {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            record: MetricRecord::new(),
            evidence: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

impl ScanTrace {
    /// Store a value and remember where it came from.
    pub fn accept(&mut self, evidence: Evidence) {
        tracing::trace!(
            field = %evidence.field,
            rule = %evidence.rule,
            line = evidence.line_index,
            value = evidence.value,
            "metric captured"
        );
        self.record.insert(&evidence.field, evidence.value);
        self.evidence.push(evidence);
    }

    pub fn reject(&mut self, dropped: DroppedCandidate) {
        tracing::debug!(
            field = %dropped.field,
            rule = %dropped.rule,
            raw = %dropped.raw_value,
            reason = %dropped.reason,
            "candidate dropped"
        );
        self.dropped.push(dropped);
    }

    /// Fold another trace in; its record values win on conflicts.
    pub fn merge(&mut self, other: ScanTrace) {
        self.record.merge(other.record);
        self.evidence.extend(other.evidence);
        self.dropped.extend(other.dropped);
    }

    /// Latest evidence for a field, if the field is in the record.
    pub fn evidence_for(&self, field: &str) -> Option<&Evidence> {
        if !self.record.contains(field) {
            return None;
        }
        self.evidence.iter().rev().find(|e| e.field == field)
    }
}
