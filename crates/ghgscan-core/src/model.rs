use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical output field names.
///
/// Values are tons CO2e unless the name says otherwise
/// (`investments_intensity_t_per_eur_mn` is tons per EUR million).
pub mod fields {
    pub const SCOPE1_CO2E_T: &str = "scope1_co2e_t";
    pub const SCOPE2_CO2E_T: &str = "scope2_co2e_t";
    pub const SCOPE3_CO2E_T: &str = "scope3_co2e_t";
    pub const SCOPE2_MARKET_T: &str = "scope2_market_t";
    pub const SCOPE2_LOCATION_T: &str = "scope2_location_t";
    pub const TOTAL_CO2E_T: &str = "total_co2e_t";
    pub const INVESTMENTS_INTENSITY: &str = "investments_intensity_t_per_eur_mn";

    pub const OWNOPS_SCOPE1_T: &str = "ownops_scope1_t";
    pub const OWNOPS_SCOPE2_T: &str = "ownops_scope2_t";
    pub const OWNOPS_SCOPE2_LOCATION_T: &str = "ownops_scope2_location_t";
    pub const OWNOPS_SCOPE2_MARKET_T: &str = "ownops_scope2_market_t";
    pub const OWNOPS_SCOPE3_T: &str = "ownops_scope3_t";
    pub const OWNOPS_TOTAL_LOCATION_T: &str = "ownops_total_location_t";
    pub const OWNOPS_TOTAL_MARKET_T: &str = "ownops_total_market_t";
    pub const PROPINV_TOTAL_T: &str = "propinv_total_t";

    /// Every field a scan can produce, in display order.
    pub const ALL: &[&str] = &[
        SCOPE1_CO2E_T,
        SCOPE2_CO2E_T,
        SCOPE2_MARKET_T,
        SCOPE2_LOCATION_T,
        SCOPE3_CO2E_T,
        TOTAL_CO2E_T,
        INVESTMENTS_INTENSITY,
        OWNOPS_SCOPE1_T,
        OWNOPS_SCOPE2_T,
        OWNOPS_SCOPE2_LOCATION_T,
        OWNOPS_SCOPE2_MARKET_T,
        OWNOPS_SCOPE3_T,
        OWNOPS_TOTAL_LOCATION_T,
        OWNOPS_TOTAL_MARKET_T,
        PROPINV_TOTAL_T,
    ];

    /// Position of `field` in [`ALL`]; unknown fields sort after every known one.
    pub fn display_rank(field: &str) -> usize {
        ALL.iter().position(|f| *f == field).unwrap_or(ALL.len())
    }
}

/// Flat mapping from field name to a normalized value, one per document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord(BTreeMap<String, f64>);

impl MetricRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: &str, value: f64) -> Option<f64> {
        self.0.insert(field.to_string(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<f64> {
        self.0.remove(field)
    }

    /// Copy every field of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: MetricRecord) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Fields in [`fields::ALL`] order, unknown fields last by name.
    pub fn iter_ordered(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(field, _)| fields::display_rank(field));
        entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for MetricRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        MetricRecord(iter.into_iter().collect())
    }
}

/// Logical report section a line belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionTag {
    #[default]
    None,
    OwnOperations,
    ProprietaryInvestments,
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionTag::None => write!(f, "-"),
            SectionTag::OwnOperations => write!(f, "own-operations"),
            SectionTag::ProprietaryInvestments => write!(f, "proprietary-investments"),
        }
    }
}

/// Which scanners run over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Free-form prose and table scan only.
    Prose,
    /// Section-scoped table-row scan only.
    Supplement,
    #[default]
    Both,
}

impl ScanMode {
    pub fn from_str_loose(s: &str) -> Option<ScanMode> {
        match s.trim().to_lowercase().as_str() {
            "prose" | "general" => Some(ScanMode::Prose),
            "supplement" | "rows" => Some(ScanMode::Supplement),
            "both" | "all" => Some(ScanMode::Both),
            _ => None,
        }
    }

    pub fn runs_prose(&self) -> bool {
        matches!(self, ScanMode::Prose | ScanMode::Both)
    }

    pub fn runs_supplement(&self) -> bool {
        matches!(self, ScanMode::Supplement | ScanMode::Both)
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Prose => write!(f, "prose"),
            ScanMode::Supplement => write!(f, "supplement"),
            ScanMode::Both => write!(f, "both"),
        }
    }
}

/// Default number of consecutive lines joined into one scan window.
pub const DEFAULT_WINDOW: usize = 2;

/// Tunables for a document scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub mode: ScanMode,
    /// Lines per window (current line plus `window - 1` look-ahead lines).
    /// Values below 1 are treated as 1.
    pub window: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: ScanMode::default(),
            window: DEFAULT_WINDOW,
        }
    }
}

/// Metrics extracted from one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetrics {
    pub source: String,
    pub metrics: MetricRecord,
}
