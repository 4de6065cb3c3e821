use crate::error::GhgError;
use crate::model::fields;
use crate::profile::schema::ScanProfile;
use regex::Regex;

/// Number literal with optional thousands groups (comma, period or space).
const NUM: &str = r"(?P<val>\d{1,3}(?:[.,\s]\d{3})*(?:[.,]\d+)?|\d+(?:[.,]\d+)?)";
/// Plain decimal used by intensity ratios.
const RATIO: &str = r"(?P<val>\d+(?:[.,]\d+)?)";
/// Optional unit token in front of the CO2e marker.
const UNIT: &str = r"(?P<unit>(?:mn\s*)?t|kt|t|kg)?";
/// CO2e marker, tolerant of split extraction ("CO 2 e").
const CO2E: &str = r"CO\s*2\s*e";

/// Where a rule stores its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldTarget {
    Fixed(&'static str),
    /// `scope{n}_co2e_t`, with `n` taken from the `scope` capture group.
    ScopeNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every non-overlapping match in the window.
    All,
    /// Only the leftmost match in the window.
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSource {
    /// The `unit` capture group; tons when it did not participate.
    Captured,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Identity,
    Divide(f64),
}

impl Transform {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Transform::Identity => value,
            Transform::Divide(d) => value / d,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plausibility {
    Any,
    NonZero,
    /// Exclusive bounds.
    Between(f64, f64),
}

impl Plausibility {
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            Plausibility::Any => true,
            Plausibility::NonZero => value != 0.0,
            Plausibility::Between(lo, hi) => *lo < value && value < *hi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Later captures replace earlier ones.
    Overwrite,
    /// The first capture for the field is kept.
    FirstWins,
    /// Overwrite, except for the listed fields which keep an existing value.
    KeepExisting(&'static [&'static str]),
}

impl Precedence {
    /// Whether a new capture for `field` may replace a value already present.
    pub fn may_replace(&self, field: &str) -> bool {
        match self {
            Precedence::Overwrite => true,
            Precedence::FirstWins => false,
            Precedence::KeepExisting(kept) => !kept.contains(&field),
        }
    }
}

/// Static description of one prose extraction rule.
///
/// `pattern` is a template: `{NUM}`, `{RATIO}`, `{UNIT}`, `{CO2E}`,
/// `{TOTAL}` and `{GHG}` are substituted when the catalog is compiled.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRule {
    pub name: &'static str,
    pub target: FieldTarget,
    /// Extra fields receiving the same value.
    pub aliases: &'static [&'static str],
    pub pattern: &'static str,
    pub mode: MatchMode,
    pub unit: UnitSource,
    pub transform: Transform,
    pub plausibility: Plausibility,
    pub precedence: Precedence,
}

/// Prose rules in evaluation order. Scope 2 variants run before the
/// generic scope rule so a market-based figure claims `scope2_co2e_t` first.
pub const RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "scope2_location",
        target: FieldTarget::Fixed(fields::SCOPE2_LOCATION_T),
        aliases: &[],
        pattern: r"(?i)\bScope\s*2\b.*?\blocation[-\s]*based\b.*?{NUM}\s*{UNIT}\s*{CO2E}",
        mode: MatchMode::All,
        unit: UnitSource::Captured,
        transform: Transform::Identity,
        plausibility: Plausibility::Any,
        precedence: Precedence::Overwrite,
    },
    ExtractionRule {
        name: "scope2_market",
        target: FieldTarget::Fixed(fields::SCOPE2_MARKET_T),
        aliases: &[fields::SCOPE2_CO2E_T],
        pattern: r"(?i)\bScope\s*2\b.*?\bmarket[-\s]*based\b.*?{NUM}\s*{UNIT}\s*{CO2E}",
        mode: MatchMode::All,
        unit: UnitSource::Captured,
        transform: Transform::Identity,
        plausibility: Plausibility::Any,
        precedence: Precedence::Overwrite,
    },
    ExtractionRule {
        name: "scope",
        target: FieldTarget::ScopeNumber,
        aliases: &[],
        pattern: r"(?i)\bScope\s*(?P<scope>[123])\b.*?{NUM}\s*{UNIT}\s*{CO2E}",
        mode: MatchMode::All,
        unit: UnitSource::Captured,
        transform: Transform::Identity,
        plausibility: Plausibility::Any,
        precedence: Precedence::KeepExisting(&[fields::SCOPE2_CO2E_T]),
    },
    ExtractionRule {
        name: "total",
        target: FieldTarget::Fixed(fields::TOTAL_CO2E_T),
        aliases: &[],
        pattern: r"(?i)\b(?:{TOTAL})\b.*?\b(?:{GHG})\b.*?{NUM}\s*{UNIT}\s*{CO2E}",
        mode: MatchMode::All,
        unit: UnitSource::Captured,
        transform: Transform::Identity,
        plausibility: Plausibility::Between(0.0, 1e9),
        precedence: Precedence::FirstWins,
    },
    ExtractionRule {
        name: "inv_int_mn",
        target: FieldTarget::Fixed(fields::INVESTMENTS_INTENSITY),
        aliases: &[],
        pattern: r"(?i)(?:t\s*CO2e|CO2e\s*\(t\))\s*(?:/|per)\s*(?:€|EUR)\s*(?:mn|m)\b.*?{RATIO}",
        mode: MatchMode::First,
        unit: UnitSource::Fixed("t"),
        transform: Transform::Identity,
        plausibility: Plausibility::NonZero,
        precedence: Precedence::Overwrite,
    },
    ExtractionRule {
        name: "inv_int_bn",
        target: FieldTarget::Fixed(fields::INVESTMENTS_INTENSITY),
        aliases: &[],
        pattern: r"(?i)(?:t\s*CO2e|CO2e\s*\(t\))\s*(?:/|per)\s*(?:€|EUR)\s*bn\b.*?{RATIO}",
        mode: MatchMode::First,
        unit: UnitSource::Fixed("t"),
        transform: Transform::Divide(1000.0),
        plausibility: Plausibility::NonZero,
        precedence: Precedence::Overwrite,
    },
    ExtractionRule {
        name: "inv_int_kg_mn",
        target: FieldTarget::Fixed(fields::INVESTMENTS_INTENSITY),
        aliases: &[],
        pattern: r"(?i)kg\s*CO2e\s*(?:/|per)\s*(?:€|EUR)\s*(?:mn|m)\b.*?{RATIO}",
        mode: MatchMode::First,
        unit: UnitSource::Fixed("kg"),
        transform: Transform::Identity,
        plausibility: Plausibility::NonZero,
        precedence: Precedence::Overwrite,
    },
];

/// A rule paired with its compiled regex.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: &'static ExtractionRule,
    pub regex: Regex,
}

impl CompiledRule {
    /// Resolve the primary field for a match of this rule.
    pub fn field_for(&self, caps: &regex::Captures<'_>) -> Option<&'static str> {
        match self.rule.target {
            FieldTarget::Fixed(f) => Some(f),
            FieldTarget::ScopeNumber => match caps.name("scope")?.as_str() {
                "1" => Some(fields::SCOPE1_CO2E_T),
                "2" => Some(fields::SCOPE2_CO2E_T),
                "3" => Some(fields::SCOPE3_CO2E_T),
                _ => None,
            },
        }
    }

    /// Unit token for a match, defaulting to tons.
    pub fn unit_for<'h>(&self, caps: &regex::Captures<'h>) -> &'h str {
        match self.rule.unit {
            UnitSource::Captured => caps.name("unit").map_or("t", |m| m.as_str()),
            UnitSource::Fixed(u) => u,
        }
    }
}

/// The prose rule table compiled against a profile's locale labels.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    rules: Vec<CompiledRule>,
}

impl PatternCatalog {
    pub fn compile(profile: &ScanProfile) -> Result<Self, GhgError> {
        let total = alternation(&profile.total_labels);
        let ghg = alternation(&profile.ghg_markers);

        let rules = RULES
            .iter()
            .map(|rule| {
                let expanded = expand_template(rule.pattern, &total, &ghg);
                Regex::new(&expanded)
                    .map(|regex| CompiledRule { rule, regex })
                    .map_err(|source| GhgError::Pattern {
                        rule: rule.name,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PatternCatalog { rules })
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}

fn expand_template(pattern: &str, total: &str, ghg: &str) -> String {
    pattern
        .replace("{NUM}", NUM)
        .replace("{RATIO}", RATIO)
        .replace("{UNIT}", UNIT)
        .replace("{CO2E}", CO2E)
        .replace("{TOTAL}", total)
        .replace("{GHG}", ghg)
}

/// Join literal labels into a regex alternation. Inner whitespace matches
/// any whitespace run so "greenhouse gas" survives line joins.
fn alternation(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| {
            l.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}
