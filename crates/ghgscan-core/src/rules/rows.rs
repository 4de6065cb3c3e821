use crate::error::GhgError;
use crate::model::{fields, SectionTag};
use regex::{Match, Regex};

/// Signed number directly after a row label, thousands groups allowed.
const ROW_NUM: &str = r"(?P<val>-?\d{1,3}(?:[.,]\d{3})*(?:[.,]\d+)?|-?\d+(?:[.,]\d+)?)";
/// First signed decimal anywhere after the label.
const SIGNED_NUM: &str = r"(?P<val>-?\d+(?:[.,]\d+)?)";
/// Intensity rows share their label with the absolute rows.
const PER_EMPLOYEE: &str = r"per\s+employee";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberCapture {
    /// The number must follow the label separated only by whitespace.
    DirectlyAfter,
    /// The first signed number anywhere after the label.
    FirstAfter,
}

/// Static description of one table-row rule. Values are always tons.
#[derive(Debug, Clone, Copy)]
pub struct RowRule {
    pub field: &'static str,
    /// Section the row is read in.
    pub section: SectionTag,
    pub label: &'static str,
    /// The label does not count when this pattern occurs after it on the line.
    pub exclude_after: Option<&'static str>,
    pub capture: NumberCapture,
}

pub const ROW_RULES: &[RowRule] = &[
    RowRule {
        field: fields::OWNOPS_SCOPE1_T,
        section: SectionTag::OwnOperations,
        label: r"Gross\s+Scope\s*1\s+GHG\s+emissions",
        exclude_after: Some(PER_EMPLOYEE),
        capture: NumberCapture::DirectlyAfter,
    },
    RowRule {
        field: fields::OWNOPS_SCOPE2_LOCATION_T,
        section: SectionTag::OwnOperations,
        label: r"Gross\s+location[-\s]*based\s+Scope\s*2\s+GHG\s+emissions",
        exclude_after: Some(PER_EMPLOYEE),
        capture: NumberCapture::DirectlyAfter,
    },
    RowRule {
        field: fields::OWNOPS_SCOPE2_MARKET_T,
        section: SectionTag::OwnOperations,
        label: r"Gross\s+market[-\s]*based\s+Scope\s*2\s+GHG\s+emissions",
        exclude_after: Some(PER_EMPLOYEE),
        capture: NumberCapture::DirectlyAfter,
    },
    RowRule {
        field: fields::OWNOPS_SCOPE3_T,
        section: SectionTag::OwnOperations,
        label: r"Scope\s*3\s+GHG\s+emissions",
        exclude_after: Some(PER_EMPLOYEE),
        capture: NumberCapture::DirectlyAfter,
    },
    RowRule {
        field: fields::OWNOPS_TOTAL_LOCATION_T,
        section: SectionTag::OwnOperations,
        label: r"Total\s+own\s+operations\s+GHG\s+emissions\s*\(location[-\s]*based\)",
        exclude_after: Some(PER_EMPLOYEE),
        capture: NumberCapture::DirectlyAfter,
    },
    RowRule {
        field: fields::OWNOPS_TOTAL_MARKET_T,
        section: SectionTag::OwnOperations,
        label: r"Total\s+own\s+operations\s+GHG\s+emissions\s*\(market[-\s]*based\)",
        exclude_after: Some(PER_EMPLOYEE),
        capture: NumberCapture::DirectlyAfter,
    },
    RowRule {
        field: fields::PROPINV_TOTAL_T,
        section: SectionTag::ProprietaryInvestments,
        label: r"Proprietary\s+investments\s+GHG\s+emissions\s*\(Scope\s*1-3\)\s*-\s*TOTAL",
        exclude_after: None,
        capture: NumberCapture::FirstAfter,
    },
];

#[derive(Debug, Clone)]
pub struct CompiledRowRule {
    pub rule: &'static RowRule,
    label: Regex,
    value: Regex,
    exclude: Option<Regex>,
}

impl CompiledRowRule {
    fn compile(rule: &'static RowRule) -> Result<Self, regex::Error> {
        let value = match rule.capture {
            NumberCapture::DirectlyAfter => format!(r"(?i)(?P<label>{})\s+{}", rule.label, ROW_NUM),
            NumberCapture::FirstAfter => format!(r"(?i)(?P<label>{}).*?{}", rule.label, SIGNED_NUM),
        };
        Ok(CompiledRowRule {
            rule,
            label: Regex::new(&format!("(?i){}", rule.label))?,
            value: Regex::new(&value)?,
            exclude: rule
                .exclude_after
                .map(|p| Regex::new(&format!("(?i){}", p)))
                .transpose()?,
        })
    }

    fn excluded_after(&self, text: &str, label_end: usize) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|ex| ex.is_match(&text[label_end..]))
    }

    /// First label occurrence in `text` that is not followed by the exclusion.
    pub fn find_label<'h>(&self, text: &'h str) -> Option<Match<'h>> {
        self.label
            .find_iter(text)
            .find(|m| !self.excluded_after(text, m.end()))
    }

    /// Raw numeric literal belonging to the first qualifying label in `text`.
    pub fn value_literal<'h>(&self, text: &'h str) -> Option<&'h str> {
        self.value.captures_iter(text).find_map(|caps| {
            let label = caps.name("label")?;
            if self.excluded_after(text, label.end()) {
                return None;
            }
            caps.name("val").map(|m| m.as_str())
        })
    }
}

/// The row-rule table with compiled patterns.
#[derive(Debug, Clone)]
pub struct RowCatalog {
    rules: Vec<CompiledRowRule>,
}

impl RowCatalog {
    pub fn compile() -> Result<Self, GhgError> {
        let rules = ROW_RULES
            .iter()
            .map(|rule| {
                CompiledRowRule::compile(rule).map_err(|source| GhgError::Pattern {
                    rule: rule.field,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RowCatalog { rules })
    }

    /// Rules read inside `section`, in table order.
    pub fn for_section(&self, section: SectionTag) -> impl Iterator<Item = &CompiledRowRule> {
        self.rules.iter().filter(move |r| r.rule.section == section)
    }
}
