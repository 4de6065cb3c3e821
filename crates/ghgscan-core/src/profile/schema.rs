use serde::{Deserialize, Serialize};

/// Locale and section configuration for a scan.
///
/// Everything locale-specific lives here so that supporting another
/// report language is a new profile file, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Informational list of language codes the labels cover.
    #[serde(default)]
    pub locales: Vec<String>,
    /// Words that introduce a grand total row ("Total", "Celkem").
    /// Matched literally, case-insensitively, on word boundaries.
    pub total_labels: Vec<String>,
    /// Words marking a greenhouse-gas figure ("GHG", "emise").
    pub ghg_markers: Vec<String>,
    pub sections: SectionTriggers,
}

/// Lowercase substring phrases driving the section tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTriggers {
    /// Enters the proprietary-investments section. Checked first.
    pub proprietary_investments: String,
    /// Enters the own-operations section.
    pub own_operations: String,
    /// Leaves any section. Wins over an entering phrase on the same line.
    pub closing: String,
}
