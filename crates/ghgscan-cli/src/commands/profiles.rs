use ghgscan_core::error::GhgError;
use ghgscan_core::model::SectionTag;
use ghgscan_core::profile::builtin;
use ghgscan_core::profile::schema::ScanProfile;
use ghgscan_core::rules::catalog::{FieldTarget, RULES};
use ghgscan_core::rules::rows::ROW_RULES;
use ghgscan_core::rules::Catalog;
use std::collections::HashSet;
use std::path::Path;

pub fn list() -> Result<(), GhgError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let locales = if profile.locales.is_empty() {
            String::new()
        } else {
            format!(" [{}]", profile.locales.join(", "))
        };
        println!("  {:<8} v{}{}", name, profile.version, locales);
        if let Some(ref desc) = profile.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), GhgError> {
    let profile = builtin::load_preset(preset)?;

    println!("{} (version {})\n", profile.name, profile.version);
    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!("Grand total labels:  {}", profile.total_labels.join(" | "));
    println!("GHG markers:         {}", profile.ghg_markers.join(" | "));
    println!();

    println!("Section phrases (case-insensitive substring):");
    println!(
        "  enter {:<24} \"{}\"",
        SectionTag::ProprietaryInvestments.to_string(),
        profile.sections.proprietary_investments
    );
    println!(
        "  enter {:<24} \"{}\"",
        SectionTag::OwnOperations.to_string(),
        profile.sections.own_operations
    );
    println!("  leave {:<24} \"{}\"", "any", profile.sections.closing);
    println!();

    println!("Prose rules, in evaluation order:");
    for rule in RULES {
        let target = match rule.target {
            FieldTarget::Fixed(field) => field.to_string(),
            FieldTarget::ScopeNumber => "scope{1,2,3}_co2e_t".to_string(),
        };
        let aliases = if rule.aliases.is_empty() {
            String::new()
        } else {
            format!(" (also {})", rule.aliases.join(", "))
        };
        println!("  {:<14} -> {}{}", rule.name, target, aliases);
    }
    println!();

    println!("Supplement rows:");
    for rule in ROW_RULES {
        println!("  {:<24} {:<26} {}", rule.section.to_string(), rule.field, rule.label);
    }
    println!();

    Ok(())
}

pub fn schema() -> Result<(), GhgError> {
    print!(
        r#"JSON Profile Schema
===================

A profile holds the locale-specific words the scanners look for. The
extraction rules themselves are fixed; a profile changes which words
introduce a grand total, which words mark a greenhouse-gas figure, and
which phrases open and close the sections of a supplement.

Top-level fields:
  name          (string, required)  Short identifier of the profile
  description   (string, optional)  What reports this profile is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  locales       (array, optional)   Language codes the labels cover
  total_labels  (array, required)   Words introducing a grand total row.
                                    Matched literally, case-insensitively,
                                    on word boundaries. Example: ["Total"]
  ghg_markers   (array, required)   Words that must follow the total label
                                    before the number. Example: ["GHG"]
  sections      (object, required)  Section phrases (see below)

The "sections" object:
  proprietary_investments
                (string, required)  Phrase entering the proprietary
                                    investments section. Checked first.
  own_operations
                (string, required)  Phrase entering the own operations section.
  closing       (string, required)  Phrase leaving any section. Wins over an
                                    entering phrase on the same line.

Section phrases are matched as lowercase substrings of each line.

Example:
{{
  "name": "de",
  "description": "German sustainability reports",
  "version": "1.0",
  "locales": ["de"],
  "total_labels": ["Gesamt", "Summe"],
  "ghg_markers": ["THG", "Treibhausgas"],
  "sections": {{
    "proprietary_investments": "eigenanlagen thg-emissionen",
    "own_operations": "eigener geschäftsbetrieb",
    "closing": "tabellen der nachhaltigkeitserklärung"
  }}
}}

Run `ghgscan profiles explain en-cs` to see the builtin profile and the
rules it drives.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), GhgError> {
    let profile = ghgscan_core::profile::load_profile(file)?;
    Catalog::compile(&profile)?;

    println!("Profile '{}' (v{}) is valid.", profile.name, profile.version);
    println!("  Total labels: {}", profile.total_labels.join(", "));
    println!("  GHG markers: {}", profile.ghg_markers.join(", "));

    let warnings = profile_warnings(&profile);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Issues worth reporting that do not make a profile unusable.
fn profile_warnings(profile: &ScanProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    if profile.locales.is_empty() {
        warnings.push("no locales listed".to_string());
    }

    for (field, labels) in [
        ("total_labels", &profile.total_labels),
        ("ghg_markers", &profile.ghg_markers),
    ] {
        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label.to_lowercase()) {
                warnings.push(format!("{} lists '{}' more than once", field, label));
            }
        }
    }

    let sections = &profile.sections;
    if sections
        .proprietary_investments
        .to_lowercase()
        .contains(&sections.own_operations.to_lowercase())
    {
        warnings.push(
            "the own-operations phrase is part of the proprietary phrase; \
             proprietary wins on lines containing both"
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profile_has_no_warnings() {
        let profile = builtin::load_preset("en-cs").unwrap();
        assert!(profile_warnings(&profile).is_empty());
    }

    #[test]
    fn test_duplicate_labels_warned() {
        let mut profile = builtin::load_preset("en-cs").unwrap();
        profile.total_labels.push("TOTAL".into());
        profile.locales.clear();
        let warnings = profile_warnings(&profile);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("'TOTAL'")));
    }
}
