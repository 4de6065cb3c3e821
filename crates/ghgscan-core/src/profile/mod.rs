pub mod builtin;
pub mod schema;

use crate::error::GhgError;
use schema::ScanProfile;
use std::path::Path;

/// Load a scan profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ScanProfile, GhgError> {
    let content = std::fs::read_to_string(path).map_err(|e| GhgError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a scan profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<ScanProfile, GhgError> {
    let profile: ScanProfile = serde_json::from_str(json).map_err(|e| GhgError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a scan profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ScanProfile, GhgError> {
    let profile: ScanProfile = serde_json::from_str(json).map_err(GhgError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &ScanProfile) -> Result<(), GhgError> {
    if profile.name.trim().is_empty() {
        return Err(GhgError::ProfileInvalid("name must not be empty".into()));
    }

    check_labels("total_labels", &profile.total_labels)?;
    check_labels("ghg_markers", &profile.ghg_markers)?;

    let sections = &profile.sections;
    for (field, phrase) in [
        ("sections.proprietary_investments", &sections.proprietary_investments),
        ("sections.own_operations", &sections.own_operations),
        ("sections.closing", &sections.closing),
    ] {
        if phrase.trim().is_empty() {
            return Err(GhgError::ProfileInvalid(format!(
                "{} must not be empty",
                field
            )));
        }
    }

    if sections.own_operations.trim().to_lowercase() == sections.closing.trim().to_lowercase()
        || sections.proprietary_investments.trim().to_lowercase()
            == sections.closing.trim().to_lowercase()
    {
        return Err(GhgError::ProfileInvalid(
            "section closing phrase must differ from the entering phrases".into(),
        ));
    }

    Ok(())
}

fn check_labels(field: &str, labels: &[String]) -> Result<(), GhgError> {
    if labels.is_empty() {
        return Err(GhgError::ProfileInvalid(format!("{} must not be empty", field)));
    }
    if labels.iter().any(|l| l.trim().is_empty()) {
        return Err(GhgError::ProfileInvalid(format!(
            "{} must not contain blank entries",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "total_labels": ["Total"],
        "ghg_markers": ["GHG"],
        "sections": {
            "proprietary_investments": "proprietary investments ghg emissions",
            "own_operations": "own operations",
            "closing": "tables of the sustainability statement"
        }
    }"#;

    #[test]
    fn test_parse_valid_profile() {
        let p = parse_profile_str(VALID).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.total_labels, vec!["Total"]);
        assert!(p.locales.is_empty());
        assert!(p.description.is_none());
    }

    #[test]
    fn test_empty_total_labels_rejected() {
        let json = VALID.replace(r#"["Total"]"#, "[]");
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_blank_marker_rejected() {
        let json = VALID.replace(r#"["GHG"]"#, r#"["GHG", "  "]"#);
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_empty_section_phrase_rejected() {
        let json = VALID.replace(r#""own operations""#, r#""""#);
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_closing_equal_to_entering_rejected() {
        let json = VALID.replace(
            r#""tables of the sustainability statement""#,
            r#""Own Operations""#,
        );
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_missing_sections_is_load_error() {
        let json = r#"{"name": "X", "version": "1", "total_labels": ["T"], "ghg_markers": ["G"]}"#;
        let err = parse_profile(json, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, GhgError::ProfileLoad { .. }));
    }
}
