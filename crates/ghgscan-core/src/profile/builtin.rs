use crate::error::GhgError;
use crate::profile::schema::ScanProfile;

const EN_CS_JSON: &str = include_str!("../../../../profiles/en-cs.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["en-cs"];

/// Preset used when no profile is given.
pub const DEFAULT_PRESET: &str = "en-cs";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<ScanProfile, GhgError> {
    match name {
        "en-cs" => {
            let profile: ScanProfile = serde_json::from_str(EN_CS_JSON)?;
            Ok(profile)
        }
        _ => Err(GhgError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
