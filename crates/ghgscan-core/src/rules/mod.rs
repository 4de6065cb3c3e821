pub mod catalog;
pub mod rows;

use crate::error::GhgError;
use crate::profile::builtin::{load_preset, DEFAULT_PRESET};
use crate::profile::schema::ScanProfile;
use crate::profile::validate_profile;
use crate::scan::section::SectionTracker;
use catalog::PatternCatalog;
use rows::RowCatalog;
use std::sync::LazyLock;

/// Everything a scan needs, compiled once from a profile.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub profile_name: String,
    pub patterns: PatternCatalog,
    pub rows: RowCatalog,
    pub tracker: SectionTracker,
}

impl Catalog {
    /// Validate `profile` and compile its patterns.
    pub fn compile(profile: &ScanProfile) -> Result<Self, GhgError> {
        validate_profile(profile)?;
        let catalog = Catalog {
            profile_name: profile.name.clone(),
            patterns: PatternCatalog::compile(profile)?,
            rows: RowCatalog::compile()?,
            tracker: SectionTracker::new(&profile.sections),
        };
        tracing::debug!(
            profile = %catalog.profile_name,
            prose_rules = catalog.patterns.rules().len(),
            "catalog compiled"
        );
        Ok(catalog)
    }

    /// Catalog for the default embedded profile, compiled on first use.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
            load_preset(DEFAULT_PRESET)
                .and_then(|p| Catalog::compile(&p))
                .expect("embedded en-cs profile is valid")
        });
        &BUILTIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let c = Catalog::builtin();
        assert_eq!(c.profile_name, "en-cs");
        assert_eq!(c.patterns.rules().len(), catalog::RULES.len());
        assert!(std::ptr::eq(c, Catalog::builtin()));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut p = load_preset("en-cs").unwrap();
        p.total_labels.clear();
        assert!(matches!(
            Catalog::compile(&p),
            Err(GhgError::ProfileInvalid(_))
        ));
    }
}
