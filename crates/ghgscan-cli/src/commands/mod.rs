pub mod lines;
pub mod profiles;
pub mod scan;

use clap::Args;
use ghgscan_core::error::GhgError;
use ghgscan_core::extraction::pdftotext::PdftotextExtractor;
use ghgscan_core::extraction::PdfExtractor;
use ghgscan_core::parsing::{lines_from_pages, lines_from_text};
use ghgscan_core::profile::{builtin, load_profile};
use ghgscan_core::rules::Catalog;
use std::borrow::Cow;
use std::path::Path;

/// Profile selection shared by the commands that scan.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Predefined profile (default: en-cs)
    #[arg(short, long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    /// Custom JSON profile file
    #[arg(long = "profile-file", value_name = "FILE", conflicts_with = "profile")]
    pub profile_file: Option<std::path::PathBuf>,
}

impl ProfileArgs {
    pub fn catalog(&self) -> Result<Cow<'static, Catalog>, GhgError> {
        if let Some(path) = &self.profile_file {
            let profile = load_profile(path)?;
            return Ok(Cow::Owned(Catalog::compile(&profile)?));
        }
        match self.profile.as_deref() {
            None => Ok(Cow::Borrowed(Catalog::builtin())),
            Some(name) if name == builtin::DEFAULT_PRESET => Ok(Cow::Borrowed(Catalog::builtin())),
            Some(name) => Ok(Cow::Owned(Catalog::compile(&builtin::load_preset(name)?)?)),
        }
    }
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Display name of an input, as it appears in reports.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Normalized lines of a PDF or a plain-text dump.
pub fn read_lines(path: &Path, layout: bool) -> Result<Vec<String>, GhgError> {
    let bytes = std::fs::read(path).map_err(|e| GhgError::from(e).for_input(path))?;
    if is_pdf(path) {
        let extractor = PdftotextExtractor::new().with_layout(layout);
        let pages = extractor
            .extract_pages(&bytes)
            .map_err(|e| e.for_input(path))?;
        Ok(lines_from_pages(&pages))
    } else {
        Ok(lines_from_text(&String::from_utf8_lossy(&bytes)))
    }
}
