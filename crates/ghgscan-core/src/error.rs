use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GhgError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load scan profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid scan profile: {0}")]
    ProfileInvalid(String),

    #[error("failed to compile pattern for rule '{rule}': {source}")]
    Pattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("no text lines found in document")]
    EmptyDocument,

    #[error("{}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: Box<GhgError>,
    },

    #[error("{failed} of {total} document(s) could not be scanned")]
    DocumentsFailed { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GhgError {
    /// Attach the input path the error came from.
    pub fn for_input(self, path: &std::path::Path) -> GhgError {
        GhgError::Input {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}
