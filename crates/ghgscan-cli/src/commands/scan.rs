use clap::Args;
use ghgscan_core::error::GhgError;
use ghgscan_core::extraction::pdftotext::PdftotextExtractor;
use ghgscan_core::model::{DocumentMetrics, ScanMode, ScanOptions, DEFAULT_WINDOW};
use ghgscan_core::rules::Catalog;
use ghgscan_core::trace::ScanTrace;
use std::path::{Path, PathBuf};

use super::{is_pdf, source_name, ProfileArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// PDF or extracted-text files to scan
    #[arg(required = true, value_name = "FILE")]
    pub input_files: Vec<PathBuf>,

    /// Scanners to run: prose, supplement or both
    #[arg(short, long, default_value = "both", value_parser = parse_mode)]
    pub mode: ScanMode,

    /// Consecutive lines joined into one scan window
    #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Output format: table (default), json, csv or csv-long
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Write output to a file instead of stdout
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Include evidence and dropped candidates (table and json)
    #[arg(long)]
    pub trace: bool,

    /// Keep the physical layout when extracting PDF text
    #[arg(long)]
    pub layout: bool,
}

fn parse_mode(s: &str) -> Result<ScanMode, String> {
    ScanMode::from_str_loose(s)
        .ok_or_else(|| format!("unknown mode '{s}'. Available: prose, supplement, both"))
}

pub fn run(args: ScanArgs) -> Result<(), GhgError> {
    let catalog = args.profile.catalog()?;
    let options = ScanOptions {
        mode: args.mode,
        window: args.window,
    };

    let (traces, failed) = scan_documents(&args.input_files, &catalog, &options, args.layout);

    let docs: Vec<DocumentMetrics> = traces
        .iter()
        .map(|(source, trace)| DocumentMetrics {
            source: source.clone(),
            metrics: trace.record.clone(),
        })
        .collect();

    let rendered = match args.output.as_str() {
        "json" if args.trace => output::json::format_traces(&traces)?,
        "json" => output::json::format_documents(&docs)?,
        "csv" => output::csv::format_wide(&docs)?,
        "csv-long" => output::csv::format_long(&docs)?,
        _ if args.trace => output::table::format_traces(&traces),
        _ => output::table::format_documents(&docs),
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, rendered).map_err(|e| GhgError::from(e).for_input(&path))?;
            tracing::info!(
                documents = docs.len(),
                path = %path.display(),
                "output written"
            );
        }
        None => print!("{rendered}"),
    }

    if failed > 0 {
        return Err(GhgError::DocumentsFailed {
            failed,
            total: args.input_files.len(),
        });
    }
    Ok(())
}

/// Scan every input in order. A document that cannot be read or extracted
/// is logged and skipped; the count of skipped documents is returned.
fn scan_documents(
    paths: &[PathBuf],
    catalog: &Catalog,
    options: &ScanOptions,
    layout: bool,
) -> (Vec<(String, ScanTrace)>, usize) {
    let mut traces = Vec::with_capacity(paths.len());
    let mut failed = 0;

    for path in paths {
        let source = source_name(path);
        match scan_file(path, catalog, options, layout) {
            Ok(trace) => {
                tracing::info!(
                    source = %source,
                    fields = trace.record.len(),
                    dropped = trace.dropped.len(),
                    "scanned document"
                );
                traces.push((source, trace));
            }
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "skipping document");
                failed += 1;
            }
        }
    }

    (traces, failed)
}

fn scan_file(
    path: &Path,
    catalog: &Catalog,
    options: &ScanOptions,
    layout: bool,
) -> Result<ScanTrace, GhgError> {
    let bytes = std::fs::read(path).map_err(|e| GhgError::from(e).for_input(path))?;
    if is_pdf(path) {
        let extractor = PdftotextExtractor::new().with_layout(layout);
        ghgscan_core::scan_pdf_traced(&bytes, &extractor, catalog, options)
            .map_err(|e| e.for_input(path))
    } else {
        let text = String::from_utf8_lossy(&bytes);
        Ok(ghgscan_core::scan_text_traced(&text, catalog, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("Prose"), Ok(ScanMode::Prose));
        assert_eq!(parse_mode("supplement"), Ok(ScanMode::Supplement));
        assert!(parse_mode("everything").is_err());
    }

    #[test]
    fn test_scan_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        std::io::Write::write_all(&mut file, "Scope 1 GHG emissions: 1,000 t CO2e\n".as_bytes())
            .unwrap();
        let trace = scan_file(
            file.path(),
            Catalog::builtin(),
            &ScanOptions::default(),
            false,
        )
        .unwrap();
        assert_eq!(trace.record.get("scope1_co2e_t"), Some(1000.0));
    }

    fn text_file(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        std::io::Write::write_all(&mut file, bytes).unwrap();
        file
    }

    #[test]
    fn test_non_utf8_text_does_not_drop_batch() {
        let good = text_file(b"Scope 1 GHG emissions: 1,000 t CO2e\n");
        let latin1 = text_file(b"Caf\xe9 report\nScope 1 GHG emissions: 250 t CO2e\n");
        let paths = vec![good.path().to_path_buf(), latin1.path().to_path_buf()];

        let (traces, failed) =
            scan_documents(&paths, Catalog::builtin(), &ScanOptions::default(), false);

        assert_eq!(failed, 0);
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].1.record.get("scope1_co2e_t"), Some(1000.0));
        assert_eq!(traces[1].1.record.get("scope1_co2e_t"), Some(250.0));
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let good = text_file(b"Scope 1 GHG emissions: 1,000 t CO2e\n");
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let paths = vec![missing.clone(), good.path().to_path_buf()];

        let (traces, failed) =
            scan_documents(&paths, Catalog::builtin(), &ScanOptions::default(), false);

        assert_eq!(failed, 1);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].0, source_name(good.path()));
        assert_eq!(traces[0].1.record.get("scope1_co2e_t"), Some(1000.0));

        let err = scan_file(&missing, Catalog::builtin(), &ScanOptions::default(), false)
            .unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
