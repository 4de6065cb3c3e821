pub mod dataset;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod rules;
pub mod scan;
pub mod trace;

use error::GhgError;
use extraction::PdfExtractor;
use model::{MetricRecord, ScanOptions};
use parsing::{lines_from_pages, lines_from_text};
use rules::Catalog;
use scan::{scan_metrics_traced, scan_supplement_traced};
use trace::ScanTrace;

/// Run the scanners selected by `options` over normalized lines.
///
/// Prose and supplement fields are disjoint; if a custom setup ever
/// produces both, the supplement value is kept.
pub fn scan_lines<S: AsRef<str>>(
    lines: &[S],
    catalog: &Catalog,
    options: &ScanOptions,
) -> MetricRecord {
    scan_lines_traced(lines, catalog, options).record
}

pub fn scan_lines_traced<S: AsRef<str>>(
    lines: &[S],
    catalog: &Catalog,
    options: &ScanOptions,
) -> ScanTrace {
    let mut trace = ScanTrace::default();
    if options.mode.runs_prose() {
        trace.merge(scan_metrics_traced(lines, &catalog.patterns, options.window));
    }
    if options.mode.runs_supplement() {
        trace.merge(scan_supplement_traced(
            lines,
            &catalog.tracker,
            &catalog.rows,
            options.window,
        ));
    }
    trace
}

/// Scan already-extracted text (pdftotext output or a plain dump).
pub fn scan_text(text: &str, catalog: &Catalog, options: &ScanOptions) -> MetricRecord {
    scan_lines(&lines_from_text(text), catalog, options)
}

pub fn scan_text_traced(text: &str, catalog: &Catalog, options: &ScanOptions) -> ScanTrace {
    scan_lines_traced(&lines_from_text(text), catalog, options)
}

/// Main API entry point: extract a PDF and scan its text.
pub fn scan_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    catalog: &Catalog,
    options: &ScanOptions,
) -> Result<MetricRecord, GhgError> {
    Ok(scan_pdf_traced(pdf_bytes, extractor, catalog, options)?.record)
}

pub fn scan_pdf_traced(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    catalog: &Catalog,
    options: &ScanOptions,
) -> Result<ScanTrace, GhgError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let lines = lines_from_pages(&pages);
    if lines.is_empty() {
        return Err(GhgError::EmptyDocument);
    }

    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        lines = lines.len(),
        mode = %options.mode,
        "scanning document"
    );
    Ok(scan_lines_traced(&lines, catalog, options))
}
