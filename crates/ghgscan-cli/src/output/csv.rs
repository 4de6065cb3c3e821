use ghgscan_core::dataset::{long_rows, wide_columns, wide_row, LONG_HEADER, SOURCE_COLUMN};
use ghgscan_core::error::GhgError;
use ghgscan_core::model::DocumentMetrics;

/// One row per document: `source_pdf` then one column per field seen in any
/// document. Missing values are empty cells.
pub fn format_wide(docs: &[DocumentMetrics]) -> Result<String, GhgError> {
    let columns = wide_columns(docs);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header = std::iter::once(SOURCE_COLUMN).chain(columns.iter().map(String::as_str));
    writer.write_record(header).map_err(std::io::Error::from)?;

    for doc in docs {
        let cells = wide_row(doc, &columns)
            .into_iter()
            .map(|v| v.map(|v| v.to_string()).unwrap_or_default());
        let record = std::iter::once(doc.source.clone()).chain(cells);
        writer.write_record(record).map_err(std::io::Error::from)?;
    }

    finish(writer)
}

/// One row per observation: `source_pdf,metric_std,value`.
pub fn format_long(docs: &[DocumentMetrics]) -> Result<String, GhgError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(LONG_HEADER).map_err(std::io::Error::from)?;

    for row in long_rows(docs) {
        writer
            .write_record([row.source, row.field, row.value.to_string()])
            .map_err(std::io::Error::from)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, GhgError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| GhgError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| GhgError::Extraction(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str, pairs: &[(&str, f64)]) -> DocumentMetrics {
        DocumentMetrics {
            source: source.to_string(),
            metrics: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_wide_csv() {
        let docs = vec![
            doc("a.pdf", &[("scope1_co2e_t", 1000.0)]),
            doc("b, 2024.pdf", &[("propinv_total_t", -1.5)]),
        ];
        let out = format_wide(&docs).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "source_pdf,scope1_co2e_t,propinv_total_t");
        assert_eq!(lines[1], "a.pdf,1000,");
        assert_eq!(lines[2], "\"b, 2024.pdf\",,-1.5");
    }

    #[test]
    fn test_empty_csv_has_header() {
        assert_eq!(format_wide(&[]).unwrap(), "source_pdf\n");
        assert_eq!(format_long(&[]).unwrap(), "source_pdf,metric_std,value\n");
    }

    #[test]
    fn test_long_csv() {
        let docs = vec![
            doc("a.pdf", &[("total_co2e_t", 2400.0), ("scope1_co2e_t", 1000.0)]),
            doc("b.pdf", &[("propinv_total_t", -1.5)]),
        ];
        let out = format_long(&docs).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "source_pdf,metric_std,value",
                "a.pdf,scope1_co2e_t,1000",
                "a.pdf,total_co2e_t,2400",
                "b.pdf,propinv_total_t,-1.5",
            ]
        );
    }
}
