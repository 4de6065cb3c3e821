use crate::model::{fields, DocumentMetrics};
use serde::Serialize;
use std::collections::BTreeSet;

/// Column naming the source document in tabular exports.
pub const SOURCE_COLUMN: &str = "source_pdf";

/// Header of the long export: source, field name, value.
pub const LONG_HEADER: [&str; 3] = [SOURCE_COLUMN, "metric_std", "value"];

/// One `(source, field, value)` observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRow {
    #[serde(rename = "source_pdf")]
    pub source: String,
    #[serde(rename = "metric_std")]
    pub field: String,
    pub value: f64,
}

/// Union of every field seen across `docs`, in [`fields::ALL`] order with
/// unknown fields last by name.
pub fn wide_columns(docs: &[DocumentMetrics]) -> Vec<String> {
    let mut columns: Vec<&str> = docs
        .iter()
        .flat_map(|d| d.metrics.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    columns.sort_by_key(|c| fields::display_rank(c));
    columns.into_iter().map(str::to_string).collect()
}

/// Values of `doc` laid out in `columns` order, None where absent.
pub fn wide_row(doc: &DocumentMetrics, columns: &[String]) -> Vec<Option<f64>> {
    columns.iter().map(|c| doc.metrics.get(c)).collect()
}

/// Flatten documents into observations, documents in input order and
/// fields in display order within each document.
pub fn long_rows(docs: &[DocumentMetrics]) -> Vec<LongRow> {
    docs.iter()
        .flat_map(|d| {
            d.metrics
                .iter_ordered()
                .into_iter()
                .map(move |(field, value)| LongRow {
                    source: d.source.clone(),
                    field: field.to_string(),
                    value,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricRecord;

    fn doc(source: &str, pairs: &[(&str, f64)]) -> DocumentMetrics {
        DocumentMetrics {
            source: source.to_string(),
            metrics: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_wide_columns_in_display_order() {
        let docs = vec![
            doc("a.pdf", &[("scope1_co2e_t", 1.0), ("total_co2e_t", 3.0)]),
            doc("b.pdf", &[("ownops_scope1_t", 2.0), ("scope1_co2e_t", 5.0)]),
        ];
        assert_eq!(
            wide_columns(&docs),
            vec!["scope1_co2e_t", "total_co2e_t", "ownops_scope1_t"]
        );
    }

    #[test]
    fn test_wide_row_fills_gaps() {
        let docs = vec![doc("a.pdf", &[("scope1_co2e_t", 1.0)]), doc("b.pdf", &[("x", 2.0)])];
        let cols = wide_columns(&docs);
        assert_eq!(wide_row(&docs[0], &cols), vec![Some(1.0), None]);
        assert_eq!(wide_row(&docs[1], &cols), vec![None, Some(2.0)]);
    }

    #[test]
    fn test_long_rows() {
        let docs = vec![
            doc("a.pdf", &[("total_co2e_t", 3.0), ("scope1_co2e_t", 1.0)]),
            doc("b.pdf", &[]),
            doc("c.pdf", &[("propinv_total_t", -1.5)]),
        ];
        let rows = long_rows(&docs);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].field, "scope1_co2e_t");
        assert_eq!(rows[2].source, "c.pdf");
        assert_eq!(rows[2].value, -1.5);
    }

    #[test]
    fn test_long_row_serializes_consumer_columns() {
        let row = LongRow {
            source: "a.pdf".into(),
            field: "scope1_co2e_t".into(),
            value: 1.0,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["source_pdf"], "a.pdf");
        assert_eq!(json["metric_std"], "scope1_co2e_t");
        assert_eq!(LONG_HEADER, ["source_pdf", "metric_std", "value"]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(wide_columns(&[]).is_empty());
        assert!(long_rows(&[]).is_empty());
        let d = DocumentMetrics {
            source: "x".into(),
            metrics: MetricRecord::new(),
        };
        assert!(wide_row(&d, &[]).is_empty());
    }
}
