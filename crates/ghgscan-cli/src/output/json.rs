use ghgscan_core::error::GhgError;
use ghgscan_core::model::DocumentMetrics;
use ghgscan_core::trace::ScanTrace;
use serde::Serialize;

#[derive(Serialize)]
struct TracedDocument<'a> {
    source: &'a str,
    #[serde(flatten)]
    trace: &'a ScanTrace,
}

pub fn format_documents(docs: &[DocumentMetrics]) -> Result<String, GhgError> {
    let mut json = serde_json::to_string_pretty(docs)?;
    json.push('\n');
    Ok(json)
}

pub fn format_traces(traces: &[(String, ScanTrace)]) -> Result<String, GhgError> {
    let docs: Vec<TracedDocument<'_>> = traces
        .iter()
        .map(|(source, trace)| TracedDocument { source, trace })
        .collect();
    let mut json = serde_json::to_string_pretty(&docs)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghgscan_core::model::MetricRecord;

    #[test]
    fn test_documents_are_flat_objects() {
        let mut metrics = MetricRecord::new();
        metrics.insert("scope1_co2e_t", 1000.0);
        let docs = vec![DocumentMetrics {
            source: "a.pdf".into(),
            metrics,
        }];
        let value: serde_json::Value =
            serde_json::from_str(&format_documents(&docs).unwrap()).unwrap();
        assert_eq!(value[0]["source"], "a.pdf");
        assert_eq!(value[0]["metrics"]["scope1_co2e_t"], 1000.0);
    }

    #[test]
    fn test_traces_carry_source() {
        let traces = vec![("b.txt".to_string(), ScanTrace::default())];
        let value: serde_json::Value =
            serde_json::from_str(&format_traces(&traces).unwrap()).unwrap();
        assert_eq!(value[0]["source"], "b.txt");
        assert!(value[0]["evidence"].as_array().unwrap().is_empty());
    }
}
