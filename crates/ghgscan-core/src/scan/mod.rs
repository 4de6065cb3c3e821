pub mod metrics;
pub mod section;
pub mod supplement;

pub use metrics::{scan_metrics, scan_metrics_traced};
pub use section::SectionTracker;
pub use supplement::{scan_supplement, scan_supplement_traced};

/// Lines `start..start + size` joined by single spaces, clamped to the input.
/// A size of zero is treated as one.
pub(crate) fn window_at<S: AsRef<str>>(lines: &[S], start: usize, size: usize) -> String {
    let end = start.saturating_add(size.max(1)).min(lines.len());
    lines[start.min(end)..end]
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_joins_following_lines() {
        let lines = ["a", "b", "c"];
        assert_eq!(window_at(&lines, 0, 2), "a b");
        assert_eq!(window_at(&lines, 2, 2), "c");
        assert_eq!(window_at(&lines, 0, 0), "a");
        assert_eq!(window_at(&lines, 1, 10), "b c");
    }
}
