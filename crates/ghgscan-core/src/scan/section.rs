use crate::model::SectionTag;
use crate::profile::schema::SectionTriggers;

/// Forward-only state machine tagging each line with its report section.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    proprietary: String,
    own_operations: String,
    closing: String,
}

impl SectionTracker {
    pub fn new(triggers: &SectionTriggers) -> Self {
        SectionTracker {
            proprietary: triggers.proprietary_investments.trim().to_lowercase(),
            own_operations: triggers.own_operations.trim().to_lowercase(),
            closing: triggers.closing.trim().to_lowercase(),
        }
    }

    /// Apply one line's triggers to `state`.
    ///
    /// The proprietary phrase is checked before the own-operations phrase;
    /// the closing phrase is checked last and wins over both.
    pub fn step(&self, state: SectionTag, line: &str) -> SectionTag {
        let low = line.to_lowercase();
        let mut next = state;
        if low.contains(&self.proprietary) {
            next = SectionTag::ProprietaryInvestments;
        } else if low.contains(&self.own_operations) {
            next = SectionTag::OwnOperations;
        }
        if low.contains(&self.closing) {
            next = SectionTag::None;
        }
        next
    }

    /// One tag per line: the state in effect after that line's triggers.
    pub fn tag_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<SectionTag> {
        let mut state = SectionTag::None;
        lines
            .iter()
            .map(|line| {
                let line: &str = line.as_ref();
                let next = self.step(state, line);
                if next != state {
                    tracing::trace!(from = ?state, to = ?next, line, "section change");
                }
                state = next;
                state
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::load_preset;

    fn tracker() -> SectionTracker {
        SectionTracker::new(&load_preset("en-cs").unwrap().sections)
    }

    #[test]
    fn test_own_operations_until_closing() {
        let lines = [
            "Intro",
            "GHG emissions from Own Operations",
            "Gross Scope 1 GHG emissions 1234",
            "Tables of the Sustainability Statement",
            "Gross Scope 1 GHG emissions 99",
        ];
        assert_eq!(
            tracker().tag_lines(&lines),
            vec![
                SectionTag::None,
                SectionTag::OwnOperations,
                SectionTag::OwnOperations,
                SectionTag::None,
                SectionTag::None,
            ]
        );
    }

    #[test]
    fn test_proprietary_checked_before_own_operations() {
        let lines = ["Proprietary investments GHG emissions vs own operations"];
        assert_eq!(
            tracker().tag_lines(&lines),
            vec![SectionTag::ProprietaryInvestments]
        );
    }

    #[test]
    fn test_switch_between_sections() {
        let lines = [
            "Own operations",
            "row",
            "Proprietary investments GHG emissions",
            "row",
        ];
        assert_eq!(
            tracker().tag_lines(&lines),
            vec![
                SectionTag::OwnOperations,
                SectionTag::OwnOperations,
                SectionTag::ProprietaryInvestments,
                SectionTag::ProprietaryInvestments,
            ]
        );
    }

    #[test]
    fn test_closing_wins_on_same_line() {
        let t = tracker();
        let line = "Proprietary investments GHG emissions - Tables of the sustainability statement";
        assert_eq!(t.step(SectionTag::None, line), SectionTag::None);
        let line = "Own operations | tables of the sustainability statement";
        assert_eq!(t.step(SectionTag::ProprietaryInvestments, line), SectionTag::None);
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(tracker().tag_lines(&lines).is_empty());
    }
}
