//! Line diffs between two renderings of a document

use serde::Serialize;
use similar::TextDiff;

/// Result of comparing two rendered documents line by line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDiffReport {
    /// True if both texts are identical.
    pub is_equivalent: bool,
    /// Similarity ratio (0.0 to 1.0).
    pub similarity: f64,
    /// Unified diff, empty when equivalent.
    pub unified: String,
}

impl TextDiffReport {
    /// Compare `old` and `new`, labelling the unified diff with `label`.
    pub fn compute(old: &str, new: &str, label: &str) -> Self {
        if old == new {
            return Self {
                is_equivalent: true,
                similarity: 1.0,
                unified: String::new(),
            };
        }

        let diff = TextDiff::from_lines(old, new);
        let unified = diff
            .unified_diff()
            .context_radius(2)
            .header(&format!("a/{label}"), &format!("b/{label}"))
            .to_string();

        Self {
            is_equivalent: false,
            similarity: f64::from(diff.ratio()),
            unified,
        }
    }

    /// Number of added plus removed lines.
    pub fn changed_lines(&self) -> usize {
        self.unified
            .lines()
            .filter(|l| {
                (l.starts_with('+') && !l.starts_with("+++"))
                    || (l.starts_with('-') && !l.starts_with("---"))
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_are_equivalent() {
        let report = TextDiffReport::compute("a\nb\n", "a\nb\n", "pip.xml");
        assert!(report.is_equivalent);
        assert_eq!(report.similarity, 1.0);
        assert!(report.unified.is_empty());
    }

    #[test]
    fn reordered_line_shows_in_unified_diff() {
        let report = TextDiffReport::compute("b\na\n", "a\nb\n", "pip.xml");
        assert!(!report.is_equivalent);
        assert!(report.unified.contains("--- a/pip.xml"));
        assert!(report.unified.contains("+++ b/pip.xml"));
        assert_eq!(report.changed_lines(), 2);
    }
}
