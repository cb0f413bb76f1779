//! Response Classifier: free-text analysis to [`SubagentResult`]

use super::types::{SectionStatus, SubagentResult};

pub const FALLBACK_SUMMARY: &str = "Analysis complete";

const ERROR_KEYWORDS: &[&str] = &["error", "critical", "fail"];
const WARNING_KEYWORDS: &[&str] = &["warning", "caution", "consider"];

/// Evaluated in order, first match wins; error outranks warning.
const STATUS_RULES: &[(&[&str], SectionStatus)] = &[
    (ERROR_KEYWORDS, SectionStatus::Error),
    (WARNING_KEYWORDS, SectionStatus::Warning),
];

pub fn classify_status(text: &str) -> SectionStatus {
    let lowered = text.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, status)| *status)
        .unwrap_or(SectionStatus::Ok)
}

/// Classifies one analysis text. Total: empty input gives an `ok` result
/// with the fallback summary.
pub fn classify(text: &str, category: &str) -> SubagentResult {
    let mut lines = text.lines();

    let summary = lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or(FALLBACK_SUMMARY)
        .to_string();

    let details = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    SubagentResult {
        category: category.to_string(),
        status: classify_status(text),
        summary,
        details,
        metrics: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_blank_lines_are_filtered() {
        let result = classify("Summary line\nDetail 1\n\nDetail 2", "x");
        assert_eq!(result.summary, "Summary line");
        assert_eq!(result.details, vec!["Detail 1", "Detail 2"]);
        assert_eq!(result.category, "x");
    }

    #[test]
    fn test_empty_text() {
        let result = classify("", "caching");
        assert_eq!(result.status, SectionStatus::Ok);
        assert_eq!(result.summary, FALLBACK_SUMMARY);
        assert!(result.details.is_empty());
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_blank_first_line_uses_fallback_summary() {
        let result = classify("   \nBuild looks fine", "structure");
        assert_eq!(result.summary, FALLBACK_SUMMARY);
        assert_eq!(result.details, vec!["Build looks fine"]);
    }

    #[test]
    fn test_whitespace_only_lines_never_reach_details() {
        let result = classify("Head\n  \n\t\n- bullet one\n   \n- bullet two\n", "x");
        assert_eq!(result.details, vec!["- bullet one", "- bullet two"]);
        assert!(result.details.iter().all(|d| !d.trim().is_empty()));
    }

    #[parameterized(
        plain_ok = { "Everything is tidy and fast", SectionStatus::Ok },
        error_word = { "Compilation error in buildSrc", SectionStatus::Error },
        critical_upper = { "CRITICAL: daemon disabled", SectionStatus::Error },
        failure_stem = { "Two tasks failed to cache", SectionStatus::Error },
        warning_word = { "Warning: parallel builds off", SectionStatus::Warning },
        caution_word = { "Use caution with dynamic versions", SectionStatus::Warning },
        consider_word = { "Consider enabling the configuration cache", SectionStatus::Warning },
        error_beats_warning = { "Warning: consider this\nbut an error occurred", SectionStatus::Error },
    )]
    fn test_status_classification(text: &str, expected: SectionStatus) {
        assert_eq!(classify(text, "any").status, expected);
    }

    #[test]
    fn test_category_does_not_affect_status() {
        let a = classify("Consider upgrading", "performance");
        let b = classify("Consider upgrading", "dependencies");
        assert_eq!(a.status, b.status);
        assert_eq!(a.details, b.details);
    }
}
