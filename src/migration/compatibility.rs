use super::types::{BreakingChange, Compatibility, Deprecation, Impact};
use serde::{Deserialize, Serialize};

/// Cut-offs for [`assess_compatibility`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityThresholds {
    /// At least this many deprecations, with no breaking changes, is `minor-changes`
    pub minor_changes_deprecations: usize,
    /// At least this many high-impact breaking changes is `breaking`
    pub breaking_high_impact: usize,
}

impl Default for CompatibilityThresholds {
    fn default() -> Self {
        Self {
            minor_changes_deprecations: 10,
            breaking_high_impact: 2,
        }
    }
}

/// Rules, first match wins:
/// 1. high-impact breaking changes at the threshold -> `breaking`
/// 2. any breaking change -> `major-changes`
/// 3. deprecations at the threshold -> `minor-changes`
/// 4. otherwise `compatible`
pub fn assess_compatibility(
    deprecations: &[Deprecation],
    breaking_changes: &[BreakingChange],
    thresholds: &CompatibilityThresholds,
) -> Compatibility {
    let high_impact = breaking_changes
        .iter()
        .filter(|c| c.impact == Impact::High)
        .count();

    if high_impact >= thresholds.breaking_high_impact {
        Compatibility::Breaking
    } else if !breaking_changes.is_empty() {
        Compatibility::MajorChanges
    } else if deprecations.len() >= thresholds.minor_changes_deprecations {
        Compatibility::MinorChanges
    } else {
        Compatibility::Compatible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn deprecations(n: usize) -> Vec<Deprecation> {
        (0..n)
            .map(|i| Deprecation {
                api: "jcenter()".to_string(),
                location: format!("build.gradle:{}", i + 1),
                replacement: "mavenCentral()".to_string(),
                removed_in: "9.0".to_string(),
                auto_fixable: true,
            })
            .collect()
    }

    fn breaking(impacts: &[Impact]) -> Vec<BreakingChange> {
        impacts
            .iter()
            .enumerate()
            .map(|(i, impact)| BreakingChange {
                id: format!("change-{}", i),
                description: "d".to_string(),
                impact: *impact,
                affected_files: Vec::new(),
                solution: "s".to_string(),
            })
            .collect()
    }

    #[parameterized(
        nothing = { 0, &[], Compatibility::Compatible },
        few_deprecations = { 9, &[], Compatibility::Compatible },
        many_deprecations = { 10, &[], Compatibility::MinorChanges },
        one_low = { 0, &[Impact::Low], Compatibility::MajorChanges },
        one_high = { 50, &[Impact::High], Compatibility::MajorChanges },
        two_high = { 0, &[Impact::High, Impact::High], Compatibility::Breaking },
        three_high = { 0, &[Impact::High, Impact::High, Impact::High], Compatibility::Breaking },
        high_and_medium = { 0, &[Impact::High, Impact::Medium], Compatibility::MajorChanges },
    )]
    fn test_default_thresholds(deps: usize, impacts: &[Impact], expected: Compatibility) {
        let result = assess_compatibility(
            &deprecations(deps),
            &breaking(impacts),
            &CompatibilityThresholds::default(),
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = CompatibilityThresholds {
            minor_changes_deprecations: 2,
            breaking_high_impact: 1,
        };

        assert_eq!(
            assess_compatibility(&deprecations(2), &[], &thresholds),
            Compatibility::MinorChanges
        );
        assert_eq!(
            assess_compatibility(&[], &breaking(&[Impact::High]), &thresholds),
            Compatibility::Breaking
        );
    }
}
