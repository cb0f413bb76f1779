//! Health report data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Overall verdict of a diagnosis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthVerdict {
    Healthy,
    NeedsAttention,
    Critical,
}

impl HealthVerdict {
    /// Worst-status mapping used before synthesis has spoken
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a SectionStatus>) -> Self {
        statuses
            .into_iter()
            .fold(HealthVerdict::Healthy, |verdict, status| match status {
                SectionStatus::Error => HealthVerdict::Critical,
                SectionStatus::Warning if verdict == HealthVerdict::Healthy => {
                    HealthVerdict::NeedsAttention
                }
                _ => verdict,
            })
    }
}

impl fmt::Display for HealthVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthVerdict::Healthy => "healthy",
            HealthVerdict::NeedsAttention => "needs-attention",
            HealthVerdict::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Ok,
    Warning,
    Error,
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionStatus::Ok => "ok",
            SectionStatus::Warning => "warning",
            SectionStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// The fixed set of analysis categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    Performance,
    Caching,
    Dependencies,
    Structure,
}

impl HealthCategory {
    pub const ALL: [HealthCategory; 4] = [
        HealthCategory::Performance,
        HealthCategory::Caching,
        HealthCategory::Dependencies,
        HealthCategory::Structure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthCategory::Performance => "performance",
            HealthCategory::Caching => "caching",
            HealthCategory::Dependencies => "dependencies",
            HealthCategory::Structure => "structure",
        }
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured form of one category analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubagentResult {
    pub category: String,
    pub status: SectionStatus,
    pub summary: String,
    pub details: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, serde_json::Value>>,
}

/// One result per category; a labelled mapping, never a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSections {
    pub performance: SubagentResult,
    pub caching: SubagentResult,
    pub dependencies: SubagentResult,
    pub structure: SubagentResult,
}

impl HealthSections {
    pub fn get(&self, category: HealthCategory) -> &SubagentResult {
        match category {
            HealthCategory::Performance => &self.performance,
            HealthCategory::Caching => &self.caching,
            HealthCategory::Dependencies => &self.dependencies,
            HealthCategory::Structure => &self.structure,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (HealthCategory, &SubagentResult)> {
        HealthCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn verdict(&self) -> HealthVerdict {
        HealthVerdict::from_statuses(self.iter().map(|(_, r)| &r.status))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Quick,
    Moderate,
    Significant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub effort: Effort,
}

/// Advisory only: `command` is shown to the user, never executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickFix {
    pub id: String,
    pub description: String,
    pub command: String,
    #[serde(default)]
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub overall: HealthVerdict,
    pub sections: HealthSections,
    pub recommendations: Vec<Recommendation>,
    pub quick_fixes: Vec<QuickFix>,
    pub generated_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn is_critical(&self) -> bool {
        self.overall == HealthVerdict::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: SectionStatus) -> SubagentResult {
        SubagentResult {
            category: "x".to_string(),
            status,
            summary: "s".to_string(),
            details: vec![],
            metrics: None,
        }
    }

    #[test]
    fn test_verdict_from_statuses() {
        use SectionStatus::*;
        assert_eq!(HealthVerdict::from_statuses(&[Ok, Ok]), HealthVerdict::Healthy);
        assert_eq!(
            HealthVerdict::from_statuses(&[Ok, Warning]),
            HealthVerdict::NeedsAttention
        );
        assert_eq!(
            HealthVerdict::from_statuses(&[Error, Warning]),
            HealthVerdict::Critical
        );
        assert_eq!(
            HealthVerdict::from_statuses(&[Warning, Error, Ok]),
            HealthVerdict::Critical
        );
    }

    #[test]
    fn test_sections_are_labelled() {
        let sections = HealthSections {
            performance: result(SectionStatus::Ok),
            caching: result(SectionStatus::Warning),
            dependencies: result(SectionStatus::Ok),
            structure: result(SectionStatus::Ok),
        };

        let json = serde_json::to_value(&sections).unwrap();
        assert_eq!(json["caching"]["status"], "warning");
        assert_eq!(sections.verdict(), HealthVerdict::NeedsAttention);
        assert_eq!(sections.iter().count(), 4);
    }

    #[test]
    fn test_verdict_wire_names() {
        assert_eq!(
            serde_json::to_value(HealthVerdict::NeedsAttention).unwrap(),
            "needs-attention"
        );
        let parsed: HealthVerdict = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(parsed, HealthVerdict::Critical);
    }

    #[test]
    fn test_quick_fix_safe_defaults_to_false() {
        let fix: QuickFix = serde_json::from_str(
            r#"{"id": "qf-1", "description": "Enable caching", "command": "echo org.gradle.caching=true >> gradle.properties"}"#,
        )
        .unwrap();
        assert!(!fix.safe);
    }
}
