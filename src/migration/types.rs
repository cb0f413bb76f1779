//! Migration report data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Version from the wrapper properties, or [`UNKNOWN_VERSION`]
    pub current: String,
    /// Whether `gradle-wrapper.properties` was found
    pub wrapper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kotlin_version: Option<String>,
}

impl VersionInfo {
    pub fn unknown() -> Self {
        Self {
            current: UNKNOWN_VERSION.to_string(),
            wrapper: false,
            java_version: None,
            kotlin_version: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.current != UNKNOWN_VERSION
    }

    /// Leading number of the runtime version (`"17.0.2"` -> 17, `"1.8.0_392"` -> 8)
    pub fn java_major(&self) -> Option<u32> {
        let version = self.java_version.as_deref()?;
        let mut parts = version.split(|c: char| !c.is_ascii_digit());
        let first: u32 = parts.next()?.parse().ok()?;
        if first == 1 {
            parts.next()?.parse().ok()
        } else {
            Some(first)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deprecation {
    pub api: String,
    /// `relative/path:line`
    pub location: String,
    pub replacement: String,
    pub removed_in: String,
    pub auto_fixable: bool,
}

impl Deprecation {
    /// File part of `location`
    pub fn file(&self) -> &str {
        match self.location.rsplit_once(':') {
            Some((file, line)) if line.chars().all(|c| c.is_ascii_digit()) => file,
            _ => &self.location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    pub id: String,
    pub description: String,
    pub impact: Impact,
    /// Empty when the change applies to the whole build
    pub affected_files: Vec<String>,
    pub solution: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compatibility {
    Compatible,
    MinorChanges,
    MajorChanges,
    Breaking,
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Compatibility::Compatible => "compatible",
            Compatibility::MinorChanges => "minor-changes",
            Compatibility::MajorChanges => "major-changes",
            Compatibility::Breaking => "breaking",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// 1-based, strictly increasing
    pub order: u32,
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
    pub risk: Risk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualStep {
    pub title: String,
    pub description: String,
    /// How to confirm the step succeeded
    pub verification: String,
}

/// A literal text substitution. Only `safe` fixes are ever written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub id: String,
    pub description: String,
    pub file: PathBuf,
    pub old_code: String,
    pub new_code: String,
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub current_version: String,
    pub target_version: String,
    pub wrapper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kotlin_version: Option<String>,
    pub compatibility: Compatibility,
    pub phases: Vec<Phase>,
    pub deprecations: Vec<Deprecation>,
    pub breaking_changes: Vec<BreakingChange>,
    pub auto_fixable: Vec<Fix>,
    pub manual_steps: Vec<ManualStep>,
    pub estimated_effort: String,
    pub generated_at: DateTime<Utc>,
}
