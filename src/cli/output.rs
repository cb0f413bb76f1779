//! Output formatting for multiple formats
//!
//! Both reports render as JSON, YAML or human-readable text. The human
//! form maps verdicts, statuses, priorities, risks and compatibility tiers
//! to symbols through fixed lookup tables and omits empty sections.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::health::{Effort, HealthReport, HealthVerdict, Priority, SectionStatus};
use crate::migration::{Compatibility, Impact, MigrationReport, Risk};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

const VERDICT_SYMBOLS: &[(HealthVerdict, &str)] = &[
    (HealthVerdict::Healthy, "\u{2705}"),
    (HealthVerdict::NeedsAttention, "\u{26A0}\u{FE0F}"),
    (HealthVerdict::Critical, "\u{274C}"),
];

const STATUS_SYMBOLS: &[(SectionStatus, &str)] = &[
    (SectionStatus::Ok, "\u{2713}"),
    (SectionStatus::Warning, "\u{26A0}"),
    (SectionStatus::Error, "\u{2717}"),
];

const PRIORITY_SYMBOLS: &[(Priority, &str)] = &[
    (Priority::High, "\u{1F534}"),
    (Priority::Medium, "\u{1F7E1}"),
    (Priority::Low, "\u{1F7E2}"),
];

const RISK_SYMBOLS: &[(Risk, &str)] = &[
    (Risk::Low, "\u{1F7E2}"),
    (Risk::Medium, "\u{1F7E1}"),
    (Risk::High, "\u{1F534}"),
];

const IMPACT_SYMBOLS: &[(Impact, &str)] = &[
    (Impact::Low, "\u{1F7E2}"),
    (Impact::Medium, "\u{1F7E1}"),
    (Impact::High, "\u{1F534}"),
];

const COMPATIBILITY_SYMBOLS: &[(Compatibility, &str)] = &[
    (Compatibility::Compatible, "\u{2705}"),
    (Compatibility::MinorChanges, "\u{1F7E1}"),
    (Compatibility::MajorChanges, "\u{1F7E0}"),
    (Compatibility::Breaking, "\u{1F534}"),
];

fn symbol<K: PartialEq>(table: &[(K, &'static str)], key: &K) -> &'static str {
    table
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, s)| *s)
        .unwrap_or("-")
}

fn effort_label(effort: Effort) -> &'static str {
    match effort {
        Effort::Quick => "quick",
        Effort::Moderate => "moderate",
        Effort::Significant => "significant",
    }
}

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_health(&self, report: &HealthReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "health report"),
            OutputFormat::Yaml => to_yaml(report, "health report"),
            OutputFormat::Human => Ok(self.format_health_human(report)),
        }
    }

    pub fn format_migration(&self, report: &MigrationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "migration report"),
            OutputFormat::Yaml => to_yaml(report, "migration report"),
            OutputFormat::Human => Ok(self.format_migration_human(report)),
        }
    }

    fn format_health_human(&self, report: &HealthReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} Gradle Build Health: {}\n",
            symbol(VERDICT_SYMBOLS, &report.overall),
            report.overall
        ));
        output.push_str(&format!("{}\n\n", RULE));

        for (category, result) in report.sections.iter() {
            output.push_str(&format!(
                "{} {:<14} {}\n",
                symbol(STATUS_SYMBOLS, &result.status),
                category.as_str(),
                result.summary
            ));
            for (i, detail) in result.details.iter().enumerate() {
                let connector = if i + 1 == result.details.len() {
                    "\u{2514}"
                } else {
                    "\u{251C}"
                };
                output.push_str(&format!("   {}\u{2500} {}\n", connector, detail));
            }
        }

        if !report.recommendations.is_empty() {
            output.push_str("\nRecommendations:\n");
            for (i, rec) in report.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} [{}] {} ({} effort)\n",
                    i + 1,
                    symbol(PRIORITY_SYMBOLS, &rec.priority),
                    rec.category,
                    rec.title,
                    effort_label(rec.effort)
                ));
                if !rec.description.is_empty() {
                    output.push_str(&format!("   {}\n", rec.description));
                }
            }
        }

        if !report.quick_fixes.is_empty() {
            output.push_str("\nQuick Fixes:\n");
            for fix in &report.quick_fixes {
                let marker = if fix.safe { "\u{2713}" } else { "\u{26A0}" };
                output.push_str(&format!("{} {}: {}\n", marker, fix.id, fix.description));
                if !fix.command.is_empty() {
                    output.push_str(&format!("   $ {}\n", fix.command));
                }
            }
        }

        output
    }

    fn format_migration_human(&self, report: &MigrationReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Gradle Migration: {} \u{2192} {}\n",
            report.current_version, report.target_version
        ));
        output.push_str(&format!("{}\n\n", RULE));
        output.push_str(&format!(
            "Compatibility:  {} {}\n",
            symbol(COMPATIBILITY_SYMBOLS, &report.compatibility),
            report.compatibility
        ));
        output.push_str(&format!("Effort:         {}\n", report.estimated_effort));
        if let Some(java) = &report.java_version {
            output.push_str(&format!("Java:           {}\n", java));
        }
        if let Some(kotlin) = &report.kotlin_version {
            output.push_str(&format!("Kotlin:         {}\n", kotlin));
        }

        if !report.breaking_changes.is_empty() {
            output.push_str("\nBreaking Changes:\n");
            for change in &report.breaking_changes {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    symbol(IMPACT_SYMBOLS, &change.impact),
                    change.id,
                    change.description
                ));
                if !change.affected_files.is_empty() {
                    output.push_str(&format!("   Files: {}\n", change.affected_files.join(", ")));
                }
                output.push_str(&format!("   Fix:   {}\n", change.solution));
            }
        }

        if !report.deprecations.is_empty() {
            output.push_str(&format!("\nDeprecations ({}):\n", report.deprecations.len()));
            for dep in &report.deprecations {
                let fixable = if dep.auto_fixable { " [auto]" } else { "" };
                output.push_str(&format!(
                    "\u{2022} {} \u{2192} {} at {} (removed in {}){}\n",
                    dep.api, dep.replacement, dep.location, dep.removed_in, fixable
                ));
            }
        }

        if !report.phases.is_empty() {
            output.push_str("\nMigration Plan:\n");
            for phase in &report.phases {
                output.push_str(&format!(
                    "{}. {} {} - {}\n",
                    phase.order,
                    symbol(RISK_SYMBOLS, &phase.risk),
                    phase.name,
                    phase.description
                ));
                for step in &phase.steps {
                    output.push_str(&format!("   \u{2022} {}\n", step));
                }
            }
        }

        if !report.manual_steps.is_empty() {
            output.push_str("\nManual Steps:\n");
            for step in &report.manual_steps {
                output.push_str(&format!("\u{2610} {}\n", step.title));
                output.push_str(&format!("   {}\n", step.description));
                output.push_str(&format!("   Verify: {}\n", step.verification));
            }
        }

        if !report.auto_fixable.is_empty() {
            let safe = report.auto_fixable.iter().filter(|f| f.safe).count();
            output.push_str(&format!(
                "\n{} automatic fixes available ({} safe). Run with --dry-run to preview or --auto to apply.\n",
                report.auto_fixable.len(),
                safe
            ));
        }

        output
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
