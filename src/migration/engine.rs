//! Migration Analysis Engine
//!
//! Resolves versions, scans build scripts, classifies the upgrade and
//! partitions the remediation into automatic fixes and manual steps.

use super::autofix::AutoFixGenerator;
use super::breaking::find_breaking_changes;
use super::compatibility::{assess_compatibility, CompatibilityThresholds};
use super::deprecations::scan_deprecations;
use super::plan::default_plan;
use super::resolver::VersionResolver;
use super::scripts::{load_build_scripts, primary_build_script};
use super::types::{BreakingChange, Deprecation, ManualStep, MigrationReport};
use crate::fs::FileSystem;
use crate::probe::ProjectProbe;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub struct MigrationEngine {
    fs: Arc<dyn FileSystem>,
    probe: Arc<dyn ProjectProbe>,
    project_dir: PathBuf,
    thresholds: CompatibilityThresholds,
}

impl MigrationEngine {
    pub fn new(fs: Arc<dyn FileSystem>, probe: Arc<dyn ProjectProbe>, project_dir: PathBuf) -> Self {
        Self {
            fs,
            probe,
            project_dir,
            thresholds: CompatibilityThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: CompatibilityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Builds the migration report for upgrading to `target_version`
    pub async fn analyze(&self, target_version: &str) -> MigrationReport {
        let resolver = VersionResolver::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.probe),
            self.project_dir.clone(),
        );
        let version_info = resolver.detect_version().await;

        let scripts = load_build_scripts(self.fs.as_ref(), &self.project_dir);
        let deprecations = scan_deprecations(&scripts, target_version);
        let breaking_changes = find_breaking_changes(
            &scripts,
            &version_info.current,
            target_version,
            version_info.java_major(),
        );
        let compatibility = assess_compatibility(&deprecations, &breaking_changes, &self.thresholds);

        let plan = default_plan(&version_info, target_version);
        let generator = AutoFixGenerator::new(
            self.project_dir.clone(),
            primary_build_script(self.fs.as_ref(), &self.project_dir),
        );
        let auto_fixable = generator.generate(&deprecations, &breaking_changes);

        let mut manual_steps = plan.manual_steps;
        manual_steps.extend(
            deprecations
                .iter()
                .filter(|d| !d.auto_fixable)
                .map(deprecation_step),
        );
        manual_steps.extend(breaking_changes.iter().map(breaking_change_step));

        info!(
            current = %version_info.current,
            target = target_version,
            %compatibility,
            deprecations = deprecations.len(),
            breaking_changes = breaking_changes.len(),
            fixes = auto_fixable.len(),
            "Migration analysis complete"
        );

        MigrationReport {
            current_version: version_info.current,
            target_version: target_version.to_string(),
            wrapper: version_info.wrapper,
            java_version: version_info.java_version,
            kotlin_version: version_info.kotlin_version,
            compatibility,
            phases: plan.phases,
            deprecations,
            breaking_changes,
            auto_fixable,
            manual_steps,
            estimated_effort: plan.effort,
            generated_at: Utc::now(),
        }
    }
}

fn deprecation_step(deprecation: &Deprecation) -> ManualStep {
    ManualStep {
        title: format!("Replace `{}` at {}", deprecation.api, deprecation.location),
        description: format!(
            "Migrate to `{}` before Gradle {} removes it",
            deprecation.replacement, deprecation.removed_in
        ),
        verification: format!(
            "`./gradlew help --warning-mode all` no longer reports `{}`",
            deprecation.api
        ),
    }
}

fn breaking_change_step(change: &BreakingChange) -> ManualStep {
    let scope = if change.affected_files.is_empty() {
        "the whole build".to_string()
    } else {
        change.affected_files.join(", ")
    };
    ManualStep {
        title: format!("Resolve breaking change {}", change.id),
        description: format!("{} ({}). {}", change.description, scope, change.solution),
        verification: "`./gradlew build` succeeds on the target version".to_string(),
    }
}
