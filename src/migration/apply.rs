//! Fix Applicator
//!
//! Dry-run touches no files. Live mode reads, rewrites and writes back the
//! target of every safe fix, one at a time; unsafe fixes are only reported.

use super::deprecations::replace_tokens;
use super::types::{Fix, MigrationReport};
use crate::fs::FileSystem;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const DRY_RUN_MARKER: &str = "[DRY RUN]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Fixes whose file was rewritten
    pub applied: usize,
    /// Safe fixes whose `oldCode` was not present
    pub unchanged: usize,
    pub skipped_unsafe: usize,
    pub failed: usize,
    /// Fixes listed by a dry run
    pub planned: usize,
}

pub struct FixApplicator {
    fs: Arc<dyn FileSystem>,
    dry_run: bool,
}

enum Outcome {
    Applied(usize),
    Unchanged,
}

impl FixApplicator {
    pub fn new(fs: Arc<dyn FileSystem>, dry_run: bool) -> Self {
        Self { fs, dry_run }
    }

    /// Applies `report.auto_fixable`, writing progress lines to `out`.
    ///
    /// Only errors writing to `out` are returned; file errors are logged
    /// and counted in [`ApplySummary::failed`].
    pub fn apply(&self, report: &MigrationReport, out: &mut dyn Write) -> io::Result<ApplySummary> {
        let mut summary = ApplySummary::default();
        let mut seen = HashSet::new();

        if self.dry_run {
            writeln!(out, "{} No files will be modified", DRY_RUN_MARKER)?;
        }

        for fix in &report.auto_fixable {
            if !seen.insert((&fix.file, fix.old_code.as_str(), fix.new_code.as_str())) {
                debug!("Skipping repeated fix {}", fix.id);
                continue;
            }

            if self.dry_run {
                let action = if fix.safe { "Would apply" } else { "Would skip (unsafe)" };
                writeln!(
                    out,
                    "{} {} {}: {} ({})",
                    DRY_RUN_MARKER,
                    action,
                    fix.id,
                    fix.description,
                    fix.file.display()
                )?;
                summary.planned += 1;
                continue;
            }

            if !fix.safe {
                writeln!(out, "- Skipped {} (needs manual review): {}", fix.id, fix.description)?;
                summary.skipped_unsafe += 1;
                continue;
            }

            match self.apply_fix(fix) {
                Ok(Outcome::Applied(count)) => {
                    info!(fix = %fix.id, file = %fix.file.display(), replacements = count, "Applied fix");
                    writeln!(out, "✓ Applied {}: {}", fix.id, fix.description)?;
                    summary.applied += 1;
                }
                Ok(Outcome::Unchanged) => {
                    debug!(fix = %fix.id, "Pattern not found, file left untouched");
                    summary.unchanged += 1;
                }
                Err(e) => {
                    error!(fix = %fix.id, file = %fix.file.display(), "Failed to apply fix: {}", e);
                    writeln!(out, "✗ Failed {}: {}", fix.id, e)?;
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn apply_fix(&self, fix: &Fix) -> anyhow::Result<Outcome> {
        let content = self.fs.read_to_string(&fix.file)?;
        if fix.old_code == fix.new_code {
            return Ok(Outcome::Unchanged);
        }
        let (updated, count) = replace_tokens(&content, &fix.old_code, &fix.new_code);
        if count == 0 {
            return Ok(Outcome::Unchanged);
        }

        self.fs.write(&fix.file, &updated)?;
        Ok(Outcome::Applied(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::migration::types::Compatibility;
    use chrono::Utc;
    use std::path::PathBuf;

    fn fix(id: &str, file: &str, old: &str, new: &str, safe: bool) -> Fix {
        Fix {
            id: id.to_string(),
            description: format!("Replace {}", old),
            file: PathBuf::from(file),
            old_code: old.to_string(),
            new_code: new.to_string(),
            safe,
        }
    }

    fn report(fixes: Vec<Fix>) -> MigrationReport {
        MigrationReport {
            current_version: "7.6".to_string(),
            target_version: "8.5".to_string(),
            wrapper: true,
            java_version: None,
            kotlin_version: None,
            compatibility: Compatibility::Compatible,
            phases: Vec::new(),
            deprecations: Vec::new(),
            breaking_changes: Vec::new(),
            auto_fixable: fixes,
            manual_steps: Vec::new(),
            estimated_effort: "Low".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/build.gradle", "compile('x')");
        let applicator = FixApplicator::new(fs.clone(), true);
        let report = report(vec![
            fix("a", "/mock/build.gradle", "compile(", "implementation(", true),
            fix("b", "/mock/build.gradle", "buildDir", "layout.buildDirectory", false),
        ]);

        let mut out = Vec::new();
        let summary = applicator.apply(&report, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains(DRY_RUN_MARKER));
        assert_eq!(summary.planned, 2);
        assert_eq!(fs.read_count(), 0);
        assert_eq!(fs.write_count(), 0);
        assert_eq!(fs.content("/mock/build.gradle").unwrap(), "compile('x')");
    }

    #[test]
    fn test_live_reads_only_safe_fixes() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/build.gradle", "compile('x')\njcenter()\n");
        let applicator = FixApplicator::new(fs.clone(), false);
        let report = report(vec![
            fix("a", "/mock/build.gradle", "compile(", "implementation(", true),
            fix("b", "/mock/build.gradle", "buildDir", "layout.buildDirectory", false),
            fix("c", "/mock/build.gradle", "jcenter()", "mavenCentral()", true),
        ]);

        let summary = applicator.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(fs.read_count(), 2);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.skipped_unsafe, 1);
        assert_eq!(
            fs.content("/mock/build.gradle").unwrap(),
            "implementation('x')\nmavenCentral()\n"
        );
    }

    #[test]
    fn test_unchanged_file_is_not_written() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/build.gradle", "implementation('x')");
        let applicator = FixApplicator::new(fs.clone(), false);
        let report = report(vec![fix("a", "/mock/build.gradle", "compile(", "implementation(", true)]);

        let summary = applicator.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(summary.unchanged, 1);
        assert_eq!(fs.read_count(), 1);
        assert_eq!(fs.write_count(), 0);
    }

    #[test]
    fn test_failure_does_not_stop_remaining_fixes() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/locked.gradle", "jcenter()");
        fs.set_read_only("/mock/locked.gradle");
        fs.add_file("/mock/build.gradle", "compile('x')");
        let applicator = FixApplicator::new(fs.clone(), false);
        let report = report(vec![
            fix("missing", "/mock/missing.gradle", "compile(", "implementation(", true),
            fix("locked", "/mock/locked.gradle", "jcenter()", "mavenCentral()", true),
            fix("ok", "/mock/build.gradle", "compile(", "implementation(", true),
        ]);

        let summary = applicator.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(summary.failed, 2);
        assert_eq!(summary.applied, 1);
        assert_eq!(fs.read_count(), 3);
        assert_eq!(fs.content("/mock/build.gradle").unwrap(), "implementation('x')");
    }

    #[test]
    fn test_repeated_rewrite_is_skipped() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/build.gradle", "compile('x')");
        let applicator = FixApplicator::new(fs.clone(), false);
        let twice = fix("a", "/mock/build.gradle", "compile(", "implementation(", true);
        let mut renamed = twice.clone();
        renamed.id = "b".to_string();
        let report = report(vec![twice.clone(), twice, renamed]);

        let summary = applicator.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(summary.applied, 1);
        assert_eq!(fs.read_count(), 1);
    }

    #[test]
    fn test_distinct_fixes_sharing_an_id_all_run() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/build.gradle", "compile('x')
jcenter()
");
        let applicator = FixApplicator::new(fs.clone(), false);
        let report = report(vec![
            fix("dup", "/mock/build.gradle", "compile(", "implementation(", true),
            fix("dup", "/mock/build.gradle", "jcenter()", "mavenCentral()", true),
        ]);

        let summary = applicator.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(summary.applied, 2);
        assert_eq!(fs.read_count(), 2);
        assert_eq!(
            fs.content("/mock/build.gradle").unwrap(),
            "implementation('x')\nmavenCentral()\n"
        );
    }

    #[test]
    fn test_member_calls_are_left_alone() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file(
            "/mock/build.gradle",
            "dependencies {\n    compile('a:b:1')\n}\ndef parsed = groovyShell.compile('x')\n",
        );
        let applicator = FixApplicator::new(fs.clone(), false);
        let report = report(vec![fix("a", "/mock/build.gradle", "compile(", "implementation(", true)]);

        let summary = applicator.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(summary.applied, 1);
        assert_eq!(
            fs.content("/mock/build.gradle").unwrap(),
            "dependencies {\n    implementation('a:b:1')\n}\ndef parsed = groovyShell.compile('x')\n"
        );
    }
}
