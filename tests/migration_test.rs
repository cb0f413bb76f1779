//! Integration tests for migration analysis and fix application

use clap::Parser;
use gradle_advisor::cli::handlers::run_migrate;
use gradle_advisor::cli::{CliArgs, Commands, MigrateArgs};
use gradle_advisor::fs::{FileSystem, MockFileSystem, RealFileSystem};
use gradle_advisor::migration::resolver::WRAPPER_PROPERTIES;
use gradle_advisor::migration::{
    Compatibility, Fix, FixApplicator, MigrationEngine, MigrationReport, DRY_RUN_MARKER,
};
use gradle_advisor::probe::MockProjectProbe;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn wrapper(version: &str) -> String {
    format!(
        "distributionBase=GRADLE_USER_HOME\n\
         distributionPath=wrapper/dists\n\
         distributionUrl=https\\://services.gradle.org/distributions/gradle-{}-bin.zip\n",
        version
    )
}

fn mock_engine(fs: &Arc<MockFileSystem>) -> MigrationEngine {
    let root = fs.root().to_path_buf();
    MigrationEngine::new(fs.clone(), Arc::new(MockProjectProbe::new()), root)
}

fn migrate_args(argv: &[&str]) -> MigrateArgs {
    let mut full = vec!["gradle-advisor", "migrate"];
    full.extend_from_slice(argv);
    match CliArgs::parse_from(full).command {
        Commands::Migrate(args) => args,
        _ => panic!("Expected Migrate command"),
    }
}

/// Writes a legacy two-project Groovy build into a temp dir
fn legacy_project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();

    fs::create_dir_all(root.join("gradle/wrapper")).unwrap();
    fs::write(root.join(WRAPPER_PROPERTIES), wrapper("6.9")).unwrap();
    fs::write(root.join("settings.gradle"), "rootProject.name = 'legacy'\ninclude ':app'\n").unwrap();
    fs::write(
        root.join("build.gradle"),
        "allprojects {\n    repositories {\n        jcenter()\n    }\n}\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("app")).unwrap();
    fs::write(
        root.join("app/build.gradle"),
        "apply plugin: 'java'\n\ndependencies {\n    compile('com.google.guava:guava:31.1-jre')\n    testCompile('junit:junit:4.13.2')\n}\n",
    )
    .unwrap();

    (temp, root)
}

#[tokio::test]
async fn test_same_version_end_to_end() {
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(WRAPPER_PROPERTIES, &wrapper("8.5"));

    let report = mock_engine(&fs).analyze("8.5").await;

    assert_eq!(report.current_version, "8.5");
    assert_eq!(report.target_version, "8.5");
    assert_eq!(report.compatibility, Compatibility::Compatible);
    assert!(report.deprecations.is_empty());
    assert!(report.breaking_changes.is_empty());
    assert_eq!(report.phases.len(), 5);
    assert!(!report.manual_steps.is_empty());
}

#[tokio::test]
async fn test_report_serializes_with_camel_case_keys() {
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(WRAPPER_PROPERTIES, &wrapper("8.5"));

    let report = mock_engine(&fs).analyze("8.5").await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["currentVersion"], "8.5");
    assert_eq!(json["compatibility"], "compatible");
    assert!(json["breakingChanges"].as_array().unwrap().is_empty());
    assert!(json["autoFixable"].is_array());
    assert!(json["estimatedEffort"].is_string());

    let back: MigrationReport = serde_json::from_value(json).unwrap();
    assert_eq!(back.phases, report.phases);
}

#[tokio::test]
async fn test_legacy_project_on_disk() {
    let (_temp, root) = legacy_project();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let engine = MigrationEngine::new(fs, Arc::new(MockProjectProbe::new()), root.clone());

    let report = engine.analyze("8.5").await;

    assert_eq!(report.current_version, "6.9");
    assert_eq!(report.compatibility, Compatibility::MajorChanges);
    let locations: Vec<&str> = report.deprecations.iter().map(|d| d.location.as_str()).collect();
    assert_eq!(
        locations,
        vec!["build.gradle:3", "app/build.gradle:4", "app/build.gradle:5"]
    );
    assert!(report.breaking_changes.iter().any(|c| c.id == "removed-legacy-configurations"
        && c.affected_files == vec!["app/build.gradle".to_string()]));
    assert!(report
        .auto_fixable
        .iter()
        .any(|f| f.file == root.join("app/build.gradle") && f.old_code == "compile("));
}

#[tokio::test]
async fn test_auto_applies_safe_fixes_on_disk() {
    let (_temp, root) = legacy_project();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let engine = MigrationEngine::new(
        Arc::clone(&fs),
        Arc::new(MockProjectProbe::new()),
        root.clone(),
    );
    let args = migrate_args(&["8.5", "--auto"]);

    let mut out = Vec::new();
    let code = run_migrate(&engine, fs, "8.5", &args, &mut out).await.unwrap();

    assert_eq!(code, 0);
    let app = fs::read_to_string(root.join("app/build.gradle")).unwrap();
    assert!(app.contains("implementation('com.google.guava:guava:31.1-jre')"));
    assert!(app.contains("testImplementation('junit:junit:4.13.2')"));
    let build = fs::read_to_string(root.join("build.gradle")).unwrap();
    assert!(build.contains("mavenCentral()"));
    assert!(!build.contains("jcenter()"));
}

#[tokio::test]
async fn test_dry_run_wins_over_auto() {
    let (_temp, root) = legacy_project();
    let before = fs::read_to_string(root.join("app/build.gradle")).unwrap();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let engine = MigrationEngine::new(
        Arc::clone(&fs),
        Arc::new(MockProjectProbe::new()),
        root.clone(),
    );
    let args = migrate_args(&["--target", "8.5", "--auto", "--dry-run"]);

    let mut out = Vec::new();
    run_migrate(&engine, fs, "8.5", &args, &mut out).await.unwrap();

    assert!(String::from_utf8(out).unwrap().contains(DRY_RUN_MARKER));
    assert_eq!(fs::read_to_string(root.join("app/build.gradle")).unwrap(), before);
}

fn fix(id: &str, file: &Path, safe: bool) -> Fix {
    Fix {
        id: id.to_string(),
        description: format!("fix {}", id),
        file: file.to_path_buf(),
        old_code: "compile(".to_string(),
        new_code: "implementation(".to_string(),
        safe,
    }
}

async fn report_with(fixes: Vec<Fix>) -> MigrationReport {
    let fs = Arc::new(MockFileSystem::new());
    let mut report = mock_engine(&fs).analyze("8.5").await;
    report.auto_fixable = fixes;
    report
}

#[tokio::test]
async fn test_read_count_matches_safe_fixes() {
    for (safe, unsafe_) in [(0usize, 3usize), (1, 0), (2, 2), (4, 1)] {
        let fs = Arc::new(MockFileSystem::new());
        let mut fixes = Vec::new();
        for i in 0..safe {
            let path = fs.root().join(format!("safe{}.gradle", i));
            fs.add_file(&path, "compile('x')");
            fixes.push(fix(&format!("safe-{}", i), &path, true));
        }
        for i in 0..unsafe_ {
            let path = fs.root().join(format!("unsafe{}.gradle", i));
            fs.add_file(&path, "compile('x')");
            fixes.push(fix(&format!("unsafe-{}", i), &path, false));
        }
        let report = report_with(fixes).await;

        let live = FixApplicator::new(fs.clone(), false);
        let summary = live.apply(&report, &mut io::sink()).unwrap();

        assert_eq!(fs.read_count(), safe);
        assert_eq!(fs.write_count(), safe);
        assert_eq!(summary.skipped_unsafe, unsafe_);

        let dry = FixApplicator::new(fs.clone(), true);
        dry.apply(&report, &mut io::sink()).unwrap();
        assert_eq!(fs.read_count(), safe);
        assert_eq!(fs.write_count(), safe);
    }
}

#[tokio::test]
async fn test_compile_round_trip_on_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("build.gradle");
    fs::write(&path, "compile(\"x\")").unwrap();
    let report = report_with(vec![fix("compile", &path, true)]).await;

    let applicator = FixApplicator::new(Arc::new(RealFileSystem::new()), false);
    let summary = applicator.apply(&report, &mut io::sink()).unwrap();

    assert_eq!(summary.applied, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "implementation(\"x\")");
}
