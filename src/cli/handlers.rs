//! Command handlers
//!
//! `handle_*` wire the production collaborators from the environment and
//! return the process exit code. The `run_*` halves take their
//! collaborators as arguments so they can be driven with mocks.

use super::commands::{DiagnoseArgs, MigrateArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::AdvisorConfig;
use crate::fs::{FileSystem, RealFileSystem};
use crate::health::HealthOrchestrator;
use crate::llm::GenAIClient;
use crate::migration::{FixApplicator, MigrationEngine};
use crate::probe::CommandProbe;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

pub async fn handle_diagnose(args: &DiagnoseArgs) -> i32 {
    let config = AdvisorConfig::default();
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("Error: {}", e);
        return 1;
    }
    let api_key = match config.require_credential() {
        Ok(key) => key.to_string(),
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let project_dir = match resolve_project_dir(args.project_path.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };
    debug!("Configuration:\n{}", config);

    let llm = Arc::new(GenAIClient::new(
        config.model.clone(),
        api_key,
        config.api_base_url.clone(),
        std::time::Duration::from_secs(config.request_timeout_secs),
    ));
    let orchestrator = HealthOrchestrator::new(
        llm,
        Arc::new(CommandProbe::new()),
        project_dir,
        config.max_tokens,
    );

    let stdout = std::io::stdout();
    match run_diagnose(&orchestrator, args.format.into(), &mut stdout.lock()).await {
        Ok(code) => code,
        Err(e) => {
            error!("Diagnosis failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Diagnoses and prints the report. Exit code 1 when the verdict is critical.
pub async fn run_diagnose(
    orchestrator: &HealthOrchestrator,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<i32> {
    info!("Diagnosing {}", orchestrator.project_dir().display());
    let report = orchestrator.diagnose().await;

    let rendered = OutputFormatter::new(format).format_health(&report)?;
    writeln!(out, "{}", rendered).context("Failed to write report")?;

    Ok(if report.is_critical() { 1 } else { 0 })
}

pub async fn handle_migrate(args: &MigrateArgs) -> i32 {
    let config = AdvisorConfig::default();
    let target = match config.validate().and_then(|_| config.resolve_target(args.target())) {
        Ok(target) => target,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let project_dir = match resolve_project_dir(args.project_path.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let engine = MigrationEngine::new(Arc::clone(&fs), Arc::new(CommandProbe::new()), project_dir)
        .with_thresholds(config.thresholds.clone());

    let stdout = std::io::stdout();
    match run_migrate(&engine, fs, &target, args, &mut stdout.lock()).await {
        Ok(code) => code,
        Err(e) => {
            error!("Migration analysis failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Analyzes, prints the report and, with `--auto` or `--dry-run`, runs the
/// Fix Applicator. `--dry-run` wins over `--auto`.
pub async fn run_migrate(
    engine: &MigrationEngine,
    fs: Arc<dyn FileSystem>,
    target: &str,
    args: &MigrateArgs,
    out: &mut dyn Write,
) -> Result<i32> {
    info!(
        "Analyzing migration of {} to Gradle {}",
        engine.project_dir().display(),
        target
    );
    let report = engine.analyze(target).await;

    let format: OutputFormat = args.format.into();
    let rendered = OutputFormatter::new(format).format_migration(&report)?;
    writeln!(out, "{}", rendered).context("Failed to write report")?;

    if args.wants_fixes() {
        let applicator = FixApplicator::new(fs, args.dry_run);
        let summary = applicator
            .apply(&report, out)
            .context("Failed to write fix progress")?;
        info!(
            applied = summary.applied,
            unchanged = summary.unchanged,
            skipped_unsafe = summary.skipped_unsafe,
            failed = summary.failed,
            planned = summary.planned,
            "Fix application finished"
        );
    }

    Ok(0)
}

fn resolve_project_dir(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }
    Ok(path)
}
