//! gradle-advisor - AI-assisted Gradle build health and migration analysis
//!
//! Two engines sit at the core of the crate:
//!
//! - **Health diagnosis** ([`health`]): probes the project, asks a hosted
//!   text-analysis model to review four categories concurrently, classifies
//!   each answer and synthesizes prioritized recommendations.
//! - **Migration analysis** ([`migration`]): detects the current Gradle
//!   version, scans build scripts for deprecated and removed APIs, classifies
//!   the upgrade and splits remediation into automatic fixes and manual steps.
//!
//! Collaborator failures degrade the affected input instead of aborting the
//! run; only configuration errors prevent a report from being produced.
//!
//! # Example Usage
//!
//! ```ignore
//! use gradle_advisor::fs::RealFileSystem;
//! use gradle_advisor::migration::MigrationEngine;
//! use gradle_advisor::probe::CommandProbe;
//! use std::sync::Arc;
//!
//! async fn plan(project: std::path::PathBuf) {
//!     let engine = MigrationEngine::new(
//!         Arc::new(RealFileSystem::new()),
//!         Arc::new(CommandProbe::new()),
//!         project,
//!     );
//!     let report = engine.analyze("9.1.0").await;
//!     println!("{}", report.compatibility);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`llm`]: text-analysis client abstraction
//! - [`probe`]: external project introspection
//! - [`fs`]: file system abstraction
//! - [`health`]: build health diagnosis
//! - [`migration`]: version migration analysis
//! - [`cli`]: command line surface

pub mod cli;
pub mod config;
pub mod fs;
pub mod health;
pub mod llm;
pub mod migration;
pub mod probe;
pub mod util;

pub use config::{AdvisorConfig, ConfigError};
pub use health::{HealthOrchestrator, HealthReport};
pub use llm::{BackendError, LLMClient};
pub use migration::{MigrationEngine, MigrationReport};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
