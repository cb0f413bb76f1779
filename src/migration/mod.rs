//! Version migration analysis
//!
//! - [`resolver`]: current Gradle, JVM and Kotlin versions
//! - [`scripts`]: build script discovery
//! - [`deprecations`] and [`breaking`]: what the upgrade affects
//! - [`compatibility`]: the overall tier
//! - [`plan`]: phases, manual steps and effort
//! - [`autofix`] and [`apply`]: automatic remediation
//! - [`engine`]: ties the above into a [`MigrationReport`]

pub mod apply;
pub mod autofix;
pub mod breaking;
pub mod compatibility;
pub mod deprecations;
pub mod engine;
pub mod plan;
pub mod resolver;
pub mod scripts;
pub mod types;
pub mod version;

pub use apply::{ApplySummary, FixApplicator, DRY_RUN_MARKER};
pub use autofix::AutoFixGenerator;
pub use compatibility::{assess_compatibility, CompatibilityThresholds};
pub use engine::MigrationEngine;
pub use plan::{default_plan, MigrationPlan};
pub use resolver::VersionResolver;
pub use types::{
    BreakingChange, Compatibility, Deprecation, Fix, Impact, ManualStep, MigrationReport, Phase,
    Risk, VersionInfo,
};
pub use version::{GradleVersion, VersionGap};
