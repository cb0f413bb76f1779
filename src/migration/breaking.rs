//! Known breaking changes per major release
//!
//! A change is reported when the upgrade crosses its release boundary
//! (`current < boundary <= target`). Changes with triggers are reported
//! only when a build script contains one of them; changes without triggers
//! apply to every build.

use super::scripts::BuildScript;
use super::types::{BreakingChange, Impact};
use super::version::GradleVersion;

pub struct KnownBreakingChange {
    pub id: &'static str,
    pub boundary: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub solution: &'static str,
    pub triggers: &'static [&'static str],
    /// Skipped when the detected JVM is at least this major version
    pub satisfied_by_java: Option<u32>,
}

pub const BREAKING_CHANGES: &[KnownBreakingChange] = &[
    KnownBreakingChange {
        id: "removed-legacy-configurations",
        boundary: "7.0",
        description: "The compile, runtime, testCompile and testRuntime configurations were removed",
        impact: Impact::High,
        solution: "Use implementation, runtimeOnly, testImplementation and testRuntimeOnly",
        triggers: &["compile(", "compile '", "runtime(", "testCompile", "testRuntime("],
        satisfied_by_java: None,
    },
    KnownBreakingChange {
        id: "removed-maven-plugin",
        boundary: "7.0",
        description: "The legacy `maven` plugin and uploadArchives task were removed",
        impact: Impact::High,
        solution: "Publish with the `maven-publish` plugin and a publishing { } block",
        triggers: &["apply plugin: 'maven'", "uploadArchives"],
        satisfied_by_java: None,
    },
    KnownBreakingChange {
        id: "kotlin-dsl-api-1-8",
        boundary: "8.0",
        description: "Kotlin DSL scripts are compiled with Kotlin API level 1.8",
        impact: Impact::Medium,
        solution: "Fix script compilation errors reported after the upgrade and update buildSrc Kotlin code",
        triggers: &[".kts"],
        satisfied_by_java: None,
    },
    KnownBreakingChange {
        id: "buildsrc-included-build",
        boundary: "8.0",
        description: "buildSrc is built like an included build and no longer runs its tests by default",
        impact: Impact::Low,
        solution: "Run buildSrc tests explicitly with `./gradlew :buildSrc:test` if they are needed",
        triggers: &[],
        satisfied_by_java: None,
    },
    KnownBreakingChange {
        id: "jvm-17-required",
        boundary: "9.0",
        description: "Running Gradle requires Java 17 or newer",
        impact: Impact::High,
        solution: "Install JDK 17+ for the Gradle daemon; older targets remain available through toolchains",
        triggers: &[],
        satisfied_by_java: Some(17),
    },
    KnownBreakingChange {
        id: "removed-convention-api",
        boundary: "9.0",
        description: "The Project.convention API and convention plugins were removed",
        impact: Impact::High,
        solution: "Use project.extensions and the java { } extension instead of conventions",
        triggers: &["project.convention", "convention.getPlugin", "convention.plugins"],
        satisfied_by_java: None,
    },
    KnownBreakingChange {
        id: "removed-jcenter",
        boundary: "9.0",
        description: "The jcenter() repository shortcut was removed",
        impact: Impact::Medium,
        solution: "Replace jcenter() with mavenCentral()",
        triggers: &["jcenter()"],
        satisfied_by_java: None,
    },
    KnownBreakingChange {
        id: "removed-archives-base-name",
        boundary: "9.0",
        description: "The archivesBaseName convention property was removed",
        impact: Impact::Medium,
        solution: "Set base { archivesName = \"...\" }",
        triggers: &["archivesBaseName"],
        satisfied_by_java: None,
    },
];

/// Breaking changes between `current` and `target`.
///
/// Returns nothing when either version cannot be parsed.
pub fn find_breaking_changes(
    scripts: &[BuildScript],
    current: &str,
    target: &str,
    java_major: Option<u32>,
) -> Vec<BreakingChange> {
    let (Some(current), Some(target)) =
        (GradleVersion::parse(current), GradleVersion::parse(target))
    else {
        return Vec::new();
    };

    BREAKING_CHANGES
        .iter()
        .filter(|change| {
            GradleVersion::parse(change.boundary)
                .is_some_and(|boundary| current < boundary && boundary <= target)
        })
        .filter(|change| match (change.satisfied_by_java, java_major) {
            (Some(required), Some(actual)) => actual < required,
            _ => true,
        })
        .filter_map(|change| {
            let affected_files = affected_files(change, scripts);
            if !change.triggers.is_empty() && affected_files.is_empty() {
                return None;
            }
            Some(BreakingChange {
                id: change.id.to_string(),
                description: change.description.to_string(),
                impact: change.impact,
                affected_files,
                solution: change.solution.to_string(),
            })
        })
        .collect()
}

fn affected_files(change: &KnownBreakingChange, scripts: &[BuildScript]) -> Vec<String> {
    scripts
        .iter()
        .filter(|script| {
            change.triggers.iter().any(|trigger| {
                script.content.contains(trigger) || script.relative_path.ends_with(trigger)
            })
        })
        .map(|script| script.relative_path.clone())
        .collect()
}
