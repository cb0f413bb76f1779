//! Migration Plan Builder
//!
//! Always five phases: Preparation, Fix Deprecations, Update Wrapper,
//! Update Plugins and Dependencies, Verification. Risk and effort scale
//! with the distance between the current and target versions.

use super::types::{ManualStep, Phase, Risk, VersionInfo};
use super::version::VersionGap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    pub phases: Vec<Phase>,
    pub manual_steps: Vec<ManualStep>,
    pub effort: String,
}

pub fn default_plan(version_info: &VersionInfo, target_version: &str) -> MigrationPlan {
    let current = version_info.current.as_str();
    let gap = VersionGap::between(current, target_version);

    let upgrade_risk = match gap {
        VersionGap::Same => Risk::Low,
        VersionGap::Minor => Risk::Medium,
        VersionGap::Major { .. } | VersionGap::Unknown | VersionGap::Downgrade => Risk::High,
    };

    let mut dependency_steps = vec![format!(
        "Upgrade third-party Gradle plugins to releases that support Gradle {}",
        target_version
    )];
    if let Some(kotlin) = &version_info.kotlin_version {
        dependency_steps.push(format!(
            "Check that Kotlin Gradle plugin {} supports Gradle {} and upgrade it if not",
            kotlin, target_version
        ));
    }
    dependency_steps.push("Resolve the breaking changes listed in this report".to_string());

    let phases = vec![
        phase(
            1,
            "Preparation",
            "Capture a clean baseline before changing anything",
            vec![
                "Commit or stash all local changes".to_string(),
                format!(
                    "Run `./gradlew build --warning-mode all` on Gradle {} and save the output",
                    current
                ),
                "Record a build scan with `./gradlew build --scan` for later comparison".to_string(),
            ],
            Risk::Low,
        ),
        phase(
            2,
            "Fix Deprecations",
            "Remove deprecated API usage while still on the current version",
            vec![
                "Apply safe automatic fixes with `gradle-advisor migrate --auto`".to_string(),
                "Resolve the remaining deprecations by hand".to_string(),
                "Re-run `./gradlew build --warning-mode all` until no deprecation warnings remain"
                    .to_string(),
            ],
            if upgrade_risk == Risk::Low {
                Risk::Low
            } else {
                Risk::Medium
            },
        ),
        phase(
            3,
            "Update Wrapper",
            "Point the wrapper at the target release",
            vec![
                format!("Run `./gradlew wrapper --gradle-version {}`", target_version),
                format!(
                    "Run `./gradlew wrapper --gradle-version {}` again so the new version regenerates the wrapper scripts",
                    target_version
                ),
                "Commit gradle-wrapper.properties, gradle-wrapper.jar, gradlew and gradlew.bat"
                    .to_string(),
            ],
            Risk::Medium,
        ),
        phase(
            4,
            "Update Plugins and Dependencies",
            "Bring plugins and build logic in line with the new release",
            dependency_steps,
            upgrade_risk,
        ),
        phase(
            5,
            "Verification",
            "Confirm the build behaves as before",
            vec![
                "Run `./gradlew clean build --warning-mode all`".to_string(),
                "Run `./gradlew build --configuration-cache` to check cache compatibility"
                    .to_string(),
                "Compare a new build scan against the baseline".to_string(),
            ],
            Risk::Low,
        ),
    ];

    let mut manual_steps = vec![ManualStep {
        title: "Review convention and internal API usage".to_string(),
        description: "Search build logic and buildSrc for Project.convention, org.gradle.internal and other non-public APIs".to_string(),
        verification: "`./gradlew build --warning-mode fail` succeeds".to_string(),
    }];

    if gap.crosses_major() {
        manual_steps.push(ManualStep {
            title: "Check JDK compatibility".to_string(),
            description: format!(
                "Confirm the JDK running Gradle (currently {}) is supported by Gradle {}",
                version_info.java_version.as_deref().unwrap_or("unknown"),
                target_version
            ),
            verification: "`./gradlew --version` reports the expected Gradle and JVM versions"
                .to_string(),
        });
    }

    MigrationPlan {
        phases,
        manual_steps,
        effort: estimate_effort(gap),
    }
}

fn phase(order: u32, name: &str, description: &str, steps: Vec<String>, risk: Risk) -> Phase {
    Phase {
        order,
        name: name.to_string(),
        description: description.to_string(),
        steps,
        risk,
    }
}

fn estimate_effort(gap: VersionGap) -> String {
    match gap {
        VersionGap::Same => "Minimal (under 1 hour): already on the target version".to_string(),
        VersionGap::Minor => "Low (1-2 hours)".to_string(),
        VersionGap::Major { majors: 1 } => "Moderate (half a day to 1 day)".to_string(),
        VersionGap::Major { majors } => {
            format!("Significant (2-5 days): {} major versions to cross", majors)
        }
        VersionGap::Downgrade => {
            "Not recommended: the target is older than the current version".to_string()
        }
        VersionGap::Unknown => {
            "Unknown: the current version could not be determined, budget at least 1 day"
                .to_string()
        }
    }
}
