//! Auto-Fix Generator
//!
//! Turns deprecations into literal substitutions and appends a fixed set
//! of version-independent rewrites. Breaking changes never produce fixes.

use super::resolver::WRAPPER_PROPERTIES;
use super::types::{BreakingChange, Deprecation, Fix};
use std::collections::HashSet;
use std::path::PathBuf;

pub enum RewriteTarget {
    BuildScript,
    WrapperProperties,
}

pub struct SafeRewrite {
    pub id: &'static str,
    pub description: &'static str,
    pub target: RewriteTarget,
    pub old_code: &'static str,
    pub new_code: &'static str,
}

pub const SAFE_REWRITES: &[SafeRewrite] = &[
    SafeRewrite {
        id: "catalog-jcenter",
        description: "Replace the retired jcenter() repository with mavenCentral()",
        target: RewriteTarget::BuildScript,
        old_code: "jcenter()",
        new_code: "mavenCentral()",
    },
    SafeRewrite {
        id: "catalog-test-compile",
        description: "Rename testCompile( to testImplementation(",
        target: RewriteTarget::BuildScript,
        old_code: "testCompile(",
        new_code: "testImplementation(",
    },
    SafeRewrite {
        id: "catalog-maven-central-https",
        description: "Fetch Maven Central over HTTPS",
        target: RewriteTarget::BuildScript,
        old_code: "http://repo.maven.apache.org/maven2",
        new_code: "https://repo.maven.apache.org/maven2",
    },
    SafeRewrite {
        id: "catalog-wrapper-https",
        description: "Download the Gradle distribution over HTTPS",
        target: RewriteTarget::WrapperProperties,
        old_code: "distributionUrl=http\\://services.gradle.org",
        new_code: "distributionUrl=https\\://services.gradle.org",
    },
];

pub struct AutoFixGenerator {
    project_dir: PathBuf,
    /// Relative path of the root build script
    build_script: String,
}

impl AutoFixGenerator {
    pub fn new(project_dir: impl Into<PathBuf>, build_script: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            build_script: build_script.into(),
        }
    }

    /// One fix per distinct `(file, oldCode, newCode)`. Deprecations that
    /// need restructuring yield unsafe fixes, which are reported but never
    /// written.
    pub fn generate(&self, deprecations: &[Deprecation], _breaking: &[BreakingChange]) -> Vec<Fix> {
        let catalog: Vec<Fix> = SAFE_REWRITES
            .iter()
            .map(|rewrite| Fix {
                id: rewrite.id.to_string(),
                description: rewrite.description.to_string(),
                file: self.resolve(match rewrite.target {
                    RewriteTarget::BuildScript => self.build_script.as_str(),
                    RewriteTarget::WrapperProperties => WRAPPER_PROPERTIES,
                }),
                old_code: rewrite.old_code.to_string(),
                new_code: rewrite.new_code.to_string(),
                safe: true,
            })
            .collect();

        let mut seen: HashSet<(PathBuf, String, String)> = catalog
            .iter()
            .map(|fix| (fix.file.clone(), fix.old_code.clone(), fix.new_code.clone()))
            .collect();

        let mut fixes = Vec::new();
        for deprecation in deprecations {
            let file = self.resolve(deprecation.file());
            let key = (
                file.clone(),
                deprecation.api.clone(),
                deprecation.replacement.clone(),
            );
            if !seen.insert(key) {
                continue;
            }

            fixes.push(Fix {
                id: format!("deprecation-{}", fixes.len() + 1),
                description: format!(
                    "Replace deprecated `{}` with `{}` in {}",
                    deprecation.api,
                    deprecation.replacement,
                    deprecation.file()
                ),
                file,
                old_code: deprecation.api.clone(),
                new_code: deprecation.replacement.clone(),
                safe: deprecation.auto_fixable,
            });
        }

        fixes.extend(catalog);
        fixes
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }
}
