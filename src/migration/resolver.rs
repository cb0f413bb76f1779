//! Version Resolver: current build-tool, JVM and Kotlin versions
//!
//! Never fails. A missing wrapper yields [`VersionInfo::unknown`], and the
//! secondary versions are left empty when they cannot be determined.

use super::types::{VersionInfo, UNKNOWN_VERSION};
use crate::fs::FileSystem;
use crate::probe::{ProjectProbe, JAVA_VERSION_ARGS};
use crate::util::try_or_default;
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

pub const WRAPPER_PROPERTIES: &str = "gradle/wrapper/gradle-wrapper.properties";

const JAVA_TOOL: &str = "java";

/// Files searched, in order, for the Kotlin plugin version
const KOTLIN_SOURCES: &[&str] = &[
    "gradle/libs.versions.toml",
    "build.gradle.kts",
    "build.gradle",
    "settings.gradle.kts",
    "settings.gradle",
];

static WRAPPER_DISTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"gradle-(\d+(?:\.\d+)*(?:-[A-Za-z]+-?\d*)?)-(?:bin|all)\.zip").expect("valid regex")
});

static KOTLIN_VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"kotlin\(\s*"[\w.-]+"\s*\)\s*version\s*"([^"]+)""#,
        r#"id\s*\(?\s*["']org\.jetbrains\.kotlin\.[\w.-]+["']\s*\)?\s*version\s*\(?\s*["']([^"']+)["']"#,
        r#"kotlin_version\s*=\s*["']([^"']+)["']"#,
        r#"(?m)^\s*kotlin\s*=\s*"([^"]+)""#,
        r#"kotlin-gradle-plugin:([\w.-]+)["']"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static JAVA_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:version\s+"([^"]+)"|(?:openjdk|java)\s+(\d[\w.+-]*))"#).expect("valid regex")
});

pub struct VersionResolver {
    fs: Arc<dyn FileSystem>,
    probe: Arc<dyn ProjectProbe>,
    project_dir: PathBuf,
}

impl VersionResolver {
    pub fn new(fs: Arc<dyn FileSystem>, probe: Arc<dyn ProjectProbe>, project_dir: PathBuf) -> Self {
        Self {
            fs,
            probe,
            project_dir,
        }
    }

    pub async fn detect_version(&self) -> VersionInfo {
        let mut info = VersionInfo::unknown();

        let wrapper_path = self.fs.join(&self.project_dir, WRAPPER_PROPERTIES);
        if self.fs.is_file(&wrapper_path) {
            info.wrapper = true;
            match self.fs.read_to_string(&wrapper_path) {
                Ok(content) => match extract_wrapper_version(&content) {
                    Some(version) => info.current = version,
                    None => warn!("No distribution version in {}", wrapper_path.display()),
                },
                Err(e) => warn!("Failed to read {}: {}", wrapper_path.display(), e),
            }
        } else {
            debug!("No wrapper properties at {}", wrapper_path.display());
        }

        info.kotlin_version = self.detect_kotlin_version();
        info.java_version = self.detect_java_version().await;

        info!(
            current = %info.current,
            wrapper = info.wrapper,
            java = info.java_version.as_deref().unwrap_or(UNKNOWN_VERSION),
            kotlin = info.kotlin_version.as_deref().unwrap_or(UNKNOWN_VERSION),
            "Resolved project versions"
        );
        info
    }

    fn detect_kotlin_version(&self) -> Option<String> {
        KOTLIN_SOURCES.iter().find_map(|name| {
            let path = self.fs.join(&self.project_dir, name);
            if !self.fs.is_file(&path) {
                return None;
            }
            let content = self.fs.read_to_string(&path).ok()?;
            extract_kotlin_version(&content)
        })
    }

    async fn detect_java_version(&self) -> Option<String> {
        let output = try_or_default(
            "probe:java-version",
            self.probe.run(&self.project_dir, JAVA_TOOL, JAVA_VERSION_ARGS),
            String::new(),
        )
        .await;
        extract_java_version(&output)
    }
}

/// `gradle-8.5-bin.zip` -> `8.5`
pub fn extract_wrapper_version(properties: &str) -> Option<String> {
    properties
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("distributionUrl"))
        .find_map(|line| WRAPPER_DISTRIBUTION.captures(line))
        .map(|caps| caps[1].to_string())
}

pub fn extract_kotlin_version(content: &str) -> Option<String> {
    KOTLIN_VERSION_PATTERNS
        .iter()
        .find_map(|re| re.captures(content))
        .map(|caps| caps[1].to_string())
}

/// Parses `java -version` output, which names the version on the first line
pub fn extract_java_version(output: &str) -> Option<String> {
    let caps = JAVA_VERSION.captures(output)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}
