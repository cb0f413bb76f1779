//! Deprecated build-script constructs
//!
//! Each catalog entry is a literal token plus the release that deprecated
//! it. A construct is reported when it was deprecated at or before the
//! target release.

use super::scripts::BuildScript;
use super::types::Deprecation;
use super::version::GradleVersion;

pub struct DeprecatedConstruct {
    /// Literal text searched for, also the `oldCode` of its fix
    pub api: &'static str,
    pub replacement: &'static str,
    pub deprecated_since: &'static str,
    pub removed_in: &'static str,
    /// `replacement` is a drop-in literal substitute for `api`
    pub auto_fixable: bool,
    /// Only matches at the start of a line
    pub line_start: bool,
}

pub const DEPRECATED_CONSTRUCTS: &[DeprecatedConstruct] = &[
    DeprecatedConstruct {
        api: "compile(",
        replacement: "implementation(",
        deprecated_since: "4.10",
        removed_in: "7.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "compile '",
        replacement: "implementation '",
        deprecated_since: "4.10",
        removed_in: "7.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "testCompile(",
        replacement: "testImplementation(",
        deprecated_since: "4.10",
        removed_in: "7.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "testCompile '",
        replacement: "testImplementation '",
        deprecated_since: "4.10",
        removed_in: "7.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "runtime(",
        replacement: "runtimeOnly(",
        deprecated_since: "4.10",
        removed_in: "7.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "testRuntime(",
        replacement: "testRuntimeOnly(",
        deprecated_since: "4.10",
        removed_in: "7.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "apply plugin: 'maven'",
        replacement: "apply plugin: 'maven-publish'",
        deprecated_since: "6.0",
        removed_in: "7.0",
        auto_fixable: false,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "jcenter()",
        replacement: "mavenCentral()",
        deprecated_since: "6.8",
        removed_in: "9.0",
        auto_fixable: true,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "archivesBaseName",
        replacement: "base.archivesName",
        deprecated_since: "7.1",
        removed_in: "9.0",
        auto_fixable: false,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "project.convention",
        replacement: "project.extensions",
        deprecated_since: "8.2",
        removed_in: "9.0",
        auto_fixable: false,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "$buildDir",
        replacement: "${layout.buildDirectory.get().asFile}",
        deprecated_since: "8.3",
        removed_in: "10.0",
        auto_fixable: false,
        line_start: false,
    },
    DeprecatedConstruct {
        api: "buildDir",
        replacement: "layout.buildDirectory",
        deprecated_since: "8.3",
        removed_in: "10.0",
        auto_fixable: false,
        line_start: true,
    },
    DeprecatedConstruct {
        api: "sourceCompatibility",
        replacement: "java { toolchain { languageVersion = JavaLanguageVersion.of(17) } }",
        deprecated_since: "8.8",
        removed_in: "10.0",
        auto_fixable: false,
        line_start: true,
    },
];

/// Scans `scripts` for constructs deprecated at or before `target`.
///
/// An unparsable target matches the whole catalog.
pub fn scan_deprecations(scripts: &[BuildScript], target: &str) -> Vec<Deprecation> {
    let target = GradleVersion::parse(target);
    let relevant: Vec<&DeprecatedConstruct> = DEPRECATED_CONSTRUCTS
        .iter()
        .filter(|c| match (&target, GradleVersion::parse(c.deprecated_since)) {
            (Some(target), Some(since)) => since <= *target,
            _ => true,
        })
        .collect();

    let mut deprecations = Vec::new();
    for script in scripts {
        for (index, line) in script.content.lines().enumerate() {
            if is_comment(line) {
                continue;
            }
            for construct in &relevant {
                if matches_line(construct, line) {
                    deprecations.push(Deprecation {
                        api: construct.api.to_string(),
                        location: format!("{}:{}", script.relative_path, index + 1),
                        replacement: construct.replacement.to_string(),
                        removed_in: construct.removed_in.to_string(),
                        auto_fixable: construct.auto_fixable,
                    });
                }
            }
        }
    }
    deprecations
}

fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("/*")
}

fn matches_line(construct: &DeprecatedConstruct, line: &str) -> bool {
    if construct.line_start {
        let trimmed = line.trim_start();
        return trimmed
            .strip_prefix(construct.api)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'));
    }

    line.match_indices(construct.api)
        .any(|(start, _)| starts_token(line, start))
}

/// True when the text at `start` is not the tail of an identifier or a
/// member access such as `shell.compile(`
fn starts_token(line: &str, start: usize) -> bool {
    line[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '.'))
}

/// Replaces `old` with `new` only where the scanner would report it:
/// outside comment lines and at a token boundary. Returns the new content
/// and the number of replacements.
pub fn replace_tokens(content: &str, old: &str, new: &str) -> (String, usize) {
    let mut output = String::with_capacity(content.len());
    let mut count = 0;

    for line in content.split_inclusive('\n') {
        if old.is_empty() || is_comment(line) {
            output.push_str(line);
            continue;
        }
        let mut last = 0;
        for (start, matched) in line.match_indices(old) {
            if !starts_token(line, start) {
                continue;
            }
            output.push_str(&line[last..start]);
            output.push_str(new);
            last = start + matched.len();
            count += 1;
        }
        output.push_str(&line[last..]);
    }

    (output, count)
}
