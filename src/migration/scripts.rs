//! Build script discovery
//!
//! Collects the root build script, the settings script and the build
//! scripts of every subproject listed in `include` statements.

use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SETTINGS_SCRIPTS: &[&str] = &["settings.gradle.kts", "settings.gradle"];
pub const BUILD_SCRIPTS: &[&str] = &["build.gradle.kts", "build.gradle"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildScript {
    /// Relative to the project root, `/`-separated
    pub relative_path: String,
    pub path: PathBuf,
    pub content: String,
}

/// Loads every build script in the project. Unreadable files are skipped.
pub fn load_build_scripts(fs: &dyn FileSystem, project_dir: &Path) -> Vec<BuildScript> {
    let mut scripts = Vec::new();
    let mut subprojects = Vec::new();

    if let Some(settings) = first_existing(fs, project_dir, "", SETTINGS_SCRIPTS) {
        if let Some(script) = read_script(fs, project_dir, &settings) {
            subprojects = parse_includes(&script.content);
            scripts.push(script);
        }
    }

    if let Some(root) = first_existing(fs, project_dir, "", BUILD_SCRIPTS) {
        scripts.extend(read_script(fs, project_dir, &root));
    }

    for project in subprojects {
        let dir = project.replace(':', "/");
        match first_existing(fs, project_dir, &dir, BUILD_SCRIPTS) {
            Some(relative) => scripts.extend(read_script(fs, project_dir, &relative)),
            None => debug!("Subproject {} has no build script", project),
        }
    }

    debug!("Loaded {} build scripts", scripts.len());
    scripts
}

/// The script fixes for the root project are written to
pub fn primary_build_script(fs: &dyn FileSystem, project_dir: &Path) -> String {
    first_existing(fs, project_dir, "", BUILD_SCRIPTS).unwrap_or_else(|| "build.gradle".to_string())
}

fn first_existing(
    fs: &dyn FileSystem,
    project_dir: &Path,
    dir: &str,
    candidates: &[&str],
) -> Option<String> {
    candidates
        .iter()
        .map(|name| {
            if dir.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", dir, name)
            }
        })
        .find(|relative| fs.is_file(&fs.join(project_dir, relative)))
}

fn read_script(fs: &dyn FileSystem, project_dir: &Path, relative: &str) -> Option<BuildScript> {
    let path = fs.join(project_dir, relative);
    match fs.read_to_string(&path) {
        Ok(content) => Some(BuildScript {
            relative_path: relative.to_string(),
            path,
            content,
        }),
        Err(e) => {
            warn!("Skipping unreadable build script {}: {}", path.display(), e);
            None
        }
    }
}

/// Subproject paths from `include(...)` and `include '...'` statements,
/// without the leading `:`
pub fn parse_includes(settings: &str) -> Vec<String> {
    let mut projects = Vec::new();

    for line in settings.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix("include") else {
            continue;
        };
        if !rest.starts_with(['(', ' ', '\t']) {
            continue;
        }

        let list = match rest.trim_start().strip_prefix('(') {
            Some(inner) => inner.split(')').next().unwrap_or_default(),
            None => rest,
        };

        for project in list.split(',') {
            let project = project.trim().trim_matches(|c| c == '\'' || c == '"');
            if !project.is_empty() {
                projects.push(project.trim_start_matches(':').to_string());
            }
        }
    }

    projects
}
