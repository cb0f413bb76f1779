use super::{ProbeError, ProjectProbe, GRADLE_TOOL};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Runs probe tools as child processes.
///
/// No timeout is applied here; a hung tool is the tool's problem.
pub struct CommandProbe;

impl CommandProbe {
    pub fn new() -> Self {
        Self
    }

    /// Maps the logical `gradle` tool to the project's wrapper script when
    /// one exists, otherwise to whatever `gradle` is on `PATH`.
    pub fn resolve_program(dir: &Path, tool: &str) -> PathBuf {
        if tool == GRADLE_TOOL {
            let wrapper = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
            let wrapper_path = dir.join(wrapper);
            if wrapper_path.is_file() {
                return wrapper_path;
            }
        }
        PathBuf::from(tool)
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectProbe for CommandProbe {
    async fn run(&self, dir: &Path, tool: &str, args: &[&str]) -> Result<String, ProbeError> {
        let program = Self::resolve_program(dir, tool);
        debug!(program = %program.display(), ?args, dir = %dir.display(), "Running probe");

        let output = Command::new(&program)
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| ProbeError::Spawn {
                tool: tool.to_string(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(ProbeError::NonZeroExit {
                tool: tool.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        // `java -version` and friends report on stderr
        if stdout.trim().is_empty() {
            Ok(stderr)
        } else {
            Ok(stdout)
        }
    }
}
