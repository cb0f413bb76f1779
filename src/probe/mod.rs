//! Project Probe: external introspection of a Gradle project
//!
//! The orchestrators treat a probe purely as `(dir, tool, args) -> text`.
//! [`CommandProbe`] shells out; [`MockProjectProbe`] serves canned output.

mod command;
mod mock;

pub use command::CommandProbe;
pub use mock::MockProjectProbe;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Logical tool name resolved to `./gradlew` or `gradle` by [`CommandProbe`]
pub const GRADLE_TOOL: &str = "gradle";

pub const METADATA_ARGS: &[&str] = &["-q", "properties"];

pub const CACHE_VALIDATION_ARGS: &[&str] =
    &["-q", "help", "--configuration-cache", "--build-cache"];

pub const JAVA_VERSION_ARGS: &[&str] = &["-version"];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to launch {tool}: {message}")]
    Spawn { tool: String, message: String },

    #[error("{tool} exited with {status}: {stderr}")]
    NonZeroExit {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("No canned output for `{0}`")]
    Unscripted(String),
}

#[async_trait]
pub trait ProjectProbe: Send + Sync {
    /// Runs `tool args...` in `dir` and returns its captured output
    async fn run(&self, dir: &Path, tool: &str, args: &[&str]) -> Result<String, ProbeError>;
}
