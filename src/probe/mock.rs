use super::{ProbeError, ProjectProbe};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Probe returning canned output keyed by the full command line
/// (`"gradle -q properties"`). Unscripted commands fail.
pub struct MockProjectProbe {
    outputs: Mutex<HashMap<String, Result<String, String>>>,
    calls: Mutex<Vec<String>>,
}

impl MockProjectProbe {
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn key(tool: &str, args: &[&str]) -> String {
        std::iter::once(tool)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn with_output(self, tool: &str, args: &[&str], output: impl Into<String>) -> Self {
        self.outputs
            .lock()
            .unwrap()
            .insert(Self::key(tool, args), Ok(output.into()));
        self
    }

    pub fn with_failure(self, tool: &str, args: &[&str], stderr: impl Into<String>) -> Self {
        self.outputs
            .lock()
            .unwrap()
            .insert(Self::key(tool, args), Err(stderr.into()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockProjectProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectProbe for MockProjectProbe {
    async fn run(&self, _dir: &Path, tool: &str, args: &[&str]) -> Result<String, ProbeError> {
        let key = Self::key(tool, args);
        self.calls.lock().unwrap().push(key.clone());

        match self.outputs.lock().unwrap().get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(stderr)) => Err(ProbeError::NonZeroExit {
                tool: tool.to_string(),
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            }),
            None => Err(ProbeError::Unscripted(key)),
        }
    }
}
