//! Configuration management for gradle-advisor
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Loading never fails; [`AdvisorConfig::validate`] and
//! [`AdvisorConfig::require_credential`] turn bad or missing values into
//! [`ConfigError`]s, which are fatal before any analysis starts.
//!
//! # Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: text-analysis credential - **required for `diagnose`**
//! - `GRADLE_ADVISOR_API_BASE_URL`: endpoint override - optional
//! - `GRADLE_ADVISOR_MODEL`: model identifier - default: "claude-sonnet-4-20250514"
//! - `GRADLE_ADVISOR_MAX_TOKENS`: max output tokens per request - default: "4096"
//! - `GRADLE_ADVISOR_REQUEST_TIMEOUT`: timeout in seconds - default: "120"
//! - `GRADLE_ADVISOR_LATEST_VERSION`: latest-known Gradle release - default: "9.1.0"
//! - `GRADLE_ADVISOR_LOG_LEVEL`: logging level - default: "info"
//! - `GRADLE_ADVISOR_MINOR_CHANGES_THRESHOLD`: deprecations for `minor-changes` - default: "10"
//! - `GRADLE_ADVISOR_BREAKING_THRESHOLD`: high-impact changes for `breaking` - default: "2"
//!
//! # Example
//!
//! ```no_run
//! use gradle_advisor::AdvisorConfig;
//!
//! let config = AdvisorConfig::default();
//! config.validate().expect("Invalid configuration");
//! let api_key = config.require_credential().expect("ANTHROPIC_API_KEY not set");
//! # let _ = api_key;
//! ```

use crate::migration::CompatibilityThresholds;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const CREDENTIAL_ENV: &str = "ANTHROPIC_API_KEY";

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LATEST_VERSION: &str = "9.1.0";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing credential. Set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("No target version given and no latest-known version configured (GRADLE_ADVISOR_LATEST_VERSION)")]
    MissingTargetVersion,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Text-analysis credential; only `diagnose` requires it
    pub api_key: Option<String>,

    pub api_base_url: Option<String>,

    pub model: String,

    pub max_tokens: u32,

    /// Enforced by the client, never by the orchestrators
    pub request_timeout_secs: u64,

    /// Target used by `migrate` when none is given on the command line
    pub latest_known_version: String,

    pub log_level: String,

    pub thresholds: CompatibilityThresholds,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        let api_key = env::var(CREDENTIAL_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_base_url = env::var("GRADLE_ADVISOR_API_BASE_URL").ok();

        let model =
            env::var("GRADLE_ADVISOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env_parse("GRADLE_ADVISOR_MAX_TOKENS").unwrap_or(DEFAULT_MAX_TOKENS);

        let request_timeout_secs =
            env_parse("GRADLE_ADVISOR_REQUEST_TIMEOUT").unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let latest_known_version = env::var("GRADLE_ADVISOR_LATEST_VERSION")
            .unwrap_or_else(|_| DEFAULT_LATEST_VERSION.to_string());

        let log_level = env::var("GRADLE_ADVISOR_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let defaults = CompatibilityThresholds::default();
        let thresholds = CompatibilityThresholds {
            minor_changes_deprecations: env_parse("GRADLE_ADVISOR_MINOR_CHANGES_THRESHOLD")
                .unwrap_or(defaults.minor_changes_deprecations),
            breaking_high_impact: env_parse("GRADLE_ADVISOR_BREAKING_THRESHOLD")
                .unwrap_or(defaults.breaking_high_impact),
        };

        Self {
            api_key,
            api_base_url,
            model,
            max_tokens,
            request_timeout_secs,
            latest_known_version,
            log_level,
            thresholds,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl AdvisorConfig {
    /// Checks numeric ranges, the model id, the log level and thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model identifier cannot be empty".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max tokens must be at least 1".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.thresholds.minor_changes_deprecations == 0
            || self.thresholds.breaking_high_impact == 0
        {
            return Err(ConfigError::ValidationFailed(
                "Compatibility thresholds must be at least 1".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Returns the credential or the fatal [`ConfigError::MissingCredential`]
    pub fn require_credential(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential(CREDENTIAL_ENV))
    }

    /// Picks the explicit target, falling back to the latest-known release
    pub fn resolve_target(&self, explicit: Option<&str>) -> Result<String, ConfigError> {
        let target = explicit
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.latest_known_version.trim());

        if target.is_empty() {
            return Err(ConfigError::MissingTargetVersion);
        }
        Ok(target.to_string())
    }
}

impl fmt::Display for AdvisorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "gradle-advisor configuration:")?;
        writeln!(
            f,
            "  Credential: {}",
            if self.api_key.is_some() { "set" } else { "missing" }
        )?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Max Tokens: {}", self.max_tokens)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Latest Known Gradle: {}", self.latest_known_version)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
