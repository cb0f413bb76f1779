//! Build health diagnosis
//!
//! - [`classifier`]: free text to structured category result
//! - [`prompt`]: category and synthesis prompts
//! - [`synthesis`]: parsing of the synthesis JSON
//! - [`orchestrator`]: fan-out, join and synthesis

pub mod classifier;
pub mod orchestrator;
pub mod prompt;
pub mod synthesis;
pub mod types;

pub use classifier::classify;
pub use orchestrator::HealthOrchestrator;
pub use synthesis::{parse_synthesis, SynthesisError, SynthesisOutcome};
pub use types::{
    Effort, HealthCategory, HealthReport, HealthSections, HealthVerdict, Priority, QuickFix,
    Recommendation, SectionStatus, SubagentResult,
};
