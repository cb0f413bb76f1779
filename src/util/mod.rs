//! Utility modules for gradle-advisor
//!
//! - Structured logging setup
//! - Graceful-degradation wrapper for collaborator calls

pub mod fallback;
pub mod logging;

pub use fallback::try_or_default;
pub use logging::{init_logging, parse_level, LoggingConfig};
