//! Uniform graceful degradation for collaborator calls
//!
//! Probe runs and text-analysis requests never abort an orchestration. Each
//! one is wrapped in [`try_or_default`], which logs the failure and hands
//! back the fallback value instead.

use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Awaits `call`; on error logs it under `label` and returns `fallback`.
pub async fn try_or_default<T, E, F>(label: &str, call: F, fallback: T) -> T
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match call.await {
        Ok(value) => value,
        Err(e) => {
            warn!(call = label, error = %e, "Collaborator call failed, continuing with fallback");
            fallback
        }
    }
}
