//! Health Diagnosis Orchestrator
//!
//! Probe once for metadata and once for cache validation, fan out one
//! analysis per [`HealthCategory`], join, then synthesize. Every
//! collaborator failure degrades to an empty input; only the synthesis
//! fields can be left at their pre-synthesis defaults.

use super::classifier::classify;
use super::prompt::{category_prompt, synthesis_prompt};
use super::synthesis::parse_synthesis;
use super::types::{HealthCategory, HealthReport, HealthSections, SubagentResult};
use crate::llm::{LLMClient, LLMRequest};
use crate::probe::{ProjectProbe, CACHE_VALIDATION_ARGS, GRADLE_TOOL, METADATA_ARGS};
use crate::util::try_or_default;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const ANALYSIS_TEMPERATURE: f32 = 0.2;

pub struct HealthOrchestrator {
    llm: Arc<dyn LLMClient>,
    probe: Arc<dyn ProjectProbe>,
    project_dir: PathBuf,
    max_tokens: u32,
}

impl HealthOrchestrator {
    pub fn new(
        llm: Arc<dyn LLMClient>,
        probe: Arc<dyn ProjectProbe>,
        project_dir: impl Into<PathBuf>,
        max_tokens: u32,
    ) -> Self {
        Self {
            llm,
            probe,
            project_dir: project_dir.into(),
            max_tokens,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub async fn diagnose(&self) -> HealthReport {
        let start = Instant::now();
        info!("Starting health diagnosis for: {}", self.project_dir.display());

        let metadata = try_or_default(
            "probe:metadata",
            self.probe.run(&self.project_dir, GRADLE_TOOL, METADATA_ARGS),
            String::new(),
        )
        .await;
        let cache_data = try_or_default(
            "probe:cache-validation",
            self.probe
                .run(&self.project_dir, GRADLE_TOOL, CACHE_VALIDATION_ARGS),
            String::new(),
        )
        .await;
        debug!(
            metadata_bytes = metadata.len(),
            cache_bytes = cache_data.len(),
            "Probe complete"
        );

        let (performance, caching, dependencies, structure) = tokio::join!(
            self.analyze_category(HealthCategory::Performance, &metadata, &cache_data),
            self.analyze_category(HealthCategory::Caching, &metadata, &cache_data),
            self.analyze_category(HealthCategory::Dependencies, &metadata, &cache_data),
            self.analyze_category(HealthCategory::Structure, &metadata, &cache_data),
        );

        let sections = HealthSections {
            performance,
            caching,
            dependencies,
            structure,
        };

        let mut report = HealthReport {
            overall: sections.verdict(),
            sections,
            recommendations: Vec::new(),
            quick_fixes: Vec::new(),
            generated_at: chrono::Utc::now(),
        };

        self.synthesize(&mut report).await;

        info!(
            overall = %report.overall,
            recommendations = report.recommendations.len(),
            quick_fixes = report.quick_fixes.len(),
            "Health diagnosis complete in {:?}",
            start.elapsed()
        );
        report
    }

    async fn analyze_category(
        &self,
        category: HealthCategory,
        metadata: &str,
        cache_data: &str,
    ) -> SubagentResult {
        info!("Analyzing {}", category);
        let request = LLMRequest::prompt(category_prompt(category, metadata, cache_data))
            .with_temperature(ANALYSIS_TEMPERATURE)
            .with_max_tokens(self.max_tokens);

        let label = format!("analysis:{}", category);
        let response = try_or_default(
            &label,
            async { self.llm.chat(request).await.map(Some) },
            None,
        )
        .await;

        match response {
            Some(response) => {
                let mut result = classify(response.first_text(), category.as_str());
                let mut metrics = BTreeMap::new();
                metrics.insert(
                    "responseTimeMs".to_string(),
                    serde_json::json!(response.response_time.as_millis() as u64),
                );
                result.metrics = Some(metrics);
                debug!(category = %category, status = %result.status, "Category classified");
                result
            }
            None => classify("", category.as_str()),
        }
    }

    async fn synthesize(&self, report: &mut HealthReport) {
        let request = LLMRequest::prompt(synthesis_prompt(&report.sections))
            .with_temperature(ANALYSIS_TEMPERATURE)
            .with_max_tokens(self.max_tokens);

        let text = try_or_default(
            "synthesis",
            async { self.llm.chat(request).await.map(|r| r.first_text().to_string()) },
            String::new(),
        )
        .await;

        match parse_synthesis(&text) {
            Ok(outcome) => {
                report.overall = outcome.overall;
                report.recommendations = outcome.recommendations;
                report.quick_fixes = outcome.quick_fixes;
            }
            Err(e) => {
                warn!(error = %e, "Synthesis unusable, keeping pre-synthesis verdict");
            }
        }
    }
}
