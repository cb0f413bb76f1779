//! Integration tests for the health diagnosis flow
//!
//! The text-analysis service and the project probe are both mocked, so
//! these tests run without network access or a Gradle installation.

use gradle_advisor::cli::handlers::run_diagnose;
use gradle_advisor::cli::OutputFormat;
use gradle_advisor::health::{HealthVerdict, Priority, SectionStatus};
use gradle_advisor::llm::{ContentBlock, MockLLMClient, MockResponse};
use gradle_advisor::probe::{
    MockProjectProbe, CACHE_VALIDATION_ARGS, GRADLE_TOOL, METADATA_ARGS,
};
use gradle_advisor::HealthOrchestrator;
use serde_json::json;
use std::sync::Arc;

const SYNTHESIS_CRITICAL: &str = r#"Here is the synthesis:
```json
{
  "overall": "critical",
  "recommendations": [
    {"priority": "high", "category": "caching", "title": "Fix configuration cache problems", "description": "12 problems were reported", "effort": "moderate"},
    {"priority": "low", "category": "structure", "title": "Adopt convention plugins", "description": "", "effort": "significant"}
  ],
  "quickFixes": [
    {"id": "enable-build-cache", "description": "Enable the build cache", "command": "echo org.gradle.caching=true >> gradle.properties", "safe": true}
  ]
}
```"#;

fn probe() -> Arc<MockProjectProbe> {
    Arc::new(
        MockProjectProbe::new()
            .with_output(
                GRADLE_TOOL,
                METADATA_ARGS,
                "org.gradle.parallel: false\norg.gradle.caching: false",
            )
            .with_output(
                GRADLE_TOOL,
                CACHE_VALIDATION_ARGS,
                "Configuration cache problems found in this build: 12",
            ),
    )
}

fn answer_categories(llm: &MockLLMClient) {
    llm.when_prompt_contains(
        "PERFORMANCE",
        MockResponse::text("Parallel execution is disabled\n- consider org.gradle.parallel=true"),
    );
    llm.when_prompt_contains(
        "CACHING",
        MockResponse::text(
            "Configuration cache has a critical problem\n\n- 12 problems reported\n- build cache disabled",
        ),
    );
    llm.when_prompt_contains("DEPENDENCIES", MockResponse::text("Dependencies look good"));
    llm.when_prompt_contains("STRUCTURE", MockResponse::text("Single project, nothing to report"));
}

#[tokio::test]
async fn test_synthesis_overrides_verdict_and_adds_recommendations() {
    let llm = Arc::new(MockLLMClient::new());
    answer_categories(&llm);
    llm.when_prompt_contains("Synthesize", MockResponse::text(SYNTHESIS_CRITICAL));

    let report = HealthOrchestrator::new(llm.clone(), probe(), "/project", 2048)
        .diagnose()
        .await;

    assert_eq!(report.overall, HealthVerdict::Critical);
    assert_eq!(report.sections.performance.status, SectionStatus::Warning);
    assert_eq!(report.sections.caching.status, SectionStatus::Error);
    assert_eq!(
        report.sections.caching.details,
        vec!["- 12 problems reported", "- build cache disabled"]
    );
    assert_eq!(report.sections.dependencies.status, SectionStatus::Ok);
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.recommendations[0].priority, Priority::High);
    assert_eq!(report.quick_fixes.len(), 1);
    assert!(report.quick_fixes[0].safe);
}

#[tokio::test]
async fn test_probe_output_reaches_the_prompts() {
    let llm = Arc::new(MockLLMClient::new());
    answer_categories(&llm);
    llm.when_prompt_contains("Synthesize", MockResponse::text("{}"));

    HealthOrchestrator::new(llm.clone(), probe(), "/project", 2048)
        .diagnose()
        .await;

    let prompts = llm.prompts();
    let caching = prompts.iter().find(|p| p.contains("CACHING")).unwrap();
    assert!(caching.contains("org.gradle.caching: false"));
    assert!(caching.contains("Configuration cache problems found"));

    let structure = prompts.iter().find(|p| p.contains("STRUCTURE")).unwrap();
    assert!(structure.contains("org.gradle.parallel: false"));
    assert!(!structure.contains("Configuration cache problems found"));

    let synthesis = prompts.last().unwrap();
    assert!(synthesis.contains("Parallel execution is disabled"));
}

#[tokio::test]
async fn test_probe_failure_degrades_to_empty_input() {
    let llm = Arc::new(MockLLMClient::new());
    answer_categories(&llm);
    llm.when_prompt_contains("Synthesize", MockResponse::text("no json here"));
    let failing = Arc::new(MockProjectProbe::new().with_failure(
        GRADLE_TOOL,
        METADATA_ARGS,
        "Could not resolve all dependencies",
    ));

    let report = HealthOrchestrator::new(llm.clone(), failing, "/project", 2048)
        .diagnose()
        .await;

    assert_eq!(llm.call_count(), 5);
    assert!(llm.prompts()[0].contains("no data available"));
    // Pre-synthesis verdict: worst section status wins
    assert_eq!(report.overall, HealthVerdict::Critical);
    assert!(report.recommendations.is_empty());
    assert!(report.quick_fixes.is_empty());
}

#[tokio::test]
async fn test_non_text_blocks_are_ignored() {
    let llm = Arc::new(MockLLMClient::new());
    answer_categories(&llm);
    llm.when_prompt_contains(
        "Synthesize",
        MockResponse::with_blocks(vec![
            ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "lookup".to_string(),
                input: json!({}),
            },
            ContentBlock::text(r#"{"overall": "healthy"}"#),
        ]),
    );

    let report = HealthOrchestrator::new(llm, probe(), "/project", 2048)
        .diagnose()
        .await;

    assert_eq!(report.overall, HealthVerdict::Healthy);
}

#[tokio::test]
async fn test_run_diagnose_exit_codes() {
    let critical = Arc::new(MockLLMClient::new());
    answer_categories(&critical);
    critical.when_prompt_contains("Synthesize", MockResponse::text(SYNTHESIS_CRITICAL));
    let orchestrator = HealthOrchestrator::new(critical, probe(), "/project", 2048);

    let mut out = Vec::new();
    let code = run_diagnose(&orchestrator, OutputFormat::Json, &mut out)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(code, 1);
    assert_eq!(parsed["overall"], "critical");
    assert_eq!(parsed["sections"]["caching"]["status"], "error");

    let healthy = Arc::new(MockLLMClient::new());
    for marker in ["PERFORMANCE", "CACHING", "DEPENDENCIES", "STRUCTURE"] {
        healthy.when_prompt_contains(marker, MockResponse::text("All good"));
    }
    healthy.when_prompt_contains("Synthesize", MockResponse::text(r#"{"overall": "healthy"}"#));
    let orchestrator = HealthOrchestrator::new(healthy, probe(), "/project", 2048);

    let mut out = Vec::new();
    let code = run_diagnose(&orchestrator, OutputFormat::Human, &mut out)
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert!(String::from_utf8(out).unwrap().contains("healthy"));
}
