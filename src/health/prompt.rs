//! Prompts for the category analyses and the synthesis step

use super::types::{HealthCategory, HealthSections};

const NO_DATA: &str = "(no data available - the project probe returned nothing)";

const RESPONSE_FORMAT: &str = r#"Answer in plain text. The FIRST line must be a one-sentence summary.
Every following line is one finding, written as a bullet ("- ...").
Use the words "error" or "critical" only for problems that break or seriously slow the build,
and "warning" or "consider" for improvements. Do not use markdown headings."#;

fn or_placeholder(data: &str) -> &str {
    if data.trim().is_empty() {
        NO_DATA
    } else {
        data
    }
}

fn focus(category: HealthCategory) -> &'static str {
    match category {
        HealthCategory::Performance => {
            "Analyze the PERFORMANCE of this Gradle build: daemon and JVM settings \
             (org.gradle.jvmargs), parallel execution, configuration-on-demand, worker \
             counts and any task that is likely to dominate wall-clock time."
        }
        HealthCategory::Caching => {
            "Analyze the CACHING setup of this Gradle build: build cache \
             (org.gradle.caching), configuration cache compatibility problems reported \
             below, and tasks that are not cacheable or not up-to-date checked."
        }
        HealthCategory::Dependencies => {
            "Analyze the DEPENDENCIES of this Gradle build: dynamic or changing versions, \
             repository declarations (jcenter, insecure http repositories), version \
             catalog usage and conflict resolution."
        }
        HealthCategory::Structure => {
            "Analyze the STRUCTURE of this Gradle build: multi-project layout, \
             buildSrc vs. included builds, convention plugins, cross-project \
             configuration (allprojects/subprojects) and script organisation."
        }
    }
}

/// Prompt for one category, embedding whichever probe output it needs
pub fn category_prompt(category: HealthCategory, metadata: &str, cache_data: &str) -> String {
    let mut prompt = format!("{}\n\n{}\n\n", focus(category), RESPONSE_FORMAT);

    prompt.push_str("Project metadata (gradle properties):\n```\n");
    prompt.push_str(or_placeholder(metadata));
    prompt.push_str("\n```\n");

    if category == HealthCategory::Caching {
        prompt.push_str("\nCache validation output:\n```\n");
        prompt.push_str(or_placeholder(cache_data));
        prompt.push_str("\n```\n");
    }

    prompt
}

/// Prompt asking for the overall verdict, recommendations and quick fixes
pub fn synthesis_prompt(sections: &HealthSections) -> String {
    let sections_json =
        serde_json::to_string_pretty(sections).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Synthesize the following per-category Gradle build health results into one verdict.

Category results (JSON):
{sections_json}

Respond with ONLY a JSON object of this shape:
{{
  "overall": "healthy" | "needs-attention" | "critical",
  "recommendations": [
    {{"priority": "high" | "medium" | "low", "category": "<category>", "title": "...", "description": "...", "effort": "quick" | "moderate" | "significant"}}
  ],
  "quickFixes": [
    {{"id": "...", "description": "...", "command": "<shell command>", "safe": true | false}}
  ]
}}
Order recommendations from most to least important."#
    )
}
