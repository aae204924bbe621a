//! Fake search tool emitting synthetic progress notifications.
//!
//! Exists to exercise a client's progress handling: each stage emits one
//! notification, then simulates work with a one-second sleep. The reported
//! `total` is the stage count plus one, so the progress value never reaches
//! 100% before the final response.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;
use crate::mcp::handler::{get_str_or, get_u64_or, text_result, ToolHandler};
use crate::mcp::progress::ProgressReporter;
use crate::mcp::protocol::{Tool, ToolResult};

/// Simulated work per stage.
const STAGE_DELAY: Duration = Duration::from_secs(1);

/// Labeled stages; `steps` is clamped to this many.
const STAGE_LABELS: [&str; 6] = [
    "Search started - keyword received",
    "Analyzing keywords - tokenizing the query",
    "Querying the database - walking the index",
    "Filtering results - applying relevance filters",
    "Sorting results - scoring and ranking",
    "Preparing final results - formatting the response",
];

/// Canned result entries; (title suffix, url segment, snippet, relevance, category).
const DUMMY_RESULTS: [(&str, &str, &str, u32, &str); 6] = [
    (
        "overview and core concepts",
        "overview",
        "A structured walkthrough from the basics to advanced material, usable by beginners and experts alike.",
        98,
        "docs",
    ),
    (
        "practical guide (2024)",
        "practical",
        "Step-by-step instructions for effective real-world use, with worked examples and code.",
        95,
        "guide",
    ),
    (
        "frequently asked questions",
        "faq",
        "The most commonly asked questions, collected and answered clearly.",
        89,
        "faq",
    ),
    (
        "performance benchmarks",
        "benchmark",
        "Measurements across environments with a comparison against alternative solutions.",
        82,
        "analysis",
    ),
    (
        "latest updates and changes",
        "changelog",
        "Release notes for the latest version, major changes, and a migration guide.",
        76,
        "release",
    ),
    (
        "community discussion and best practices",
        "community",
        "Tips, tricks, and best practices shared by the developer community.",
        71,
        "community",
    ),
];

/// Fake search returning canned results, with one progress notification
/// per stage.
pub struct SearchWithProgressTool;

#[async_trait]
impl ToolHandler for SearchWithProgressTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "search_with_progress".to_string(),
            description: "Runs a search and reports progress along the way (for progress notification testing)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query",
                        "title": "Query"
                    },
                    "steps": {
                        "type": "integer",
                        "description": "Number of progress steps (default: 5)",
                        "title": "Steps",
                        "default": 5
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(
        &self,
        args: HashMap<String, Value>,
        progress: Option<ProgressReporter>,
    ) -> Result<ToolResult> {
        let query = get_str_or(&args, "query", "");
        let steps = get_u64_or(&args, "steps", 5) as usize;
        let total_steps = steps.min(STAGE_LABELS.len());

        for (i, label) in STAGE_LABELS.iter().take(total_steps).enumerate() {
            if let Some(reporter) = &progress {
                reporter.report((i + 1) as u64, (total_steps + 1) as u64, *label);
            }
            tokio::time::sleep(STAGE_DELAY).await;
        }

        Ok(text_result(build_report(&query, total_steps)))
    }
}

/// Assemble the Markdown search report for `result_count` canned entries.
fn build_report(query: &str, result_count: usize) -> String {
    let slug = query.replace(' ', "-");

    let entries: Vec<String> = DUMMY_RESULTS
        .iter()
        .take(result_count)
        .enumerate()
        .map(|(i, (title, segment, snippet, relevance, category))| {
            let url = format!("https://example.com/{}/{}", segment, slug);
            format!(
                "#### {}. {} {}\n\
                 - **Category**: `{}` | **Relevance**: {}%\n\
                 - **URL**: [{url}]({url})\n\
                 - {}",
                i + 1,
                query,
                title,
                category,
                relevance,
                snippet,
            )
        })
        .collect();

    let top_relevance = DUMMY_RESULTS
        .first()
        .filter(|_| result_count > 0)
        .map(|r| r.3)
        .unwrap_or(0);

    format!(
        "## Search complete\n\n\
         > Found **{count}** results for **`{query}`**.\n\n\
         | Item | Value |\n\
         |------|-------|\n\
         | Query | `{query}` |\n\
         | Results | **{count}** |\n\
         | Elapsed | **{elapsed}s** |\n\
         | Top relevance | **{top_relevance}%** |\n\n\
         ---\n\n\
         ### Results\n\n\
         {entries}\n\n\
         ---\n\n\
         *Tip: a more specific query gives more accurate results.*",
        count = result_count,
        query = query,
        elapsed = result_count,
        top_relevance = top_relevance,
        entries = entries.join("\n\n"),
    )
}
