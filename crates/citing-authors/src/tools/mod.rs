//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its arguments
//! 2. Runs the citation pipeline or a single client call
//! 3. Formats the result as Markdown, JSON or CSV

mod cited_by_author;
mod citing_authors;
mod search;

pub use cited_by_author::*;
pub use citing_authors::*;
pub use search::*;

use std::sync::Arc;

use crate::error::ToolResult;
use crate::formatters;
use crate::models::{Pmid, ResponseFormat};
use crate::pipeline::CitationPipeline;

/// Tool execution context.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Aggregation pipeline and the client behind it.
    pub pipeline: Arc<CitationPipeline>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(pipeline: Arc<CitationPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "citing_authors").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(citing_authors::CitingAuthorsTool),
        Box::new(cited_by_author::CitedByAuthorTool),
        Box::new(search::PubmedSearchTool),
    ]
}

/// Render a PMID list in the requested format.
fn format_pmids(title: &str, ids: &[Pmid], format: ResponseFormat) -> ToolResult<String> {
    match format {
        ResponseFormat::Markdown => Ok(formatters::format_pmids_markdown(title, ids)),
        ResponseFormat::Json => Ok(serde_json::to_string_pretty(&formatters::pmids_json(ids))?),
        ResponseFormat::Csv => Ok(formatters::pmids_to_csv(ids)?),
    }
}

/// Shared `responseFormat` schema fragment.
fn response_format_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["markdown", "json", "csv"],
        "default": "markdown"
    })
}
