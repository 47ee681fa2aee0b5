//! Search tool: pubmed_search.

use serde_json::json;

use super::{McpTool, ToolContext, format_pmids, response_format_schema};
use crate::error::{ToolError, ToolResult};
use crate::models::PubmedSearchInput;

/// Resolve a PubMed search term to PMIDs.
pub struct PubmedSearchTool;

#[async_trait::async_trait]
impl McpTool for PubmedSearchTool {
    fn name(&self) -> &'static str {
        "pubmed_search"
    }

    fn description(&self) -> &'static str {
        "Run a PubMed search and return the matching PMIDs in PubMed's order."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "PubMed search term (e.g., 'crispr[ti] AND 2020[dp]')"
                },
                "responseFormat": response_format_schema()
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: PubmedSearchInput = serde_json::from_value(input)?;

        let query = params.query.trim();
        if query.is_empty() {
            return Err(ToolError::validation("query", "must not be empty"));
        }

        let ids = ctx.pipeline.client().search(query).await?;

        format_pmids(&format!("PubMed search: {query}"), &ids, params.response_format)
    }
}
