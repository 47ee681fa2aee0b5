//! Reverse lookup tool: cited_by_author.

use serde_json::json;

use super::{McpTool, ToolContext, format_pmids, response_format_schema};
use crate::error::{ToolError, ToolResult};
use crate::models::{CitedByAuthorInput, SourceSelection};

/// Find the source papers cited by a given author.
pub struct CitedByAuthorTool;

#[async_trait::async_trait]
impl McpTool for CitedByAuthorTool {
    fn name(&self) -> &'static str {
        "cited_by_author"
    }

    fn description(&self) -> &'static str {
        "List the source papers that have at least one citing paper listing the given \
         author. Each source appears once, in source order, however many of its citing \
         papers list the author. The name must match PubMed's rendering exactly \
         (e.g. 'Smith J')."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "author": {
                    "type": "string",
                    "description": "Exact author name as printed by PubMed"
                },
                "query": {
                    "type": "string",
                    "description": "PubMed search term selecting the source papers"
                },
                "pmids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Explicit source PMIDs (use instead of query)"
                },
                "responseFormat": response_format_schema()
            },
            "required": ["author"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: CitedByAuthorInput = serde_json::from_value(input)?;

        let author = params.author.trim();
        if author.is_empty() {
            return Err(ToolError::validation("author", "must not be empty"));
        }
        let sources =
            SourceSelection::from_parts(params.query.as_deref(), params.pmids.as_deref())?;

        let matched = ctx.pipeline.sources_cited_by_author(&sources, author).await?;

        format_pmids(&format!("Papers cited by {author}"), &matched, params.response_format)
    }
}
