//! Citing-author aggregation tool: citing_authors.

use serde_json::json;

use super::{McpTool, ToolContext, response_format_schema};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{CitingAuthorsInput, ResponseFormat};

/// Rank the authors who cite a set of PubMed papers.
pub struct CitingAuthorsTool;

#[async_trait::async_trait]
impl McpTool for CitingAuthorsTool {
    fn name(&self) -> &'static str {
        "citing_authors"
    }

    fn description(&self) -> &'static str {
        "Count how often each author appears on papers citing a set of PubMed articles. \
         Sources come from a PubMed search term or an explicit PMID list. Optionally drop \
         the source authors, or the source authors and everyone who co-authored a citing \
         paper with them."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "PubMed search term selecting the source papers"
                },
                "pmids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Explicit source PMIDs (use instead of query)"
                },
                "exclusion": {
                    "type": "string",
                    "enum": ["all", "exclude_source", "aggressive_exclude_source"],
                    "default": "all",
                    "description": "Which authors to drop from the counts"
                },
                "dropSourceAuthors": {
                    "type": "boolean",
                    "description": "Legacy switch; ignored when exclusion is given"
                },
                "detailed": {
                    "type": "boolean",
                    "default": false,
                    "description": "Include the source and citing PMIDs for each author"
                },
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: CitingAuthorsInput = serde_json::from_value(input)?;
        let request = params.to_request()?;

        let report = ctx.pipeline.run(&request).await?;

        match params.response_format {
            ResponseFormat::Markdown => {
                Ok(formatters::format_report_markdown(&report, params.detailed))
            }
            ResponseFormat::Json => {
                Ok(serde_json::to_string_pretty(&formatters::report_json(&report, params.detailed))?)
            }
            ResponseFormat::Csv => Ok(formatters::rows_to_csv(&report.rows, params.detailed)?),
        }
    }
}
