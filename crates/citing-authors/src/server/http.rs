//! HTTP transport.
//!
//! Serves the form endpoints that return a CSV download, a JSON API over the
//! same pipeline, and MCP JSON-RPC on `/mcp`.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::protocol::{self, JsonRpcRequest};
use crate::error::{PipelineError, ToolError};
use crate::formatters;
use crate::models::{CitingAuthorsInput, CitingAuthorsRequest, ExclusionPolicy, Pmid};
use crate::tools::{McpTool, ToolContext};

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
}

/// Create the HTTP router.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> Router {
    let state = Arc::new(HttpState { tools, ctx });

    Router::new()
        .route("/health", get(health_check))
        .route("/authorListCountsSearch", post(author_counts_search))
        .route("/authorListCountsPMIDs", post(author_counts_pmids))
        .route("/api/citing-authors", post(citing_authors_json))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "citing-authors",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Form body of `/authorListCountsSearch`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    #[serde(default)]
    pub search_string: String,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub detailed: Option<String>,
}

/// Form body of `/authorListCountsPMIDs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmidForm {
    #[serde(default, rename = "inputPMIDList")]
    pub input_pmid_list: String,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub detailed: Option<String>,
}

/// Error wrapper that picks the HTTP status.
#[derive(Debug)]
pub struct ApiError(ToolError);

impl<E: Into<ToolError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ToolError::Validation { .. }
            | ToolError::Serialization(_)
            | ToolError::Pipeline(PipelineError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ToolError::Pipeline(PipelineError::Client(_)) => StatusCode::BAD_GATEWAY,
            ToolError::Pipeline(PipelineError::EmptyResult { .. }) => StatusCode::NOT_FOUND,
            ToolError::Pipeline(PipelineError::GroupingMismatch { .. }) | ToolError::Csv(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, %status, "request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "request rejected");
        }
        (status, Json(json!({ "error": self.0.to_user_message() }))).into_response()
    }
}

/// Checkbox-style flag: present and truthy.
fn form_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

fn form_policy(option: Option<&str>) -> Result<ExclusionPolicy, PipelineError> {
    option.map_or(Ok(ExclusionPolicy::All), str::parse)
}

fn csv_attachment(body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=export.csv"),
        ],
        body,
    )
        .into_response()
}

async fn run_to_csv(
    state: &HttpState,
    request: CitingAuthorsRequest,
    detailed: bool,
) -> Result<Response, ApiError> {
    let report = state.ctx.pipeline.run(&request).await?;
    let body = formatters::rows_to_csv(&report.rows, detailed)?;
    Ok(csv_attachment(body))
}

async fn author_counts_search(
    State(state): State<Arc<HttpState>>,
    Form(form): Form<SearchForm>,
) -> Result<Response, ApiError> {
    let query = form.search_string.trim();
    if query.is_empty() {
        return Err(PipelineError::validation("searchString", "a search string is required").into());
    }
    let policy = form_policy(form.option.as_deref())?;

    let request = CitingAuthorsRequest::search(query, policy);
    run_to_csv(&state, request, form_flag(form.detailed.as_deref())).await
}

async fn author_counts_pmids(
    State(state): State<Arc<HttpState>>,
    Form(form): Form<PmidForm>,
) -> Result<Response, ApiError> {
    let ids = Pmid::parse_list(&form.input_pmid_list);
    if ids.is_empty() {
        return Err(
            PipelineError::validation("inputPMIDList", "at least one PMID is required").into()
        );
    }
    let policy = form_policy(form.option.as_deref())?;

    let request = CitingAuthorsRequest::pmids(ids, policy);
    run_to_csv(&state, request, form_flag(form.detailed.as_deref())).await
}

async fn citing_authors_json(
    State(state): State<Arc<HttpState>>,
    Json(input): Json<CitingAuthorsInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = input.to_request()?;
    let report = state.ctx.pipeline.run(&request).await?;
    Ok(Json(formatters::report_json(&report, input.detailed)))
}

async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    tracing::debug!(method = %req.method, "Handling MCP POST request");

    match protocol::dispatch(&req, &state.tools, &state.ctx).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
