//! Server transports.
//!
//! Stdio (for MCP clients such as desktop assistants) and HTTP (CSV download
//! forms, a JSON API and MCP over `/mcp`).

pub mod http;
pub mod protocol;
pub mod stdio;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::pipeline::CitationPipeline;
use crate::tools::{self, McpTool, ToolContext};

/// Citing-authors server.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new server over `pipeline`.
    #[must_use]
    pub fn new(pipeline: CitationPipeline) -> Self {
        let ctx = ToolContext::new(Arc::new(pipeline));
        let tools = tools::register_all_tools();

        Self { ctx, tools }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        stdio::run_stdio(self.tools, self.ctx).await
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!("Starting HTTP server on port {}", port);
        tracing::info!("Registered {} tools", self.tools.len());

        let router = self.into_router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// HTTP router over this server's tools and pipeline.
    #[must_use]
    pub fn into_router(self) -> axum::Router {
        http::create_router(self.tools, self.ctx)
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
