//! Citing Authors - Entry Point
//!
//! Provides both stdio (MCP) and HTTP transports.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use citing_authors::models::GroupingMode;
use citing_authors::server::McpServer;
use citing_authors::{CitationPipeline, Config, EutilsClient};

#[derive(Parser, Debug)]
#[command(name = "citing-authors")]
#[command(about = "Rank the authors citing a set of PubMed papers")]
#[command(version)]
struct Cli {
    /// NCBI API key (optional, raises the E-utilities rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Behaviour when citing counts and metadata length disagree
    #[arg(long, value_enum)]
    grouping: Option<GroupingMode>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output (MCP clients)
    #[default]
    Stdio,
    /// HTTP forms, JSON API and MCP over /mcp
    Http,
}

/// Logs go to stderr; stdout carries the stdio protocol.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        "Starting citing-authors"
    );

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config.api_key = cli.api_key;
    }
    if let Some(mode) = cli.grouping {
        config = config.with_grouping_mode(mode);
    }

    tracing::info!(
        eutils_url = %config.eutils_url,
        has_api_key = config.has_api_key(),
        grouping = ?config.grouping_mode,
        "Configuration loaded"
    );

    let client = EutilsClient::new(&config)?;
    let pipeline = CitationPipeline::new(Arc::new(client), config.grouping_mode);
    let server = McpServer::new(pipeline);

    match cli.transport {
        Transport::Stdio => server.run_stdio().await?,
        Transport::Http => server.run_http(cli.port).await?,
    }

    Ok(())
}
