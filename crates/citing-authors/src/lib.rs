//! Citing Authors
//!
//! Ranks the authors who cite a set of PubMed papers. Source papers come from
//! a PubMed search or an explicit PMID list; their citing papers and author
//! lists are fetched from the NCBI E-utilities (`esearch`, `elink`,
//! `esummary`), regrouped per source and tallied per author name.
//!
//! # Features
//!
//! - **Three exclusion modes**: keep everyone, drop the source authors, or
//!   also drop everyone who co-authored a citing paper with them
//! - **Async-first**: Built on Tokio, the source-author fetch runs alongside
//!   the citing-paper metadata fetch
//! - **Retrying client**: Exponential backoff on transient E-utilities failures
//! - **Two transports**: MCP over stdio, and HTTP with CSV downloads
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use citing_authors::models::{CitingAuthorsRequest, ExclusionPolicy};
//! use citing_authors::{CitationPipeline, Config, EutilsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = EutilsClient::new(&config)?;
//!     let pipeline = CitationPipeline::new(Arc::new(client), config.grouping_mode);
//!
//!     let request = CitingAuthorsRequest::search("crispr", ExclusionPolicy::ExcludeSource);
//!     let report = pipeline.run(&request).await?;
//!     for row in report.rows.iter().take(10) {
//!         println!("{}\t{}", row.author, row.count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod formatters;
pub mod graph;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod tools;

pub use client::{Bibliographic, EutilsClient};
pub use config::Config;
pub use error::{ClientError, PipelineError, ToolError};
pub use pipeline::CitationPipeline;
