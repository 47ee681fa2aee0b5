//! Request and tool input models.

use serde::{Deserialize, Serialize};

use super::{ExclusionPolicy, Pmid, ResponseFormat};
use crate::error::{PipelineError, PipelineResult};

/// Where the source papers come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceSelection {
    /// Resolve sources with a PubMed search term.
    Query(String),
    /// Use these PMIDs as sources.
    Pmids(Vec<Pmid>),
}

impl SourceSelection {
    /// Build from the optional query/pmids pair; exactly one must be usable.
    pub fn from_parts(query: Option<&str>, pmids: Option<&[Pmid]>) -> PipelineResult<Self> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let pmids = pmids.filter(|ids| !ids.is_empty());

        match (query, pmids) {
            (Some(q), None) => Ok(Self::Query(q.to_string())),
            (None, Some(ids)) => Ok(Self::Pmids(ids.to_vec())),
            (Some(_), Some(_)) => Err(PipelineError::validation(
                "query",
                "provide either a search query or a PMID list, not both",
            )),
            (None, None) => Err(PipelineError::validation(
                "query",
                "a search query or a non-empty PMID list is required",
            )),
        }
    }
}

/// Everything the pipeline needs for one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitingAuthorsRequest {
    /// Source papers.
    pub sources: SourceSelection,
    /// Author exclusion mode.
    pub policy: ExclusionPolicy,
}

impl CitingAuthorsRequest {
    /// Request for a search term.
    #[must_use]
    pub fn search(query: impl Into<String>, policy: ExclusionPolicy) -> Self {
        Self { sources: SourceSelection::Query(query.into()), policy }
    }

    /// Request for explicit source PMIDs.
    #[must_use]
    pub fn pmids(ids: Vec<Pmid>, policy: ExclusionPolicy) -> Self {
        Self { sources: SourceSelection::Pmids(ids), policy }
    }
}

/// Input for the `citing_authors` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitingAuthorsInput {
    /// PubMed search term selecting the source papers.
    #[serde(default)]
    pub query: Option<String>,

    /// Explicit source PMIDs.
    #[serde(default)]
    pub pmids: Option<Vec<Pmid>>,

    /// Exclusion mode (`all`, `exclude_source`, `aggressive_exclude_source`).
    #[serde(default, alias = "option")]
    pub exclusion: Option<ExclusionPolicy>,

    /// Legacy flag; superseded by `exclusion`.
    #[serde(default)]
    pub drop_source_authors: Option<bool>,

    /// Include the source/citing id tuples per author.
    #[serde(default)]
    pub detailed: bool,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl CitingAuthorsInput {
    /// Validate and convert into a pipeline request.
    pub fn to_request(&self) -> PipelineResult<CitingAuthorsRequest> {
        Ok(CitingAuthorsRequest {
            sources: SourceSelection::from_parts(self.query.as_deref(), self.pmids.as_deref())?,
            policy: ExclusionPolicy::resolve(self.exclusion, self.drop_source_authors),
        })
    }
}

/// Input for the `cited_by_author` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitedByAuthorInput {
    /// Exact author name as printed by PubMed (e.g. "Smith J").
    pub author: String,

    /// PubMed search term selecting the source papers.
    #[serde(default)]
    pub query: Option<String>,

    /// Explicit source PMIDs.
    #[serde(default)]
    pub pmids: Option<Vec<Pmid>>,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for the `pubmed_search` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubmedSearchInput {
    /// PubMed search term.
    pub query: String,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}
