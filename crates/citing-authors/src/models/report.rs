//! Ranked aggregation output.

use serde::{Deserialize, Serialize};

use super::{ExclusionPolicy, Pmid};

/// One ranked author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitingAuthorRow {
    /// Author name exactly as printed by PubMed.
    pub author: String,
    /// Number of citation edges naming this author.
    pub count: usize,
    /// Source ids, one per edge (multiset).
    pub source_ids: Vec<Pmid>,
    /// Citing ids, one per edge (multiset).
    pub citing_ids: Vec<Pmid>,
}

/// Result of one aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitingAuthorsReport {
    /// Search term, when sources came from a search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Resolved source papers.
    pub source_ids: Vec<Pmid>,

    /// Policy that was applied.
    pub policy: ExclusionPolicy,

    /// Distinct citing papers across all sources.
    pub citing_papers: usize,

    /// Citation edges before exclusion.
    pub total_edges: usize,

    /// Authors removed by the policy, in first-seen order.
    pub excluded_authors: Vec<String>,

    /// Remaining authors, count descending, ties in first-seen order.
    pub rows: Vec<CitingAuthorRow>,
}

impl CitingAuthorsReport {
    /// Report for a search that matched no source papers.
    #[must_use]
    pub fn empty(query: Option<String>, policy: ExclusionPolicy) -> Self {
        Self {
            query,
            source_ids: Vec::new(),
            policy,
            citing_papers: 0,
            total_edges: 0,
            excluded_authors: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// True when no source paper was resolved.
    #[must_use]
    pub fn is_empty_source(&self) -> bool {
        self.source_ids.is_empty()
    }

    /// Look up a row by exact author name.
    #[must_use]
    pub fn row(&self, author: &str) -> Option<&CitingAuthorRow> {
        self.rows.iter().find(|r| r.author == author)
    }
}
