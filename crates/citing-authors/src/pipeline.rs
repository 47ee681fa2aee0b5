//! The citation-aggregation pipeline.
//!
//! search -> elink -> esummary run in sequence; the source-author fetch
//! needed by the exclusion policies runs alongside the main esummary call.
//! The report is only assembled once every call has succeeded, so a failed
//! or cancelled request leaves nothing behind.

use std::collections::HashSet;
use std::sync::Arc;

use crate::aggregate::AuthorTally;
use crate::client::Bibliographic;
use crate::error::{ClientResult, PipelineError, PipelineResult};
use crate::exclusion;
use crate::graph;
use crate::models::{
    CitingAuthorsReport, CitingAuthorsRequest, ExclusionPolicy, GroupingMode, Pmid,
    SourceRecord, SourceSelection,
};

/// Runs aggregation requests against a bibliographic service.
#[derive(Clone)]
pub struct CitationPipeline {
    client: Arc<dyn Bibliographic>,
    grouping_mode: GroupingMode,
}

impl CitationPipeline {
    /// Create a pipeline over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn Bibliographic>, grouping_mode: GroupingMode) -> Self {
        Self { client, grouping_mode }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &dyn Bibliographic {
        self.client.as_ref()
    }

    /// Turn a selection into concrete source ids.
    ///
    /// A search that matches nothing is [`PipelineError::EmptyResult`].
    pub async fn resolve_sources(&self, sources: &SourceSelection) -> PipelineResult<Vec<Pmid>> {
        match sources {
            SourceSelection::Query(query) => {
                let ids = self.client.search(query).await?;
                if ids.is_empty() {
                    return Err(PipelineError::EmptyResult { query: query.clone() });
                }
                Ok(ids)
            }
            SourceSelection::Pmids(ids) if ids.is_empty() => {
                Err(PipelineError::validation("pmids", "at least one PMID is required"))
            }
            SourceSelection::Pmids(ids) => Ok(ids.clone()),
        }
    }

    /// Fetch citing papers and their authors for each source.
    pub async fn source_records(&self, source_ids: &[Pmid]) -> PipelineResult<Vec<SourceRecord>> {
        let cited_by = self.client.cited_by(source_ids).await?;
        let (flat, _) = graph::flatten_cited_by(&cited_by);
        let summaries = self.client.summaries(&flat).await?;
        graph::build_source_records(source_ids, cited_by, summaries, self.grouping_mode)
    }

    /// Run one aggregation request end to end.
    pub async fn run(&self, request: &CitingAuthorsRequest) -> PipelineResult<CitingAuthorsReport> {
        let policy = request.policy;
        let query = match &request.sources {
            SourceSelection::Query(q) => Some(q.clone()),
            SourceSelection::Pmids(_) => None,
        };

        let source_ids = match self.resolve_sources(&request.sources).await {
            Ok(ids) => ids,
            Err(PipelineError::EmptyResult { query }) => {
                tracing::info!(%query, "search matched no source papers");
                return Ok(CitingAuthorsReport::empty(Some(query), policy));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(sources = source_ids.len(), %policy, "aggregating citing authors");

        let cited_by = self.client.cited_by(&source_ids).await?;
        let (flat, _) = graph::flatten_cited_by(&cited_by);
        let distinct_sources = distinct(&source_ids);

        let (summaries, source_authors) = futures::try_join!(
            self.client.summaries(&flat),
            self.source_authors(&distinct_sources, policy),
        )?;

        let records =
            graph::build_source_records(&source_ids, cited_by, summaries, self.grouping_mode)?;
        let edges = graph::citation_edges(&records);
        let mut tally = AuthorTally::from_edges(&edges);
        let excluded = exclusion::apply(policy, &mut tally, &records, &source_authors);

        tracing::info!(
            citing = flat.len(),
            edges = edges.len(),
            authors = tally.len(),
            excluded = excluded.len(),
            "aggregation complete"
        );

        Ok(CitingAuthorsReport {
            query,
            source_ids,
            policy,
            citing_papers: distinct(&flat).len(),
            total_edges: edges.len(),
            excluded_authors: excluded,
            rows: tally.into_ranked_rows(),
        })
    }

    /// Source papers whose citing papers list `author` (exact name).
    ///
    /// Returned in source order without repeats; an empty search yields an
    /// empty list.
    pub async fn sources_cited_by_author(
        &self,
        sources: &SourceSelection,
        author: &str,
    ) -> PipelineResult<Vec<Pmid>> {
        let source_ids = match self.resolve_sources(sources).await {
            Ok(ids) => ids,
            Err(PipelineError::EmptyResult { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let records = self.source_records(&source_ids).await?;
        let matched = records
            .iter()
            .filter(|r| r.citing.iter().any(|paper| paper.has_author(author)))
            .map(|r| r.source_id.clone())
            .collect::<Vec<_>>();

        Ok(distinct(&matched))
    }

    /// Authors of the source papers, fetched only when the policy needs them.
    async fn source_authors(
        &self,
        sources: &[Pmid],
        policy: ExclusionPolicy,
    ) -> ClientResult<HashSet<String>> {
        if !policy.needs_source_authors() {
            return Ok(HashSet::new());
        }
        let groups = self.client.metadata(sources).await?;
        let authors = exclusion::source_author_set(groups);
        tracing::debug!(sources = sources.len(), authors = authors.len(), "source authors");
        Ok(authors)
    }
}

impl std::fmt::Debug for CitationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationPipeline").field("grouping_mode", &self.grouping_mode).finish()
    }
}

/// Distinct ids, first occurrence order.
fn distinct(ids: &[Pmid]) -> Vec<Pmid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().filter(|id| seen.insert(*id)).cloned().collect()
}
