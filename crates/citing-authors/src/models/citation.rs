//! Citation relation types: source records, citing papers and edges.

use serde::{Deserialize, Serialize};

use super::Pmid;

/// Summary metadata for one PubMed record, as returned by `esummary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSummary {
    /// The record's identifier.
    pub pmid: Pmid,

    /// Article title.
    #[serde(default)]
    pub title: Option<String>,

    /// Author names in list order; empty when the record has no `AuthorList`.
    #[serde(default)]
    pub authors: Vec<String>,
}

impl DocSummary {
    /// A placeholder for an id the service did not describe.
    #[must_use]
    pub fn empty(pmid: Pmid) -> Self {
        Self { pmid, title: None, authors: Vec::new() }
    }
}

/// A paper citing some source, paired with its author list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitingPaper {
    /// Citing paper identifier.
    pub pmid: Pmid,

    /// Authors of the citing paper.
    pub authors: Vec<String>,

    /// Title, when the metadata carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CitingPaper {
    /// Pair a citing id with its authors.
    #[must_use]
    pub fn new(pmid: impl Into<Pmid>, authors: Vec<String>) -> Self {
        Self { pmid: pmid.into(), authors, title: None }
    }

    /// True when `name` is among the authors (exact match).
    #[must_use]
    pub fn has_author(&self, name: &str) -> bool {
        self.authors.iter().any(|a| a == name)
    }
}

impl From<DocSummary> for CitingPaper {
    fn from(summary: DocSummary) -> Self {
        Self { pmid: summary.pmid, authors: summary.authors, title: summary.title }
    }
}

/// One source paper and everything that cites it.
///
/// Each citing id travels with its own author group, so the
/// ids/groups length invariant cannot be violated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// The cited (source) paper.
    pub source_id: Pmid,

    /// Papers citing the source, in service order.
    pub citing: Vec<CitingPaper>,
}

impl SourceRecord {
    /// Build a record from already-paired citing papers.
    #[must_use]
    pub fn new(source_id: impl Into<Pmid>, citing: Vec<CitingPaper>) -> Self {
        Self { source_id: source_id.into(), citing }
    }

    /// Citing identifiers in order.
    pub fn citing_ids(&self) -> impl Iterator<Item = &Pmid> {
        self.citing.iter().map(|c| &c.pmid)
    }

    /// Author groups in citing-id order.
    pub fn citing_author_groups(&self) -> impl Iterator<Item = &[String]> {
        self.citing.iter().map(|c| c.authors.as_slice())
    }

    /// Number of citing papers.
    #[must_use]
    pub fn total_citations(&self) -> usize {
        self.citing.len()
    }

    /// Flatten into `(source, citing, author)` edges.
    pub fn edges(&self) -> impl Iterator<Item = CitationEdge> + '_ {
        self.citing.iter().flat_map(move |paper| {
            paper.authors.iter().map(move |author| CitationEdge {
                source_id: self.source_id.clone(),
                citing_id: paper.pmid.clone(),
                author: author.clone(),
            })
        })
    }
}

/// A `(source, citing paper, author)` triple; the unit of aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationEdge {
    /// The cited paper.
    pub source_id: Pmid,
    /// The citing paper.
    pub citing_id: Pmid,
    /// One author of the citing paper.
    pub author: String,
}

impl CitationEdge {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        source_id: impl Into<Pmid>,
        citing_id: impl Into<Pmid>,
        author: impl Into<String>,
    ) -> Self {
        Self { source_id: source_id.into(), citing_id: citing_id.into(), author: author.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_edges_cross_product() {
        let record = SourceRecord::new(
            "100",
            vec![
                CitingPaper::new("1", names(&["A", "B"])),
                CitingPaper::new("2", names(&["B"])),
            ],
        );

        let edges: Vec<_> = record.edges().collect();
        assert_eq!(
            edges,
            vec![
                CitationEdge::new("100", "1", "A"),
                CitationEdge::new("100", "1", "B"),
                CitationEdge::new("100", "2", "B"),
            ]
        );
        assert_eq!(record.total_citations(), 2);
    }

    #[test]
    fn test_citing_paper_without_authors_yields_no_edges() {
        let record = SourceRecord::new("100", vec![CitingPaper::new("1", Vec::new())]);
        assert_eq!(record.edges().count(), 0);
        assert_eq!(record.total_citations(), 1);
    }

    #[test]
    fn test_ids_and_groups_stay_aligned() {
        let record = SourceRecord::new(
            "7",
            vec![CitingPaper::new("8", names(&["X"])), CitingPaper::new("9", Vec::new())],
        );
        let ids: Vec<_> = record.citing_ids().map(Pmid::as_str).collect();
        let groups: Vec<_> = record.citing_author_groups().collect();
        assert_eq!(ids, vec!["8", "9"]);
        assert_eq!(groups.len(), ids.len());
        assert!(groups[1].is_empty());
    }
}
