//! Per-author aggregation of citation edges.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{CitationEdge, CitingAuthorRow, Pmid};

/// Credit accumulated by one author name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAggregate {
    /// Number of edges naming the author.
    pub count: usize,
    /// Source id of each edge (multiset, edge order).
    pub source_ids: Vec<Pmid>,
    /// Citing id of each edge (multiset, edge order).
    pub citing_ids: Vec<Pmid>,
}

impl AuthorAggregate {
    fn record(&mut self, edge: &CitationEdge) {
        self.count += 1;
        self.source_ids.push(edge.source_id.clone());
        self.citing_ids.push(edge.citing_id.clone());
    }

    fn absorb(&mut self, other: Self) {
        self.count += other.count;
        self.source_ids.extend(other.source_ids);
        self.citing_ids.extend(other.citing_ids);
    }
}

/// Author name -> aggregate, in first-seen order.
///
/// Names are compared as exact strings: "Smith J" and "Smith J." are two
/// different authors, and two people printed the same way are one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorTally {
    authors: IndexMap<String, AuthorAggregate>,
}

impl AuthorTally {
    /// Group edges by author name.
    #[must_use]
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a CitationEdge>,
    {
        let mut tally = Self::default();
        for edge in edges {
            tally.authors.entry(edge.author.clone()).or_default().record(edge);
        }
        tally
    }

    /// Combine two tallies: counts add, id multisets concatenate.
    ///
    /// Authors new to `self` are appended in `other`'s order, so merging
    /// per-source tallies in source order matches a single-pass tally.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (author, aggregate) in other.authors {
            self.authors.entry(author).or_default().absorb(aggregate);
        }
        self
    }

    /// Drop every author in `names`; names not present are ignored.
    ///
    /// Returns the removed names in tally order.
    pub fn remove_all(&mut self, names: &HashSet<String>) -> Vec<String> {
        let mut removed = Vec::new();
        self.authors.retain(|author, _| {
            let drop = names.contains(author);
            if drop {
                removed.push(author.clone());
            }
            !drop
        });
        removed
    }

    /// Aggregate for one author.
    #[must_use]
    pub fn get(&self, author: &str) -> Option<&AuthorAggregate> {
        self.authors.get(author)
    }

    /// Count for one author, zero if absent.
    #[must_use]
    pub fn count(&self, author: &str) -> usize {
        self.get(author).map_or(0, |a| a.count)
    }

    /// Author names in first-seen order.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// Iterate `(name, aggregate)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorAggregate)> {
        self.authors.iter().map(|(name, agg)| (name.as_str(), agg))
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.authors.values().map(|a| a.count).sum()
    }

    /// Number of distinct authors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// True when no author is left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Rows sorted by count, highest first.
    ///
    /// The sort is stable: equal counts keep first-seen order.
    #[must_use]
    pub fn into_ranked_rows(self) -> Vec<CitingAuthorRow> {
        let mut rows: Vec<CitingAuthorRow> = self
            .authors
            .into_iter()
            .map(|(author, agg)| CitingAuthorRow {
                author,
                count: agg.count,
                source_ids: agg.source_ids,
                citing_ids: agg.citing_ids,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_edges() -> Vec<CitationEdge> {
        vec![
            CitationEdge::new("100", "1", "A"),
            CitationEdge::new("100", "1", "B"),
            CitationEdge::new("100", "2", "B"),
            CitationEdge::new("200", "3", "C"),
        ]
    }

    #[test]
    fn test_counts_per_author() {
        let tally = AuthorTally::from_edges(&scenario_edges());
        assert_eq!(tally.count("A"), 1);
        assert_eq!(tally.count("B"), 2);
        assert_eq!(tally.count("C"), 1);
        assert_eq!(tally.total_count(), 4);
        assert_eq!(tally.authors().collect::<Vec<_>>(), vec!["A", "B", "C"]);

        let b = tally.get("B").unwrap();
        assert_eq!(b.source_ids, vec![Pmid::from("100"), Pmid::from("100")]);
        assert_eq!(b.citing_ids, vec![Pmid::from("1"), Pmid::from("2")]);
    }

    #[test]
    fn test_exact_name_matching() {
        let edges = vec![
            CitationEdge::new("1", "2", "Smith J"),
            CitationEdge::new("1", "3", "smith j"),
            CitationEdge::new("1", "4", "Smith J."),
        ];
        assert_eq!(AuthorTally::from_edges(&edges).len(), 3);
    }

    #[test]
    fn test_ranked_rows_are_stable() {
        let edges = vec![
            CitationEdge::new("1", "10", "Zed"),
            CitationEdge::new("1", "10", "Amy"),
            CitationEdge::new("1", "11", "Max"),
            CitationEdge::new("1", "11", "Amy"),
            CitationEdge::new("1", "12", "Bob"),
        ];
        let rows = AuthorTally::from_edges(&edges).into_ranked_rows();
        let order: Vec<_> = rows.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(order, vec!["Amy", "Zed", "Max", "Bob"]);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let edges = scenario_edges();
        let whole = AuthorTally::from_edges(&edges);
        let merged = AuthorTally::from_edges(&edges[..2]).merge(AuthorTally::from_edges(&edges[2..]));
        assert_eq!(merged, whole);
    }

    #[test]
    fn test_remove_all_ignores_unknown_names() {
        let mut tally = AuthorTally::from_edges(&scenario_edges());
        let names: HashSet<String> = ["B", "Nobody"].iter().map(|s| (*s).to_string()).collect();
        let removed = tally.remove_all(&names);
        assert_eq!(removed, vec!["B".to_string()]);
        assert_eq!(tally.authors().collect::<Vec<_>>(), vec!["A", "C"]);
    }
}
