//! Exclusion policies: dropping source authors and their co-authors.

use std::collections::HashSet;

use crate::aggregate::AuthorTally;
use crate::models::{ExclusionPolicy, SourceRecord};

/// Union of the author lists of the source papers.
#[must_use]
pub fn source_author_set<I, G>(source_author_groups: I) -> HashSet<String>
where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = String>,
{
    source_author_groups.into_iter().flatten().collect()
}

/// Everyone who appears on a citing paper alongside a source author.
///
/// One hop only: the full author group of each citing paper that lists at
/// least one source author. Source authors themselves are included.
#[must_use]
pub fn co_author_closure(
    records: &[SourceRecord],
    source_authors: &HashSet<String>,
) -> HashSet<String> {
    let mut closure = source_authors.clone();
    for paper in records.iter().flat_map(|r| &r.citing) {
        if paper.authors.iter().any(|a| source_authors.contains(a)) {
            closure.extend(paper.authors.iter().cloned());
        }
    }
    closure
}

/// Names the policy removes from the tally.
#[must_use]
pub fn exclusion_set(
    policy: ExclusionPolicy,
    records: &[SourceRecord],
    source_authors: &HashSet<String>,
) -> HashSet<String> {
    match policy {
        ExclusionPolicy::All => HashSet::new(),
        ExclusionPolicy::ExcludeSource => source_authors.clone(),
        ExclusionPolicy::AggressiveExcludeSource => co_author_closure(records, source_authors),
    }
}

/// Apply `policy` to `tally` in place and return the removed names.
///
/// Idempotent: a second application with the same inputs removes nothing.
pub fn apply(
    policy: ExclusionPolicy,
    tally: &mut AuthorTally,
    records: &[SourceRecord],
    source_authors: &HashSet<String>,
) -> Vec<String> {
    let excluded = exclusion_set(policy, records, source_authors);
    if excluded.is_empty() {
        return Vec::new();
    }

    let removed = tally.remove_all(&excluded);
    tracing::debug!(
        %policy,
        candidates = excluded.len(),
        removed = removed.len(),
        "applied exclusion policy"
    );
    removed
}
