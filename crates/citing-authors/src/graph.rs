//! Citation graph builder.
//!
//! Citing ids for all sources are concatenated into one batched metadata
//! request. The answer is a single flat sequence, which is cut back into
//! per-source groups here and paired with the citing ids it describes.

use crate::error::{PipelineError, PipelineResult};
use crate::models::{CitationEdge, CitingPaper, DocSummary, GroupingMode, Pmid, SourceRecord};

/// Concatenate per-source citing lists, remembering each group's size.
#[must_use]
pub fn flatten_cited_by(cited_by: &[Vec<Pmid>]) -> (Vec<Pmid>, Vec<usize>) {
    let sizes = cited_by.iter().map(Vec::len).collect();
    let flat = cited_by.iter().flatten().cloned().collect();
    (flat, sizes)
}

/// Cut `flat` into consecutive groups of the given sizes, left to right.
///
/// In [`GroupingMode::Strict`] the sizes must sum to `flat.len()`.
/// In [`GroupingMode::Truncate`] a short input leaves trailing groups short
/// (or empty) and a long input drops the remainder.
pub fn regroup<T>(flat: Vec<T>, sizes: &[usize], mode: GroupingMode) -> PipelineResult<Vec<Vec<T>>> {
    let expected: usize = sizes.iter().sum();
    let actual = flat.len();

    if expected != actual {
        match mode {
            GroupingMode::Strict => {
                return Err(PipelineError::GroupingMismatch { expected, actual });
            }
            GroupingMode::Truncate => {
                tracing::warn!(expected, actual, "author groups do not match citing ids, truncating");
            }
        }
    }

    let mut it = flat.into_iter();
    Ok(sizes.iter().map(|&size| it.by_ref().take(size).collect()).collect())
}

/// Pair every source with its citing papers and their metadata.
///
/// `cited_by[i]` lists the papers citing `source_ids[i]`; `summaries` is the
/// metadata for the concatenation of all `cited_by` lists, in that order.
/// A citing id left without metadata after truncation keeps an empty
/// author list.
pub fn build_source_records(
    source_ids: &[Pmid],
    cited_by: Vec<Vec<Pmid>>,
    summaries: Vec<DocSummary>,
    mode: GroupingMode,
) -> PipelineResult<Vec<SourceRecord>> {
    if source_ids.len() != cited_by.len() {
        return Err(PipelineError::GroupingMismatch {
            expected: source_ids.len(),
            actual: cited_by.len(),
        });
    }

    let sizes: Vec<usize> = cited_by.iter().map(Vec::len).collect();
    let groups = regroup(summaries, &sizes, mode)?;

    let records = source_ids
        .iter()
        .zip(cited_by)
        .zip(groups)
        .map(|((source, citing_ids), group)| {
            let mut metadata = group.into_iter();
            let citing = citing_ids
                .into_iter()
                .map(|pmid| match metadata.next() {
                    Some(doc) => CitingPaper { pmid, ..doc.into() },
                    None => CitingPaper::new(pmid, Vec::new()),
                })
                .collect();
            SourceRecord::new(source.clone(), citing)
        })
        .collect();

    Ok(records)
}

/// Flatten records into the `(source, citing, author)` relation.
#[must_use]
pub fn citation_edges(records: &[SourceRecord]) -> Vec<CitationEdge> {
    records.iter().flat_map(SourceRecord::edges).collect()
}
