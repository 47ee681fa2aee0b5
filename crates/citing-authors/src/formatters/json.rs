//! JSON output formatting.

use serde_json::{Value, json};

use crate::models::{CitingAuthorRow, CitingAuthorsReport, Pmid};

/// Compact row: ids only when `detailed`.
#[must_use]
pub fn compact_row(row: &CitingAuthorRow, detailed: bool) -> Value {
    let mut obj = json!({
        "author": row.author,
        "count": row.count,
    });

    if detailed {
        obj["sourceIds"] = json!(row.source_ids);
        obj["citingIds"] = json!(row.citing_ids);
    }

    obj
}

/// Full report as a JSON value.
#[must_use]
pub fn report_json(report: &CitingAuthorsReport, detailed: bool) -> Value {
    let mut obj = json!({
        "sourceIds": report.source_ids,
        "emptySource": report.is_empty_source(),
        "policy": report.policy,
        "citingPapers": report.citing_papers,
        "totalEdges": report.total_edges,
        "excludedAuthors": report.excluded_authors,
        "authors": report.rows.iter().map(|r| compact_row(r, detailed)).collect::<Vec<_>>(),
    });

    if let Some(query) = &report.query {
        obj["query"] = json!(query);
    }

    obj
}

/// PMID list with its count.
#[must_use]
pub fn pmids_json(ids: &[Pmid]) -> Value {
    json!({
        "total": ids.len(),
        "pmids": ids,
    })
}
