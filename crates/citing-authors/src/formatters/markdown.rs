//! Markdown output formatting.

use std::borrow::Cow;

use crate::models::{CitingAuthorsReport, Pmid};

/// Escape characters that would break a Markdown table cell.
fn cell(text: &str) -> Cow<'_, str> {
    if text.contains('|') {
        Cow::Owned(text.replace('|', "\\|"))
    } else {
        Cow::Borrowed(text)
    }
}

fn id_list(ids: &[Pmid], limit: usize) -> String {
    let mut shown: Vec<&str> = ids.iter().take(limit).map(Pmid::as_str).collect();
    if ids.len() > limit {
        shown.push("…");
    }
    shown.join(", ")
}

/// Format an aggregation report as Markdown.
#[must_use]
pub fn format_report_markdown(report: &CitingAuthorsReport, detailed: bool) -> String {
    let mut output = String::from("# Citing Authors\n\n");

    if let Some(query) = &report.query {
        output.push_str(&format!("**Query:** {query}\n"));
    }

    if report.is_empty_source() {
        output.push_str("\n*No source papers matched.*");
        return output;
    }

    output.push_str(&format!(
        "**Source papers:** {}\n\
         **Citing papers:** {}\n\
         **Citation edges:** {}\n\
         **Exclusion:** {}",
        report.source_ids.len(),
        report.citing_papers,
        report.total_edges,
        report.policy,
    ));
    if !report.excluded_authors.is_empty() {
        output.push_str(&format!(" ({} authors removed)", report.excluded_authors.len()));
    }
    output.push_str("\n\n---\n\n");

    if report.rows.is_empty() {
        output.push_str("*No citing authors found.*");
        return output;
    }

    if detailed {
        output.push_str("| # | Author | Citations | Sources | Citing papers |\n");
        output.push_str("|---|--------|-----------|---------|---------------|\n");
    } else {
        output.push_str("| # | Author | Citations |\n");
        output.push_str("|---|--------|-----------|\n");
    }

    for (i, row) in report.rows.iter().enumerate() {
        if detailed {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                i + 1,
                cell(&row.author),
                row.count,
                id_list(&row.source_ids, 10),
                id_list(&row.citing_ids, 10)
            ));
        } else {
            output.push_str(&format!("| {} | {} | {} |\n", i + 1, cell(&row.author), row.count));
        }
    }

    output
}

/// Format a list of PMIDs with a heading.
#[must_use]
pub fn format_pmids_markdown(title: &str, ids: &[Pmid]) -> String {
    if ids.is_empty() {
        return format!("# {title}\n\n*No papers found.*");
    }

    let mut output = format!("# {title} ({} results)\n\n", ids.len());
    for id in ids {
        output.push_str(&format!("- [{id}](https://pubmed.ncbi.nlm.nih.gov/{id}/)\n"));
    }
    output
}
