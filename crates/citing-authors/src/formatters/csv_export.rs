//! CSV export of ranked author rows.
//!
//! Rows are header-less: `author,count` or, detailed,
//! `author,count,(source ids),(citing ids)`.

use std::io;

use crate::models::{CitingAuthorRow, Pmid};

/// Render ids as a tuple literal: `(1, 2)`, `(1,)` or `()`.
#[must_use]
pub fn id_tuple(ids: &[Pmid]) -> String {
    match ids {
        [] => "()".to_string(),
        [only] => format!("({only},)"),
        _ => format!("({})", ids.iter().map(Pmid::as_str).collect::<Vec<_>>().join(", ")),
    }
}

/// Write ranked rows as CSV.
///
/// # Errors
///
/// Returns error if the CSV writer fails.
pub fn rows_to_csv(rows: &[CitingAuthorRow], detailed: bool) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    for row in rows {
        let count = row.count.to_string();
        if detailed {
            writer.write_record([
                row.author.as_str(),
                count.as_str(),
                id_tuple(&row.source_ids).as_str(),
                id_tuple(&row.citing_ids).as_str(),
            ])?;
        } else {
            writer.write_record([row.author.as_str(), count.as_str()])?;
        }
    }

    finish(writer)
}

/// One PMID per line.
///
/// # Errors
///
/// Returns error if the CSV writer fails.
pub fn pmids_to_csv(ids: &[Pmid]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    for id in ids {
        writer.write_record([id.as_str()])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}
