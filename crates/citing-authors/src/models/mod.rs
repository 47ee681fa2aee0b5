//! Data models for PubMed identifiers, citation relations and tool inputs.
//!
//! Input models use `#[serde(default)]` for optional fields and
//! `#[serde(rename_all = "camelCase")]` to match MCP argument naming.

mod citation;
mod enums;
mod inputs;
mod pmid;
mod report;

pub use citation::{CitationEdge, CitingPaper, DocSummary, SourceRecord};
pub use enums::{ExclusionPolicy, GroupingMode, ResponseFormat};
pub use inputs::*;
pub use pmid::Pmid;
pub use report::{CitingAuthorRow, CitingAuthorsReport};
