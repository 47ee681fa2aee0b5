//! Output formatters for CSV, Markdown and JSON.

mod csv_export;
mod json;
mod markdown;

pub use csv_export::*;
pub use self::json::*;
pub use markdown::*;
