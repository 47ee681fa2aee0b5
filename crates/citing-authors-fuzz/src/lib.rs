//! Fuzzing library for citing-authors.
//!
//! Targets cover the E-utilities XML parsers and the JSON tool inputs.
//!
//! # Usage
//!
//! ```bash
//! cd crates/citing-authors-fuzz
//! cargo +nightly fuzz run fuzz_elink_xml -- -max_total_time=60
//! ```

pub use citing_authors::client::xml;
pub use citing_authors::models;
