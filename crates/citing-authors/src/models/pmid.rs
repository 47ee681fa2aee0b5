//! PubMed identifier.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid PMID pattern"));

/// An opaque publication identifier (a PubMed "PMID").
///
/// Source and citing papers share this type. No numeric validation is
/// applied: whatever the service hands back is carried through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pmid(String);

impl Pmid {
    /// Wrap an identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract every PMID from free text such as `"123, 456\n789"`.
    ///
    /// Any run of non-digits separates identifiers.
    #[must_use]
    pub fn parse_list(text: &str) -> Vec<Self> {
        DIGIT_RUN.find_iter(text).map(|m| Self::new(m.as_str())).collect()
    }
}

impl fmt::Display for Pmid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pmid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Pmid {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Pmid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Pmid {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
