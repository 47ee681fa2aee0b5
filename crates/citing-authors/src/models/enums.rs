//! Enumeration types for pipeline options and tool parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
    /// Header-less comma-separated rows.
    Csv,
}

/// Which authors to drop from the tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Keep everyone.
    #[default]
    All,
    /// Drop authors of the source papers.
    ExcludeSource,
    /// Drop source authors and every co-author of a citing paper they appear on.
    AggressiveExcludeSource,
}

impl ExclusionPolicy {
    /// Resolve the option together with the legacy boolean flag.
    ///
    /// An explicit option always wins; otherwise `drop_source_authors = true`
    /// means [`ExclusionPolicy::ExcludeSource`].
    #[must_use]
    pub fn resolve(option: Option<Self>, drop_source_authors: Option<bool>) -> Self {
        match (option, drop_source_authors) {
            (Some(policy), _) => policy,
            (None, Some(true)) => Self::ExcludeSource,
            (None, _) => Self::All,
        }
    }

    /// True when source-author metadata has to be fetched.
    #[must_use]
    pub const fn needs_source_authors(self) -> bool {
        !matches!(self, Self::All)
    }

    /// Wire name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ExcludeSource => "exclude_source",
            Self::AggressiveExcludeSource => "aggressive_exclude_source",
        }
    }
}

impl fmt::Display for ExclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExclusionPolicy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "exclude_source" => Ok(Self::ExcludeSource),
            "aggressive_exclude_source" => Ok(Self::AggressiveExcludeSource),
            other => Err(PipelineError::validation(
                "option",
                format!(
                    "unknown exclusion option '{other}' \
                     (expected all, exclude_source or aggressive_exclude_source)"
                ),
            )),
        }
    }
}

/// Behaviour when per-source citing counts disagree with the metadata length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Fail the request with a grouping mismatch.
    #[default]
    Strict,
    /// Fill groups left to right and drop whatever does not fit.
    Truncate,
}

impl FromStr for GroupingMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "truncate" => Ok(Self::Truncate),
            other => Err(PipelineError::validation(
                "grouping_mode",
                format!("unknown grouping mode '{other}' (expected strict or truncate)"),
            )),
        }
    }
}
