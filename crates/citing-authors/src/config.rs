//! Configuration for the E-utilities client and aggregation pipeline.

use std::time::Duration;

use crate::models::GroupingMode;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI E-utilities.
    pub const EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Result cap sent as `retmax` on every request.
    pub const RETMAX: u32 = 100_000;

    /// Request timeout (esummary over thousands of ids is slow).
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries for transient failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Lower bound of the exponential backoff.
    pub const RETRY_MIN_BACKOFF: Duration = Duration::from_secs(1);

    /// Upper bound of the exponential backoff.
    pub const RETRY_MAX_BACKOFF: Duration = Duration::from_secs(30);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// E-utilities `tool` parameter identifying this client.
    pub const TOOL_NAME: &str = "citing-authors";
}

/// Client and pipeline configuration.
#[derive(Clone)]
pub struct Config {
    /// NCBI API key (optional).
    pub api_key: Option<String>,

    /// Base URL for E-utilities (for testing with mock servers).
    pub eutils_url: String,

    /// Result cap for every request.
    pub retmax: u32,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Backoff lower bound.
    pub retry_min_backoff: Duration,

    /// Backoff upper bound.
    pub retry_max_backoff: Duration,

    /// What to do when citing counts and metadata length disagree.
    pub grouping_mode: GroupingMode,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            eutils_url: api::EUTILS_URL.to_string(),
            retmax: api::RETMAX,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            retry_min_backoff: api::RETRY_MIN_BACKOFF,
            retry_max_backoff: api::RETRY_MAX_BACKOFF,
            grouping_mode: GroupingMode::default(),
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            eutils_url: base_url.trim_end_matches('/').to_string(),
            retmax: api::RETMAX,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0, // Mocks answer deterministically
            retry_min_backoff: Duration::from_millis(1),
            retry_max_backoff: Duration::from_millis(5),
            grouping_mode: GroupingMode::Strict,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `NCBI_API_KEY`, `EUTILS_BASE_URL`, `EUTILS_RETMAX` and
    /// `GROUPING_MODE`, after loading a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::new(std::env::var("NCBI_API_KEY").ok());

        if let Ok(url) = std::env::var("EUTILS_BASE_URL") {
            config.eutils_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(retmax) = std::env::var("EUTILS_RETMAX") {
            config.retmax = retmax
                .parse()
                .map_err(|e| anyhow::anyhow!("EUTILS_RETMAX must be a positive integer: {e}"))?;
        }
        if let Ok(mode) = std::env::var("GROUPING_MODE") {
            config.grouping_mode = mode.parse()?;
        }

        Ok(config)
    }

    /// Override the grouping mode.
    #[must_use]
    pub const fn with_grouping_mode(mut self, mode: GroupingMode) -> Self {
        self.grouping_mode = mode;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.has_api_key())
            .field("retmax", &self.retmax)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .field("grouping_mode", &self.grouping_mode)
            .finish()
    }
}
