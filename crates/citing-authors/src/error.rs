//! Error types for the citing-authors pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the E-utilities client layer.
///
/// Every variant is fatal for the request that produced it.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error (retries exhausted, etc.)
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the E-utilities service (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// XML payload could not be parsed
    #[error("Failed to parse {endpoint} response: {message}")]
    Parse {
        /// Endpoint whose payload was malformed
        endpoint: &'static str,
        /// Parser message
        message: String,
    },

    /// The service answered 200 but reported an `<ERROR>` element
    #[error("{endpoint} reported an error: {message}")]
    Service {
        /// Endpoint that reported the error
        endpoint: &'static str,
        /// Error text from the payload
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a parse error for the given endpoint.
    #[must_use]
    pub fn parse(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Parse { endpoint, message: message.into() }
    }

    /// Create a service-reported error for the given endpoint.
    #[must_use]
    pub fn service(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Service { endpoint, message: message.into() }
    }

    /// Returns true if this error is transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }
}

/// Errors from one aggregation request.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The bibliographic service failed
    #[error("External service error: {0}")]
    Client(#[from] ClientError),

    /// A search resolved zero source identifiers
    #[error("No source papers found for query '{query}'")]
    EmptyResult {
        /// The search term that matched nothing
        query: String,
    },

    /// Per-source citing counts disagree with the metadata response length
    #[error("Grouping mismatch: expected {expected} author groups, got {actual}")]
    GroupingMismatch {
        /// Sum of per-source citing-id counts
        expected: usize,
        /// Length of the flat author-group sequence
        actual: usize,
    },

    /// The request itself was malformed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

impl PipelineError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// True when the bibliographic service is to blame.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::Client(_))
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the aggregation pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<ClientError> for ToolError {
    fn from(err: ClientError) -> Self {
        Self::Pipeline(PipelineError::Client(err))
    }
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Pipeline(PipelineError::Client(ClientError::RateLimited { retry_after })) => {
                format!(
                    "Rate limited by the E-utilities API. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Pipeline(PipelineError::Validation { field, message })
            | Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
