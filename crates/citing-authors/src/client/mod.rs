//! NCBI E-utilities client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff on transient failures
//! - Per-call request and connect timeouts
//! - Id-keyed alignment of `elink`/`esummary` answers to the requested ids

pub mod xml;

use std::collections::HashMap;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{DocSummary, Pmid};

use self::xml::LinkSet;

/// The three queries the aggregation pipeline needs from a bibliographic service.
///
/// Every call is an independent, stateless round trip.
#[async_trait::async_trait]
pub trait Bibliographic: Send + Sync {
    /// Identifiers matching a search term, in service order.
    async fn search(&self, query: &str) -> ClientResult<Vec<Pmid>>;

    /// For each input id, the ids of papers citing it.
    ///
    /// The result has the same length and order as `ids`; an id the service
    /// says nothing about gets an empty list.
    async fn cited_by(&self, ids: &[Pmid]) -> ClientResult<Vec<Vec<Pmid>>>;

    /// Summary metadata, aligned positionally with `ids`.
    async fn summaries(&self, ids: &[Pmid]) -> ClientResult<Vec<DocSummary>>;

    /// Author lists, aligned positionally with `ids`.
    async fn metadata(&self, ids: &[Pmid]) -> ClientResult<Vec<Vec<String>>> {
        let docs = self.summaries(ids).await?;
        Ok(docs.into_iter().map(|doc| doc.authors).collect())
    }
}

/// E-utilities API client.
#[derive(Clone)]
pub struct EutilsClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API key (optional).
    api_key: Option<String>,

    /// E-utilities base URL.
    eutils_url: String,

    /// Result cap.
    retmax: u32,

    /// Request timeout, reported when a call times out.
    request_timeout: std::time::Duration,
}

impl EutilsClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry_min_backoff, config.retry_max_backoff)
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            eutils_url: config.eutils_url.clone(),
            retmax: config.retmax,
            request_timeout: config.request_timeout,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Parameters every E-utilities request carries.
    fn base_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("retmax".to_string(), self.retmax.to_string()),
            ("tool".to_string(), api::TOOL_NAME.to_string()),
        ];
        if let Some(ref key) = self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
        params
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}.fcgi", self.eutils_url, endpoint)
    }

    /// Make a GET request and return the body text.
    async fn get_xml(&self, endpoint: &str, params: &[(String, String)]) -> ClientResult<String> {
        let url = self.endpoint_url(endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let response = self.handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Make a form-encoded POST request and return the body text.
    async fn post_xml(&self, endpoint: &str, params: &[(String, String)]) -> ClientResult<String> {
        let url = self.endpoint_url(endpoint);

        let response = self
            .client
            .post(&url)
            .form(params)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let response = self.handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Classify a transport failure, surfacing timeouts distinctly.
    fn send_error(&self, err: reqwest_middleware::Error) -> ClientError {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                ClientError::Timeout(self.request_timeout)
            }
            reqwest_middleware::Error::Reqwest(e) => ClientError::Http(e),
            other => ClientError::Middleware(other),
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1);

                Err(ClientError::rate_limited(retry_after))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl Bibliographic for EutilsClient {
    async fn search(&self, query: &str) -> ClientResult<Vec<Pmid>> {
        let mut params = self.base_params();
        params.push(("db".to_string(), "pubmed".to_string()));
        params.push(("term".to_string(), query.to_string()));

        let body = self.get_xml("esearch", &params).await?;
        let ids = xml::parse_esearch(&body)?;

        tracing::debug!(query, found = ids.len(), "esearch");
        Ok(ids)
    }

    async fn cited_by(&self, ids: &[Pmid]) -> ClientResult<Vec<Vec<Pmid>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = self.base_params();
        params.push(("dbfrom".to_string(), "pubmed".to_string()));
        params.push(("linkname".to_string(), xml::CITED_IN.to_string()));
        // One `id` per source so the service answers with one LinkSet each;
        // sent as a form body since search results can hold thousands of ids
        params.extend(ids.iter().map(|id| ("id".to_string(), id.to_string())));

        let body = self.post_xml("elink", &params).await?;
        let sets = xml::parse_elink(&body, xml::CITED_IN)?;

        let cited_by = align_link_sets(ids, sets);
        tracing::debug!(
            sources = ids.len(),
            citing = cited_by.iter().map(Vec::len).sum::<usize>(),
            "elink"
        );
        Ok(cited_by)
    }

    async fn summaries(&self, ids: &[Pmid]) -> ClientResult<Vec<DocSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.iter().map(Pmid::as_str).collect::<Vec<_>>().join(",");
        let mut params = self.base_params();
        params.push(("db".to_string(), "pubmed".to_string()));
        params.push(("id".to_string(), joined));

        let body = self.post_xml("esummary", &params).await?;
        let docs = xml::parse_esummary(&body)?;

        tracing::debug!(requested = ids.len(), returned = docs.len(), "esummary");
        Ok(align_summaries(ids, docs))
    }
}

impl std::fmt::Debug for EutilsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EutilsClient")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}

/// Match `elink` answers back to the requested ids by the id each set names.
///
/// Ids without a set (omitted, or answered out of order) get an empty list;
/// sets naming an unrequested id, or no id, are dropped.
#[must_use]
pub fn align_link_sets(ids: &[Pmid], sets: Vec<LinkSet>) -> Vec<Vec<Pmid>> {
    let mut by_source: HashMap<Pmid, Vec<Pmid>> = HashMap::with_capacity(sets.len());
    for set in sets {
        match set.source {
            Some(source) => {
                by_source.entry(source).or_insert(set.linked);
            }
            None => tracing::warn!(links = set.linked.len(), "elink LinkSet without an id"),
        }
    }

    ids.iter().map(|id| by_source.get(id).cloned().unwrap_or_default()).collect()
}

/// Match `esummary` documents back to the requested ids.
///
/// An id with no `DocSum` gets an empty summary in its position.
#[must_use]
pub fn align_summaries(ids: &[Pmid], docs: Vec<DocSummary>) -> Vec<DocSummary> {
    let mut by_id: HashMap<Pmid, DocSummary> = HashMap::with_capacity(docs.len());
    for doc in docs {
        by_id.entry(doc.pmid.clone()).or_insert(doc);
    }

    ids.iter()
        .map(|id| by_id.get(id).cloned().unwrap_or_else(|| DocSummary::empty(id.clone())))
        .collect()
}
