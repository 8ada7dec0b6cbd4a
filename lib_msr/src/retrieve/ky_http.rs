//! # HTTP Retrieval Client
//!
//! A thin GET-only wrapper around `reqwest` used by both source clients.
//! It supports the two request-parameter shapes the sources need (a
//! structured query-pair list, or a literal query-string suffix appended to
//! the endpoint verbatim) and returns the raw body text so callers can
//! apply source-specific pre-processing (the pending-review source frames
//! its JSON behind a throwaway leading line) before decoding.
//!
//! Retrying is deliberately not handled here; see [`crate::retrieve::retry`].

use reqwest::RequestBuilder;
use tokio::time::Duration;
use url::Url;

use crate::retrieve::retry::FetchError;

/// Per-request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A raw API response: status plus undecoded body text.
#[derive(Debug)]
pub struct ApiResponse {
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
    /// The raw response body.
    pub body: String,
}

/// A GET-only HTTP client bound to one source endpoint.
pub struct ApiClient {
    /// The underlying reqwest client.
    inner: reqwest::Client,
    /// The endpoint every request targets.
    endpoint: Url,
}

impl ApiClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    /// Returns [`FetchError::InvalidUrl`] when the endpoint is not an
    /// absolute URL, and [`FetchError::Network`] when the underlying client
    /// cannot be constructed.
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| FetchError::InvalidUrl(format!("{endpoint}: {e}")))?;
        let inner = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { inner, endpoint })
    }

    /// The endpoint this client targets, for error reporting.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Performs a GET with structured, percent-encoded query parameters.
    pub async fn get_with_params(
        &self,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, FetchError> {
        let request = self.inner.get(self.endpoint.clone()).query(params);
        self.execute(request).await
    }

    /// Performs a GET against the endpoint with `query` appended verbatim.
    ///
    /// The pending-review source's query grammar (`?q=status:open+owner:x`)
    /// must not be percent-encoded, so the suffix is concatenated as-is.
    pub async fn get_raw_query(&self, query: &str) -> Result<ApiResponse, FetchError> {
        let target = format!("{}{}", self.endpoint, query);
        let url =
            Url::parse(&target).map_err(|e| FetchError::InvalidUrl(format!("{target}: {e}")))?;
        self.execute(self.inner.get(url)).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, FetchError> {
        let response = request.send().await.map_err(FetchError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        Ok(ApiResponse {
            status: status.as_u16(),
            success: status.is_success(),
            body,
        })
    }
}
