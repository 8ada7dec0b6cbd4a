//! # Bounded Retry Policy
//!
//! One retry policy for every source fetch: up to [`MAX_ATTEMPTS`] attempts
//! with a fixed [`RETRY_DELAY`] pause between attempts that failed for a
//! transient reason. Non-transient failures are surfaced immediately, and
//! exhaustion surfaces the most recent transient failure wrapped in
//! [`FetchError::Exhausted`]. There is no silent degradation.
//!
//! Retrying lives here, in one place, rather than inside the HTTP client:
//! stacking an additional middleware retry layer under this loop would
//! multiply the attempt count.

use std::future::Future;

use thiserror::Error;
use tokio::time::{sleep, Duration};
use tracing::{error, warn};

/// Maximum number of fetch attempts per request.
pub const MAX_ATTEMPTS: u32 = 5;

/// Fixed pause between attempts that failed transiently.
pub const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Errors raised while fetching from a source API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the client timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status code.
    #[error("HTTP request failed with status {status} for {endpoint}")]
    HttpStatus {
        /// The numeric HTTP status code.
        status: u16,
        /// The endpoint that was hit.
        endpoint: String,
    },

    /// The request target was malformed or missing.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A connection-level failure (DNS, refused, reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// A successful-looking response whose body signals that the backend
    /// itself misbehaved (missing framing line, undecodable record list).
    #[error("backend response anomaly: {0}")]
    Backend(String),

    /// The response body could not be decoded as the expected structure.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// Every allowed attempt failed transiently; carries the last failure.
    #[error("giving up after {attempts} attempts: {source}")]
    Exhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The most recent transient failure.
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether this failure is worth another attempt.
    ///
    /// Timeouts, HTTP error statuses, malformed targets, connection failures
    /// and backend body anomalies are transient; a decode failure of an
    /// otherwise well-formed response is not, since the payload will not
    /// improve on a retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout(_)
                | FetchError::HttpStatus { .. }
                | FetchError::InvalidUrl(_)
                | FetchError::Network(_)
                | FetchError::Backend(_)
        )
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_builder() {
            FetchError::InvalidUrl(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// # With Retries
///
/// Drives `op` up to `max_attempts` times, pausing `delay` after each
/// transient failure. The attempt number (1-based) is passed to `op` so
/// callers can log it.
///
/// ## Returns
/// The first success, the first non-transient failure, or
/// [`FetchError::Exhausted`] wrapping the final transient failure.
pub async fn with_retries<T, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut op: F,
) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() => {
                if attempt >= max_attempts {
                    error!(attempts = attempt, error = %err, "fetch failed on final attempt");
                    return Err(FetchError::Exhausted {
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
                warn!(attempt, max_attempts, error = %err, "transient fetch failure, retrying");
                sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
