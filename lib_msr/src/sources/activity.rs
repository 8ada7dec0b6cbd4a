//! # Activity Source Client
//!
//! Fetches one user's activity records for a reporting window. The feed
//! takes structured query parameters (the window bounds as Unix epoch
//! seconds plus the user identifier) and answers with a JSON object whose
//! `activity` key holds the record list. The body is decoded as-is; this
//! feed has no framing quirks.

use serde_json::Value;
use tracing::debug;

use crate::report::window::TimeWindow;
use crate::retrieve::ky_http::ApiClient;
use crate::retrieve::retry::{self, FetchError, MAX_ATTEMPTS, RETRY_DELAY};

/// Client for the contributor-activity feed.
pub struct ActivityClient {
    client: ApiClient,
}

impl ActivityClient {
    /// Creates a client for the given activity endpoint.
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: ApiClient::new(endpoint)?,
        })
    }

    /// # Fetch
    ///
    /// Fetches `user`'s activity for `window`, retrying transient failures
    /// under the shared bounded policy. A non-2xx status is transient; a
    /// body that fails to decode as JSON is not, since retrying would
    /// replay the same malformed payload.
    pub async fn fetch(&self, user: &str, window: &TimeWindow) -> Result<Value, FetchError> {
        let params: Vec<(&str, String)> = vec![
            ("start_date", window.epoch_start().to_string()),
            ("end_date", window.epoch_end().to_string()),
            ("gerrit_id", user.to_string()),
        ];
        let client = &self.client;

        retry::with_retries(MAX_ATTEMPTS, RETRY_DELAY, move |attempt| {
            let params = params.clone();
            async move {
                debug!(user, attempt, "requesting activity records");
                let response = client.get_with_params(&params).await?;
                if !response.success {
                    return Err(FetchError::HttpStatus {
                        status: response.status,
                        endpoint: client.endpoint().to_string(),
                    });
                }
                serde_json::from_str(&response.body)
                    .map_err(|e| FetchError::Decode(e.to_string()))
            }
        })
        .await
    }
}
