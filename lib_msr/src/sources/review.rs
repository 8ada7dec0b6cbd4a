//! # Pending-Review Source Client
//!
//! Fetches one user's open review items. The feed takes its filter as a
//! literal query string (`?q=status:open+owner:<user>`) whose grammar must
//! not be percent-encoded, and guards its JSON payload with one throwaway
//! leading line that has to be stripped before decoding.
//!
//! Upstream records identify their owner by the feed's own account fields,
//! so after decoding, each record's `owner` object is augmented with the
//! requesting user's identifier under [`OWNER_ID_KEY`]; downstream
//! projection can then always recover who a record belongs to.

use serde_json::{Map, Value};
use tracing::debug;

use crate::retrieve::ky_http::ApiClient;
use crate::retrieve::retry::{self, FetchError, MAX_ATTEMPTS, RETRY_DELAY};

/// Key under which the requesting user's id is injected into each record's
/// `owner` object.
pub const OWNER_ID_KEY: &str = "gerrit_id";

/// Client for the open/pending review feed.
pub struct ReviewClient {
    client: ApiClient,
}

impl ReviewClient {
    /// Creates a client for the given review endpoint.
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: ApiClient::new(endpoint)?,
        })
    }

    /// # Fetch
    ///
    /// Fetches `user`'s open review items, retrying transient failures
    /// under the shared bounded policy. A body anomaly (missing framing
    /// line or an undecodable record list) counts as transient here: this
    /// backend is known to emit garbage under load and usually recovers.
    pub async fn fetch(&self, user: &str) -> Result<Value, FetchError> {
        let query = format!("?q=status:open+owner:{user}");
        let client = &self.client;

        retry::with_retries(MAX_ATTEMPTS, RETRY_DELAY, move |attempt| {
            let query = query.clone();
            async move {
                debug!(user, attempt, "requesting open review items");
                let response = client.get_raw_query(&query).await?;
                if !response.success {
                    return Err(FetchError::HttpStatus {
                        status: response.status,
                        endpoint: client.endpoint().to_string(),
                    });
                }
                decode_guarded(&response.body, user)
            }
        })
        .await
    }
}

/// Strips the one-line framing guard, decodes the record list, and injects
/// the requesting user's id into each record's `owner` object (creating it
/// when the upstream record lacks one).
fn decode_guarded(body: &str, user: &str) -> Result<Value, FetchError> {
    let (_guard, json) = body
        .split_once('\n')
        .ok_or_else(|| FetchError::Backend("response body has no framing line".into()))?;

    let mut records: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| FetchError::Backend(format!("undecodable review record list: {e}")))?;

    for record in &mut records {
        if let Some(obj) = record.as_object_mut() {
            let owner = obj
                .entry("owner")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(owner) = owner.as_object_mut() {
                owner.insert(OWNER_ID_KEY.to_string(), Value::String(user.to_string()));
            }
        }
    }
    Ok(Value::Array(records))
}
