//! # Cache Store
//!
//! The cache-or-fetch step of the pipeline. For a `(window, user, kind)` key
//! the store resolves the report-period subdirectory inside the first
//! configured data root that exists, searches every data root for an
//! already-cached file, and only on a miss runs the supplied fetch
//! operation, persisting its payload as YAML before returning the path.
//!
//! A cached file is authoritative for the life of the process and across
//! runs: there is no TTL and no forced refresh. Known limitation: the cache
//! assumes a single non-concurrent process; two simultaneous runs sharing
//! a data root can race on directory creation or file writes.

use std::future::Future;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::cache::paths;
use crate::report::window::TimeWindow;
use crate::retrieve::retry::FetchError;

/// Errors raised while resolving, reading, or writing cached datasets.
#[derive(Debug, Error)]
pub enum CacheError {
    /// None of the configured data roots exist on disk; misconfiguration,
    /// surfaced before any network activity.
    #[error("none of the configured data paths exist: {0}")]
    NoDataPath(String),

    /// An I/O failure while creating directories or writing the dataset.
    #[error("I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    /// The fetched payload could not be serialized to YAML.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The fetch operation itself failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// # Cache Store
///
/// Owns the ordered list of candidate data-root directories and performs
/// the cache-presence check, miss-path fetch, and YAML persistence.
///
/// The fetch operation is passed in as an async closure, which keeps the
/// store free of network concerns and lets tests drive it with canned
/// payloads.
pub struct CacheStore {
    /// Candidate data-root directories, searched in order.
    data_paths: Vec<String>,
}

impl CacheStore {
    /// Creates a store over the configured data roots.
    pub fn new(data_paths: Vec<String>) -> Self {
        Self { data_paths }
    }

    /// # Fetch Or Open
    ///
    /// Returns the location of the cached dataset for
    /// `(window, user, suffix)`, fetching and persisting it first when
    /// absent.
    ///
    /// ## Logic:
    /// 1. Resolve the first data root that exists; none existing is fatal.
    /// 2. Ensure the `<YYYY>/<Mon>` subdirectory exists (idempotent).
    /// 3. Search every data root for the cache file; on a hit return it
    ///    untouched; no network call is made.
    /// 4. On a miss run `fetch`, serialize the payload as YAML to the
    ///    resolved path, and return that path.
    pub async fn fetch_or_open<F, Fut>(
        &self,
        user: &str,
        window: &TimeWindow,
        suffix: &str,
        fetch: F,
    ) -> Result<PathBuf, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, FetchError>>,
    {
        let root = self
            .data_paths
            .iter()
            .map(|p| paths::expand_user(p))
            .find(|p| p.exists())
            .ok_or_else(|| CacheError::NoDataPath(self.data_paths.join(", ")))?;

        let report_dir = root.join(paths::report_subdir(window));
        std::fs::create_dir_all(&report_dir)?;

        let rel = paths::cache_rel_path(window, user, suffix);
        if let Some(existing) = paths::file_in_paths(&rel, &self.data_paths) {
            debug!(user, path = %existing.display(), "cache hit");
            return Ok(existing);
        }

        let payload = fetch().await?;

        let dest = root.join(&rel);
        std::fs::write(&dest, serde_yml::to_string(&payload)?)?;
        info!(user, path = %dest.display(), "fetched and cached dataset");
        Ok(dest.canonicalize().unwrap_or(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::cell::Cell;

    fn march_2016() -> TimeWindow {
        TimeWindow::new(
            NaiveDate::from_ymd_opt(2016, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 3, 31).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_data_roots_fail_before_fetching() {
        let store = CacheStore::new(vec!["/nonexistent/msr-data".into()]);
        let touched = Cell::new(false);
        let result = store
            .fetch_or_open("alice", &march_2016(), ".yaml", || {
                touched.set(true);
                async { Ok::<_, FetchError>(json!({})) }
            })
            .await;
        assert!(matches!(result, Err(CacheError::NoDataPath(_))));
        assert!(!touched.get());
    }

    #[tokio::test]
    async fn miss_persists_payload_at_the_expected_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(vec![dir.path().to_string_lossy().into_owned()]);
        let payload = json!({"activity": [{"kind": "review"}]});

        let path = store
            .fetch_or_open("alice", &march_2016(), ".yaml", || {
                let payload = payload.clone();
                async move { Ok::<_, FetchError>(payload) }
            })
            .await
            .unwrap();

        assert!(path.ends_with("2016/Mar/2016.3.1-31.alice.yaml"));
        let text = std::fs::read_to_string(&path).unwrap();
        let round_trip: Value = serde_yml::from_str(&text).unwrap();
        assert_eq!(round_trip, payload);
    }

    #[tokio::test]
    async fn hit_skips_the_fetch_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(vec![dir.path().to_string_lossy().into_owned()]);
        let window = march_2016();

        store
            .fetch_or_open("alice", &window, ".yaml", || async {
                Ok::<_, FetchError>(json!({"activity": []}))
            })
            .await
            .unwrap();

        let touched = Cell::new(false);
        let path = store
            .fetch_or_open("alice", &window, ".yaml", || {
                touched.set(true);
                async { Ok::<_, FetchError>(json!({"unused": true})) }
            })
            .await
            .unwrap();

        assert!(!touched.get());
        assert!(path.ends_with("2016/Mar/2016.3.1-31.alice.yaml"));
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(vec![dir.path().to_string_lossy().into_owned()]);
        let result = store
            .fetch_or_open("alice", &march_2016(), ".yaml", || async {
                Err::<Value, _>(FetchError::Network("refused".into()))
            })
            .await;
        assert!(matches!(result, Err(CacheError::Fetch(_))));
    }
}
