//! # Per-User Dataset Pair Sequence
//!
//! Drives the cache store twice per configured user (once per source kind)
//! and yields the pair of cached-dataset locations in roster order. The
//! sequence is lazy, finite and non-restartable, and a failure on either
//! source for any user aborts it: there is no partial-user skipping in a
//! once-a-month batch job.

use std::path::PathBuf;

use crate::cache::store::{CacheError, CacheStore};
use crate::report::window::TimeWindow;
use crate::sources::activity::ActivityClient;
use crate::sources::review::ReviewClient;
use crate::sources::SourceKind;

/// The lazy sequence of `(activity_path, pending_review_path)` pairs, one
/// per roster user.
pub struct SourcePairs<'a> {
    store: &'a CacheStore,
    activity: &'a ActivityClient,
    review: &'a ReviewClient,
    window: &'a TimeWindow,
    users: std::slice::Iter<'a, String>,
    /// Set after the first failure; the sequence yields nothing afterwards.
    failed: bool,
}

impl<'a> SourcePairs<'a> {
    /// Creates the sequence over `users` in roster order.
    pub fn new(
        store: &'a CacheStore,
        activity: &'a ActivityClient,
        review: &'a ReviewClient,
        window: &'a TimeWindow,
        users: &'a [String],
    ) -> Self {
        Self {
            store,
            activity,
            review,
            window,
            users: users.iter(),
            failed: false,
        }
    }

    /// # Next Pair
    ///
    /// Resolves the next user's dataset pair, fetching whatever is not yet
    /// cached. Returns `None` when the roster is exhausted or after a
    /// failure has been yielded.
    pub async fn next_pair(&mut self) -> Option<Result<(PathBuf, PathBuf), CacheError>> {
        if self.failed {
            return None;
        }
        let user = self.users.next()?;
        match self.pair_for(user).await {
            Ok(pair) => Some(Ok(pair)),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    async fn pair_for(&self, user: &str) -> Result<(PathBuf, PathBuf), CacheError> {
        let activity_path = self
            .store
            .fetch_or_open(user, self.window, SourceKind::Activity.suffix(), || {
                self.activity.fetch(user, self.window)
            })
            .await?;
        let review_path = self
            .store
            .fetch_or_open(user, self.window, SourceKind::PendingReview.suffix(), || {
                self.review.fetch(user)
            })
            .await?;
        Ok((activity_path, review_path))
    }
}
