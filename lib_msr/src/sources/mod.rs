//! # Source API Clients
//!
//! One client per external data feed, each owning a pre-configured
//! [`crate::retrieve::ky_http::ApiClient`] and fetching through the shared
//! bounded retry policy, plus the per-user pair sequence that drives the
//! cache store for both feeds.
//!
//! The two feeds differ in request shape and payload framing:
//!
//! - **Activity**: structured query parameters (epoch window bounds and the
//!   user id); plain JSON object response.
//! - **PendingReview**: a literal query-string suffix; the response body
//!   carries one throwaway framing line ahead of the JSON array, and each
//!   record's `owner` object is augmented with the requesting user's id.

/// Client for the contributor-activity feed.
pub mod activity;
/// The lazy per-user (activity, pending-review) dataset pair sequence.
pub mod pairs;
/// Client for the open/pending review feed.
pub mod review;

/// Default endpoint for the contributor-activity feed.
pub const ACTIVITY_API: &str = "http://stackalytics.com/api/1.0/activity";

/// Default endpoint for the pending-review feed.
pub const REVIEW_API: &str = "https://review.openstack.org/changes/";

/// The two external data feeds a report draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Contributor activity records.
    Activity,
    /// Open/pending review items.
    PendingReview,
}

impl SourceKind {
    /// Cache file name suffix for this feed.
    pub fn suffix(&self) -> &'static str {
        match self {
            SourceKind::Activity => ".yaml",
            SourceKind::PendingReview => ".open.yaml",
        }
    }
}
