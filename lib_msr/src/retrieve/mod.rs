//! # Data Retrieval Module
//!
//! Centralized network access for the source clients: a minimal GET-only
//! HTTP client plus the single bounded retry policy applied uniformly to
//! both source kinds. Keeping the policy in one place is what guarantees
//! the documented retry bound: at most [`retry::MAX_ATTEMPTS`] attempts
//! per request with a fixed [`retry::RETRY_DELAY`] pause.

/// GET-only HTTP client bound to a source endpoint.
pub mod ky_http;
/// The bounded retry policy and fetch error taxonomy.
pub mod retry;
