//! # Window-Keyed Dataset Cache
//!
//! Everything about where cached datasets live and when they are fetched.
//! `paths` is the pure half (deterministic path construction and the
//! ordered multi-directory search); `store` is the effectful half
//! (directory creation, cache-presence check, fetch-on-miss, YAML
//! persistence).

/// Deterministic cache path construction and path-list search.
pub mod paths;
/// The cache-or-fetch store.
pub mod store;
