//! # Report Building Blocks
//!
//! The pieces between the cache and the renderer: the reporting window that
//! keys every cache lookup, the record projector that normalizes raw source
//! records into the configured field set, and the summary fold the renderer
//! consumes.

/// Record projection through configured field aliases.
pub mod actions;
/// Per-type summary counting.
pub mod summary;
/// The reporting window and its derived quantities.
pub mod window;
