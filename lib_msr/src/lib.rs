//! # lib_msr
//!
//! Core library for `msr`, a once-a-month batch tool that produces a
//! contributor status report from two external REST sources.
//!
//! The pipeline is: resolve the reporting window, then for each configured
//! user fetch (or reuse from the on-disk cache) one activity dataset and one
//! pending-review dataset, project the raw records through configured field
//! aliases, and hand the result to the renderer.
//!
//! ## Contained Modules:
//!
//! - **`configs`**: loading of the `msr.json5` configuration file.
//! - **`report`**: reporting window resolution, record projection, and
//!   summary counting.
//! - **`cache`**: deterministic cache path construction and the
//!   cache-or-fetch store.
//! - **`retrieve`**: the low-level HTTP client and the bounded retry policy.
//! - **`sources`**: the two source API clients and the per-user pair
//!   sequence that drives the cache store.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

// Declare the modules to re-export
pub mod cache;
pub mod configs;
pub mod report;
pub mod retrieve;
pub mod sources;

// Re-export the types most callers need
pub use cache::store::{CacheError, CacheStore};
pub use configs::config_msr::{read_config, MsrConfig, MsrConfigError};
pub use report::actions::{load_actions, FieldAliasMap, ProjectError, ProjectedAction};
pub use report::summary::summarize;
pub use report::window::TimeWindow;
pub use retrieve::retry::FetchError;
pub use sources::activity::ActivityClient;
pub use sources::pairs::SourcePairs;
pub use sources::review::ReviewClient;
pub use sources::{SourceKind, ACTIVITY_API, REVIEW_API};
