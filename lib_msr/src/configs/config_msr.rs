//! # MSR Configuration
//!
//! Loads the `msr.json5` configuration file into [`MsrConfig`]: the ordered
//! candidate data-root directories, the user roster, the two field-alias
//! maps, and optional source endpoint overrides. The file is searched for
//! first in the current directory and then in `~/.config/msr`, and a miss
//! everywhere is a fatal configuration error; nothing network-related has
//! happened yet at that point.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cache::paths::file_in_paths;
use crate::report::actions::FieldAliasMap;
use crate::sources::{ACTIVITY_API, REVIEW_API};

/// Name of the configuration file searched for in [`CONFIG_SEARCH_PATHS`].
pub const CONFIG_FILE_NAME: &str = "msr.json5";

/// Directories searched, in order, for [`CONFIG_FILE_NAME`].
pub const CONFIG_SEARCH_PATHS: &[&str] = &[".", "~/.config/msr"];

/// Errors raised while locating or parsing the configuration.
#[derive(Debug, Error)]
pub enum MsrConfigError {
    /// No configuration file exists in any search path.
    #[error("{file} not found; expected in one of: {searched}")]
    NotFound {
        /// The file name that was searched for.
        file: String,
        /// The comma-joined search path list.
        searched: String,
    },

    /// The file exists but could not be read.
    #[error("I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not valid JSON5 for [`MsrConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// The `data` section: candidate data-root directories, first existing one
/// wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataSection {
    /// Ordered data-root candidates; `~` is expanded.
    pub path: Vec<String>,
}

/// Optional overrides for the two source endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEndpoints {
    /// Endpoint of the contributor-activity feed.
    #[serde(default = "default_activity_api")]
    pub activity: String,
    /// Endpoint of the pending-review feed.
    #[serde(default = "default_review_api")]
    pub review: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            activity: default_activity_api(),
            review: default_review_api(),
        }
    }
}

fn default_activity_api() -> String {
    ACTIVITY_API.to_string()
}

fn default_review_api() -> String {
    REVIEW_API.to_string()
}

/// # MSR Configuration
///
/// Everything the pipeline consumes from configuration. The alias maps are
/// opaque to this module; their semantics live in
/// [`crate::report::actions`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MsrConfig {
    /// Data-root search list.
    pub data: DataSection,
    /// Ordered roster of user identifiers.
    pub users: Vec<String>,
    /// Field aliases for the activity feed.
    pub fields: FieldAliasMap,
    /// Field aliases for the pending-review feed.
    pub gerrit: FieldAliasMap,
    /// Source endpoint overrides; defaults to the public endpoints.
    #[serde(default)]
    pub apis: ApiEndpoints,
}

/// # Read Config
///
/// Loads the configuration from `file` when given, otherwise from the
/// first [`CONFIG_FILE_NAME`] found along [`CONFIG_SEARCH_PATHS`].
pub fn read_config(file: Option<&Path>) -> Result<MsrConfig, MsrConfigError> {
    let path: PathBuf = match file {
        Some(explicit) => explicit.to_path_buf(),
        None => {
            let search: Vec<String> = CONFIG_SEARCH_PATHS.iter().map(|p| p.to_string()).collect();
            file_in_paths(Path::new(CONFIG_FILE_NAME), &search).ok_or_else(|| {
                MsrConfigError::NotFound {
                    file: CONFIG_FILE_NAME.to_string(),
                    searched: CONFIG_SEARCH_PATHS.join(", "),
                }
            })?
        }
    };
    debug!(path = %path.display(), "loading configuration");
    let text = std::fs::read_to_string(&path)?;
    json5::from_str(&text).map_err(|e| MsrConfigError::Parse(e.to_string()))
}
