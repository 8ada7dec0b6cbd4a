//! # Configuration Module
//!
//! Loading of the `msr.json5` configuration file. Configuration is read
//! once at startup and passed explicitly into every component; there is no
//! process-wide mutable configuration state.

/// The `msr.json5` schema and loader.
pub mod config_msr;
