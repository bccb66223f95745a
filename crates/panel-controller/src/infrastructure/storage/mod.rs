//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the
//! platform-appropriate directory (or an explicit path), supplies defaults
//! when the file does not exist yet, and writes it back for `config --write`.

pub mod config;
