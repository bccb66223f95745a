//! Infrastructure layer for bridge-panel.
//!
//! Contains the adapters behind the application seams: the reqwest-backed
//! control API client, console notifications, plain-text rendering of the
//! panel, and the TOML configuration file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bridge_panel_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod api;
pub mod notify;
pub mod render;
pub mod storage;
