//! Application layer for bridge-panel.
//!
//! Use cases in this layer orchestrate the domain types from
//! `bridge_panel_core` and depend on abstractions rather than concrete I/O:
//!
//! - **`bridge_api`**        – The [`BridgeApi`] trait: the five control endpoints.
//! - **`notify`**            – The [`Notifier`] trait: blocking errors and
//!   non-blocking successes.
//! - **`panel`**             – [`PanelView`], the model of every bound control.
//! - **`status_poller`**     – Periodic status fetch, sequenced, silent on failure.
//! - **`server_catalog`**    – Catalog fetch and wholesale select rebuild.
//! - **`discovery_switch`**  – Discovery/manual mode and catalog selection.
//! - **`lifecycle`**         – Validated start and stop with busy buttons.
//! - **`catalog_refresher`** – Server rescan followed by a catalog reload.
//! - **`controller`**        – [`PanelController`], which wires it all together.
//!
//! Nothing here opens a socket or touches a terminal.

pub mod bridge_api;
pub mod catalog_refresher;
pub mod controller;
pub mod discovery_switch;
pub mod lifecycle;
pub mod notify;
pub mod panel;
pub mod server_catalog;
pub mod status_poller;

pub use bridge_api::{ApiError, BridgeApi};
pub use controller::{PanelController, PanelSettings, PollerHandle};
pub use notify::Notifier;
pub use panel::{ButtonState, PanelView, SharedPanel};
