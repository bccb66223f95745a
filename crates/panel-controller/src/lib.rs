//! bridge-panel library crate.
//!
//! A headless controller for a remotely managed bridge process.  It polls the
//! control server for the bridge status, keeps a view model of the control
//! panel consistent with that status, and mediates start/stop/refresh actions.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Operator (terminal)            Control server (HTTP/JSON)
//!         ↕                                ↕
//! [bridge-panel]
//!   ├── application/     Poller, catalog, mode switch, lifecycle, refresher,
//!   │                    the PanelView model, and the BridgeApi/Notifier seams
//!   └── infrastructure/
//!         ├── api/       reqwest-backed BridgeApi (+ scripted fake)
//!         ├── notify/    console Notifier (+ recording fake)
//!         ├── render     plain-text rendering of the panel
//!         └── storage/   TOML configuration file
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `bridge_panel_core` and its own traits only; it
//!   never names `reqwest` or a terminal.
//! - `infrastructure` implements the application traits.
//! - `main.rs` wires a concrete `BridgeApi` and `Notifier` into a
//!   [`PanelController`](application::controller::PanelController).

/// Application layer: the controller components and their seams.
pub mod application;

/// Infrastructure layer: HTTP client, notifiers, rendering, configuration.
pub mod infrastructure;
