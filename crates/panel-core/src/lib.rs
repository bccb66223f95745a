//! # panel-core
//!
//! Shared library for the bridge control panel containing the domain model,
//! the pure UI-state projection, and the JSON wire types of the control API.
//!
//! This crate has zero dependencies on async runtimes, HTTP clients, or
//! terminals.  Everything in it can be unit tested without a network.
//!
//! # Architecture overview (for beginners)
//!
//! A *bridge* is a relay process that forwards traffic between browsers and a
//! game server.  It is owned by a remote control server; the panel only sees it
//! through a small HTTP API (`/api/status`, `/api/servers`, `/api/start`,
//! `/api/stop`, `/api/refresh-servers`).
//!
//! - **`domain`** – What the panel knows: the last bridge status, the catalog
//!   of discoverable servers, the selected target, and the projection from
//!   `(running, mode)` to the enabled/visible flags of every control.
//!
//! - **`protocol`** – How the panel talks: request/response bodies, the
//!   endpoint table, and the sequence numbers used to discard stale responses.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `bridge_panel_core::BridgeStatus` instead of the full module path.
pub use domain::catalog::{build_catalog_options, CatalogOption, ServerEntry, PLACEHOLDER_LABEL};
pub use domain::mode::DiscoveryMode;
pub use domain::projection::{project_ui_state, ControlState, UiState};
pub use domain::status::{BridgeStatus, StatusTone};
pub use domain::target::{parse_port, validate_start, validate_target, StartRequest, ValidationError};
pub use protocol::messages::ActionResponse;
pub use protocol::routes::Endpoint;
pub use protocol::sequence::LatestWins;
