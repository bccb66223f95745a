//! Domain entities for the bridge control panel.
//!
//! Pure business rules with no I/O:
//!
//! - **`status`**     – The last bridge status snapshot reported by the server.
//! - **`catalog`**    – Discoverable game servers and their select-box options.
//! - **`mode`**       – Discovery (pick from catalog) vs. manual target entry.
//! - **`target`**     – Validation of the port and target server before a start.
//! - **`projection`** – The pure `(running, mode) -> UiState` mapping.

pub mod catalog;
pub mod mode;
pub mod projection;
pub mod status;
pub mod target;
