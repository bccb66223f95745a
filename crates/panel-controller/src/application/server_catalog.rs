//! Server catalog loading.
//!
//! The catalog is replaced wholesale on every successful load; there is no
//! diffing against the previous list.  A failed load leaves the previous
//! options in place and hands the error back to the caller.

use std::sync::Arc;

use tracing::{debug, warn};

use super::bridge_api::{ApiError, BridgeApi};
use super::panel::SharedPanel;

/// Fetches `GET /api/servers` and rebuilds the select options.
#[derive(Clone)]
pub struct ServerCatalog {
    api: Arc<dyn BridgeApi>,
    panel: SharedPanel,
}

impl ServerCatalog {
    pub fn new(api: Arc<dyn BridgeApi>, panel: SharedPanel) -> Self {
        Self { api, panel }
    }

    /// Loads the catalog and returns the number of servers now listed.
    ///
    /// # Errors
    ///
    /// The [`ApiError`] of the fetch.  The panel is untouched in that case.
    pub async fn load(&self) -> Result<usize, ApiError> {
        let entries = self.api.servers().await.map_err(|e| {
            warn!(error = %e, "server catalog load failed");
            e
        })?;

        let count = entries.len();
        self.panel.update(|view| view.replace_catalog(entries));
        debug!(count, "server catalog replaced");
        Ok(count)
    }
}
