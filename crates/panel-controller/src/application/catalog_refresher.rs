//! Server rescan followed by a catalog reload.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::bridge_api::{ApiError, BridgeApi};
use super::notify::Notifier;
use super::panel::{Button, SharedPanel};
use super::server_catalog::ServerCatalog;

pub const LOADING_LABEL: &str = "Loading...";
pub const REFRESH_SUCCESS_MESSAGE: &str = "Servers refreshed successfully";
pub const FETCH_SERVERS_ERROR_MESSAGE: &str = "Failed to fetch servers";

/// How a refresh ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Rescan accepted and the catalog reloaded with this many servers.
    Refreshed(usize),
    /// The server answered `success: false` with this error text.
    Refused(String),
    /// The rescan or the catalog reload did not complete.
    Transport(ApiError),
    /// The refresh button was busy; nothing was sent.
    Ignored,
}

/// Triggers `POST /api/refresh-servers` and reloads the catalog.
#[derive(Clone)]
pub struct CatalogRefresher {
    api: Arc<dyn BridgeApi>,
    notifier: Arc<dyn Notifier>,
    panel: SharedPanel,
    catalog: ServerCatalog,
}

impl CatalogRefresher {
    pub fn new(
        api: Arc<dyn BridgeApi>,
        notifier: Arc<dyn Notifier>,
        panel: SharedPanel,
        catalog: ServerCatalog,
    ) -> Self {
        Self {
            api,
            notifier,
            panel,
            catalog,
        }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(_busy) = self.panel.busy(Button::Refresh, LOADING_LABEL) else {
            debug!("refresh ignored: button busy");
            return RefreshOutcome::Ignored;
        };

        info!("requesting server rescan");
        let response = match self.api.refresh_servers().await {
            Ok(response) => response,
            Err(e) => return self.transport_failure(e),
        };
        if let Err(message) = response.into_result() {
            self.report_error(&format!("Failed to refresh: {message}"));
            return RefreshOutcome::Refused(message);
        }

        match self.catalog.load().await {
            Ok(count) => {
                info!(count, "server catalog refreshed");
                self.notifier.report_success(REFRESH_SUCCESS_MESSAGE);
                RefreshOutcome::Refreshed(count)
            }
            Err(e) => self.transport_failure(e),
        }
    }

    fn transport_failure(&self, e: ApiError) -> RefreshOutcome {
        warn!(error = %e, "server refresh failed");
        self.report_error(FETCH_SERVERS_ERROR_MESSAGE);
        RefreshOutcome::Transport(e)
    }

    fn report_error(&self, message: &str) {
        error!("{message}");
        self.notifier.report_error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::panel::{PanelView, REFRESH_IDLE_LABEL};
    use crate::infrastructure::api::mock::ScriptedBridgeApi;
    use crate::infrastructure::notify::mock::RecordingNotifier;
    use bridge_panel_core::{ActionResponse, DiscoveryMode, Endpoint, ServerEntry};

    struct Fixture {
        api: Arc<ScriptedBridgeApi>,
        notifier: Arc<RecordingNotifier>,
        panel: SharedPanel,
        refresher: CatalogRefresher,
    }

    fn fixture() -> Fixture {
        let api = Arc::new(ScriptedBridgeApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = PanelView::new(DiscoveryMode::Discovery, "");
        view.replace_catalog(vec![ServerEntry::new("Old", "10.0.0.1", 7777, 0)]);
        let panel = SharedPanel::new(view);
        let catalog = ServerCatalog::new(api.clone(), panel.clone());
        let refresher = CatalogRefresher::new(api.clone(), notifier.clone(), panel.clone(), catalog);
        Fixture {
            api,
            notifier,
            panel,
            refresher,
        }
    }

    #[tokio::test]
    async fn test_refresh_reloads_catalog_and_reports_success() {
        // Arrange
        let f = fixture();
        f.api.push_refresh(Ok(ActionResponse::ok()));
        f.api.push_servers(Ok(vec![
            ServerEntry::new("A", "1.2.3.4", 7777, 3),
            ServerEntry::new("B", "5.6.7.8", 7778, 0),
        ]));

        // Act
        let outcome = f.refresher.refresh().await;

        // Assert
        assert_eq!(outcome, RefreshOutcome::Refreshed(2));
        assert_eq!(f.api.calls(), vec![Endpoint::RefreshServers, Endpoint::Servers]);
        assert_eq!(f.notifier.successes(), vec![REFRESH_SUCCESS_MESSAGE.to_string()]);
        f.panel.read(|v| {
            assert_eq!(v.server_select.options.len(), 3);
            assert_eq!(v.refresh_button.label, REFRESH_IDLE_LABEL);
            assert!(!v.refresh_button.is_busy());
        });
    }

    #[tokio::test]
    async fn test_refused_refresh_keeps_previous_catalog() {
        // Arrange
        let f = fixture();
        f.api.push_refresh(Ok(ActionResponse::failed("scan failed")));

        // Act
        let outcome = f.refresher.refresh().await;

        // Assert
        assert_eq!(outcome, RefreshOutcome::Refused("scan failed".into()));
        assert_eq!(f.notifier.errors(), vec!["Failed to refresh: scan failed".to_string()]);
        assert!(f.notifier.successes().is_empty());
        assert_eq!(f.api.calls(), vec![Endpoint::RefreshServers]);
        f.panel.read(|v| {
            assert_eq!(v.catalog()[0].name, "Old");
            assert!(v.refresh_button.is_clickable());
        });
    }

    #[tokio::test]
    async fn test_transport_failure_reports_fetch_error() {
        let f = fixture();
        f.api.push_refresh(Err(ScriptedBridgeApi::transport_error("/api/refresh-servers")));

        let outcome = f.refresher.refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Transport(_)));
        assert_eq!(f.notifier.errors(), vec![FETCH_SERVERS_ERROR_MESSAGE.to_string()]);
        f.panel.read(|v| assert_eq!(v.refresh_button.label, REFRESH_IDLE_LABEL));
    }

    #[tokio::test]
    async fn test_failed_reload_after_rescan_is_blocking() {
        // Arrange
        let f = fixture();
        f.api.push_refresh(Ok(ActionResponse::ok()));
        f.api.push_servers(Err(ScriptedBridgeApi::decode_error("/api/servers")));

        // Act
        let outcome = f.refresher.refresh().await;

        // Assert
        assert!(matches!(outcome, RefreshOutcome::Transport(_)));
        assert_eq!(f.notifier.errors(), vec![FETCH_SERVERS_ERROR_MESSAGE.to_string()]);
        assert!(f.notifier.successes().is_empty());
        f.panel.read(|v| assert_eq!(v.catalog()[0].name, "Old"));
    }

    #[tokio::test]
    async fn test_refresh_while_busy_is_ignored() {
        let f = fixture();
        let _held = f.panel.busy(Button::Refresh, LOADING_LABEL);

        assert_eq!(f.refresher.refresh().await, RefreshOutcome::Ignored);
        assert!(f.api.calls().is_empty());
    }
}
