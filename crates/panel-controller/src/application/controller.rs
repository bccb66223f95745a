//! The panel controller: owns the view and wires every component to it.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//! PanelController::new(api, notifier, settings)
//!        │
//! initialize()        one status poll, then one catalog load
//!        │
//! spawn_poller()      background task ticking every poll_interval
//!        │                    ▲
//! start()/stop()/refresh()    │ forced status poll after start/stop
//!        │
//! PollerHandle::stop() / drop
//! ```
//!
//! Every component shares the same [`SharedPanel`], which issues and checks
//! status sequence numbers, so a forced refresh and a scheduled tick are
//! ordered against each other.

use std::sync::Arc;
use std::time::Duration;

use bridge_panel_core::DiscoveryMode;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::bridge_api::{ApiError, BridgeApi};
use super::catalog_refresher::{CatalogRefresher, RefreshOutcome};
use super::discovery_switch::DiscoveryModeSwitch;
use super::lifecycle::{LifecycleController, OperationOutcome};
use super::notify::Notifier;
use super::panel::{ControlError, PanelView, SharedPanel};
use super::server_catalog::ServerCatalog;
use super::status_poller::{PollOutcome, StatusPoller};

/// Default poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Start-up values for the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    pub poll_interval: Duration,
    pub initial_mode: DiscoveryMode,
    /// Text pre-filled in the port input.
    pub initial_port: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_mode: DiscoveryMode::Discovery,
            initial_port: String::new(),
        }
    }
}

/// Result of [`PanelController::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialLoad {
    pub status: PollOutcome,
    pub catalog: Result<usize, ApiError>,
}

/// The wired-up control panel.
pub struct PanelController {
    panel: SharedPanel,
    poller: StatusPoller,
    catalog: ServerCatalog,
    switch: DiscoveryModeSwitch,
    lifecycle: LifecycleController,
    refresher: CatalogRefresher,
    poll_interval: Duration,
}

impl PanelController {
    pub fn new(api: Arc<dyn BridgeApi>, notifier: Arc<dyn Notifier>, settings: PanelSettings) -> Self {
        let panel = SharedPanel::new(PanelView::new(settings.initial_mode, settings.initial_port));
        let poller = StatusPoller::new(api.clone(), panel.clone());
        let catalog = ServerCatalog::new(api.clone(), panel.clone());
        let switch = DiscoveryModeSwitch::new(panel.clone());
        let lifecycle =
            LifecycleController::new(api.clone(), notifier.clone(), panel.clone(), poller.clone());
        let refresher = CatalogRefresher::new(api, notifier, panel.clone(), catalog.clone());

        Self {
            panel,
            poller,
            catalog,
            switch,
            lifecycle,
            refresher,
            poll_interval: settings.poll_interval,
        }
    }

    /// Initial load: one status poll, then one catalog load.  Failures are
    /// logged by the components and returned here; neither is reported to
    /// the operator.
    pub async fn initialize(&self) -> InitialLoad {
        let status = self.poller.tick().await;
        let catalog = self.catalog.load().await;
        info!(?status, servers = ?catalog.as_ref().ok(), "panel initialised");
        InitialLoad { status, catalog }
    }

    /// Spawns the periodic status poll.  Requires a tokio runtime.
    pub fn spawn_poller(&self) -> PollerHandle {
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(self.poller.clone().run(self.poll_interval, rx));
        PollerHandle {
            shutdown,
            task: Some(task),
        }
    }

    pub fn panel(&self) -> &SharedPanel {
        &self.panel
    }

    /// A copy of the current view.
    pub fn snapshot(&self) -> PanelView {
        self.panel.snapshot()
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    pub fn catalog(&self) -> &ServerCatalog {
        &self.catalog
    }

    pub fn switch(&self) -> &DiscoveryModeSwitch {
        &self.switch
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn refresher(&self) -> &CatalogRefresher {
        &self.refresher
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    // ── Operator actions ──────────────────────────────────────────────────────

    pub fn enter_port(&self, text: &str) -> Result<(), ControlError> {
        self.panel.update(|view| view.enter_port(text))
    }

    pub fn set_discovery(&self, checked: bool) -> Result<DiscoveryMode, ControlError> {
        self.switch.set_discovery(checked)
    }

    pub fn select_server(&self, index: usize) -> Result<Option<String>, ControlError> {
        self.switch.select_server(index)
    }

    pub fn enter_manual_server(&self, text: &str) -> Result<(), ControlError> {
        self.switch.enter_manual_server(text)
    }

    pub async fn start(&self) -> OperationOutcome {
        self.lifecycle.start().await
    }

    pub async fn stop(&self) -> OperationOutcome {
        self.lifecycle.stop().await
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresher.refresh().await
    }
}

/// Handle to the background poll task.  Dropping it stops polling.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signals the poll loop to exit after its current iteration.
    pub fn stop(&self) {
        // The loop also exits when the sender is dropped, so a send error
        // (receiver already gone) needs no handling.
        let _ = self.shutdown.send(true);
    }

    /// Stops the loop and waits for it to finish, including the abort of
    /// any poll still in flight.
    pub async fn join(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "status poll task ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
