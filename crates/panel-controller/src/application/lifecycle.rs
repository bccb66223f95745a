//! Start and stop.
//!
//! # Sequence of a start (for beginners)
//!
//! ```text
//! start button clickable?  ── no ──▶ Ignored
//!        │ yes
//! validate port + target   ── bad ─▶ report_error, Invalid      (no request)
//!        │ ok
//! busy guard "Starting..."
//! POST /api/start {port, server}
//!        ├─ success:true  ─▶ immediate status poll, Completed
//!        ├─ success:false ─▶ "Failed to start: {error}", Refused
//!        └─ transport     ─▶ "Network error occurred", Transport
//! guard dropped: idle label back, projection decides the flags
//! ```
//!
//! Stop is the same without the validation step.

use std::future::Future;
use std::sync::Arc;

use bridge_panel_core::{validate_start, ActionResponse, ValidationError};
use tracing::{debug, error, info, warn};

use super::bridge_api::{ApiError, BridgeApi};
use super::notify::Notifier;
use super::panel::{Button, SharedPanel};
use super::status_poller::StatusPoller;

pub const STARTING_LABEL: &str = "Starting...";
pub const STOPPING_LABEL: &str = "Stopping...";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// How a start or stop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The server accepted the request and status was refreshed.
    Completed,
    /// Local validation failed; nothing was sent.
    Invalid(ValidationError),
    /// The server answered `success: false` with this error text.
    Refused(String),
    /// The request did not complete.
    Transport(ApiError),
    /// The button was hidden, disabled, or busy; nothing was sent.
    Ignored,
}

impl OperationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Issues start/stop requests and manages the busy state of their buttons.
#[derive(Clone)]
pub struct LifecycleController {
    api: Arc<dyn BridgeApi>,
    notifier: Arc<dyn Notifier>,
    panel: SharedPanel,
    poller: StatusPoller,
}

impl LifecycleController {
    pub fn new(
        api: Arc<dyn BridgeApi>,
        notifier: Arc<dyn Notifier>,
        panel: SharedPanel,
        poller: StatusPoller,
    ) -> Self {
        Self {
            api,
            notifier,
            panel,
            poller,
        }
    }

    /// Starts the bridge with the port input and the manual server field.
    pub async fn start(&self) -> OperationOutcome {
        let (clickable, port_text, target_text) = self.panel.read(|v| {
            (
                v.start_button.is_clickable(),
                v.port_input.value.clone(),
                v.target().to_string(),
            )
        });
        if !clickable {
            debug!("start ignored: button not clickable");
            return OperationOutcome::Ignored;
        }

        let request = match validate_start(&port_text, &target_text) {
            Ok(request) => request,
            Err(e) => {
                self.report(&e.to_string());
                return OperationOutcome::Invalid(e);
            }
        };

        debug!(port = request.port, server = %request.server, "start request validated");
        self.perform(Button::Start, STARTING_LABEL, "start", self.api.start(&request))
            .await
    }

    /// Stops the bridge.
    pub async fn stop(&self) -> OperationOutcome {
        self.perform(Button::Stop, STOPPING_LABEL, "stop", self.api.stop())
            .await
    }

    async fn perform(
        &self,
        button: Button,
        busy_label: &str,
        verb: &str,
        call: impl Future<Output = Result<ActionResponse, ApiError>>,
    ) -> OperationOutcome {
        let Some(_busy) = self.panel.busy(button, busy_label) else {
            debug!(?button, "{verb} ignored: button not clickable");
            return OperationOutcome::Ignored;
        };
        info!(action = verb, "sending bridge {verb} request");

        match call.await {
            Ok(response) => match response.into_result() {
                Ok(()) => {
                    info!("bridge {verb} accepted");
                    self.poller.tick().await;
                    OperationOutcome::Completed
                }
                Err(message) => {
                    self.report(&format!("Failed to {verb}: {message}"));
                    OperationOutcome::Refused(message)
                }
            },
            Err(e) => {
                warn!(error = %e, "bridge {verb} request failed");
                self.report(NETWORK_ERROR_MESSAGE);
                OperationOutcome::Transport(e)
            }
        }
    }

    fn report(&self, message: &str) {
        error!("{message}");
        self.notifier.report_error(message);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
