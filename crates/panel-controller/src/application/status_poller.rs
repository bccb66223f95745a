//! Periodic bridge status polling.
//!
//! # How a poll works (for beginners)
//!
//! 1. Ask the panel for the next sequence number *before* sending the
//!    request.  The panel both issues and checks the numbers, so every
//!    poller sharing it draws from one sequence.
//! 2. `GET /api/status`.
//! 3. Lock the panel and ask its [`LatestWins`](bridge_panel_core::LatestWins)
//!    gate whether this sequence number is newer than the last applied one.
//!    If so, replace the snapshot and re-project every control.
//!
//! Because step 1 happens before the request, two polls racing each other
//! (the scheduled tick and the refresh forced after a start) can finish in
//! either order and the panel still ends up showing the newest answer.
//!
//! Failures are logged at `warn` and otherwise ignored: the previous snapshot
//! stays on screen and the next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::bridge_api::BridgeApi;
use super::panel::SharedPanel;

/// What a single [`StatusPoller::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The status was applied to the panel.
    Applied { running: bool },
    /// A newer poll had already been applied; this result was discarded.
    Stale,
    /// The request failed; the panel is unchanged.
    Failed,
}

/// Fetches status and applies it to the panel.
#[derive(Clone)]
pub struct StatusPoller {
    api: Arc<dyn BridgeApi>,
    panel: SharedPanel,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn BridgeApi>, panel: SharedPanel) -> Self {
        Self { api, panel }
    }

    /// Runs exactly one poll.
    pub async fn tick(&self) -> PollOutcome {
        let seq = self.panel.update(|view| view.next_status_seq());
        let status = match self.api.status().await {
            Ok(status) => status,
            Err(e) => {
                warn!(seq, error = %e, "status poll failed");
                return PollOutcome::Failed;
            }
        };

        let running = status.running;
        let (applied, changed) = self.panel.update(|view| {
            let previous = view.status().cloned();
            let applied = view.apply_status(seq, status);
            (applied, applied && previous.as_ref() != view.status())
        });

        if !applied {
            return PollOutcome::Stale;
        }
        if changed {
            info!(seq, running, "bridge status changed");
        } else {
            debug!(seq, running, "bridge status unchanged");
        }
        PollOutcome::Applied { running }
    }

    /// Polls every `period` until `shutdown` flips to `true` (or its sender
    /// is dropped).
    ///
    /// The first tick fires one period after the call; the initial load has
    /// already fetched status by then.  Each tick runs as its own task so a
    /// slow request never delays the schedule.  On shutdown every tick still
    /// in flight is aborted before this returns, so nothing reaches the panel
    /// once polling has stopped.
    pub async fn run(self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();
        info!(period_ms = period.as_millis() as u64, "status polling started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let poller = self.clone();
                    in_flight.spawn(async move { poller.tick().await });
                }
                Some(done) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = done {
                        warn!(error = %e, "status poll task ended abnormally");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        let aborted = in_flight.len();
        in_flight.shutdown().await;
        info!(aborted, "status polling stopped");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
