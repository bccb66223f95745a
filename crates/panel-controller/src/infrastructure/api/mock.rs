//! Scripted [`BridgeApi`] for tests.
//!
//! Each endpoint has a FIFO of canned replies.  Every call is recorded so
//! tests can assert on the order of requests and on the start payloads.
//! An endpoint with no reply queued answers with a transport error.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bridge_panel_core::{ActionResponse, BridgeStatus, Endpoint, ServerEntry, StartRequest};
use tokio::sync::oneshot;

use crate::application::bridge_api::{ApiError, BridgeApi};

enum StatusReply {
    Ready(Result<BridgeStatus, ApiError>),
    Held(oneshot::Receiver<()>, BridgeStatus),
}

#[derive(Default)]
struct Script {
    statuses: VecDeque<StatusReply>,
    servers: VecDeque<Result<Vec<ServerEntry>, ApiError>>,
    starts: VecDeque<Result<ActionResponse, ApiError>>,
    stops: VecDeque<Result<ActionResponse, ApiError>>,
    refreshes: VecDeque<Result<ActionResponse, ApiError>>,
    calls: Vec<Endpoint>,
    start_requests: Vec<StartRequest>,
}

/// A fake control server driven by queued replies.
#[derive(Default)]
pub struct ScriptedBridgeApi {
    script: Mutex<Script>,
}

/// A status reply that stays in flight until [`release`](Self::release)d.
pub struct HeldStatus {
    release: oneshot::Sender<()>,
}

impl HeldStatus {
    pub fn release(self) {
        // The request may already have been dropped; nothing to do then.
        let _ = self.release.send(());
    }
}

impl ScriptedBridgeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transport_error(path: &'static str) -> ApiError {
        ApiError::Transport {
            path,
            message: "connection refused".to_string(),
        }
    }

    pub fn decode_error(path: &'static str) -> ApiError {
        ApiError::Decode {
            path,
            message: "expected value at line 1 column 1".to_string(),
        }
    }

    pub fn push_status(&self, reply: Result<BridgeStatus, ApiError>) {
        self.lock().statuses.push_back(StatusReply::Ready(reply));
    }

    /// Queues a status reply that does not complete until released.
    pub fn hold_next_status(&self, status: BridgeStatus) -> HeldStatus {
        let (tx, rx) = oneshot::channel();
        self.lock().statuses.push_back(StatusReply::Held(rx, status));
        HeldStatus { release: tx }
    }

    pub fn push_servers(&self, reply: Result<Vec<ServerEntry>, ApiError>) {
        self.lock().servers.push_back(reply);
    }

    pub fn push_start(&self, reply: Result<ActionResponse, ApiError>) {
        self.lock().starts.push_back(reply);
    }

    pub fn push_stop(&self, reply: Result<ActionResponse, ApiError>) {
        self.lock().stops.push_back(reply);
    }

    pub fn push_refresh(&self, reply: Result<ActionResponse, ApiError>) {
        self.lock().refreshes.push_back(reply);
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<Endpoint> {
        self.lock().calls.clone()
    }

    pub fn status_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|e| **e == Endpoint::Status)
            .count()
    }

    /// Payloads of every start call, in order.
    pub fn start_requests(&self) -> Vec<StartRequest> {
        self.lock().start_requests.clone()
    }

    fn unscripted(endpoint: Endpoint) -> ApiError {
        ApiError::Transport {
            path: endpoint.path(),
            message: "no scripted reply".to_string(),
        }
    }

    fn next_action(
        &self,
        endpoint: Endpoint,
        pick: impl FnOnce(&mut Script) -> Option<Result<ActionResponse, ApiError>>,
    ) -> Result<ActionResponse, ApiError> {
        let mut script = self.lock();
        script.calls.push(endpoint);
        pick(&mut script).unwrap_or_else(|| Err(Self::unscripted(endpoint)))
    }
}

#[async_trait]
impl BridgeApi for ScriptedBridgeApi {
    async fn status(&self) -> Result<BridgeStatus, ApiError> {
        let reply = {
            let mut script = self.lock();
            script.calls.push(Endpoint::Status);
            script.statuses.pop_front()
        };
        match reply {
            Some(StatusReply::Ready(reply)) => reply,
            Some(StatusReply::Held(gate, status)) => {
                let _ = gate.await;
                Ok(status)
            }
            None => Err(Self::unscripted(Endpoint::Status)),
        }
    }

    async fn servers(&self) -> Result<Vec<ServerEntry>, ApiError> {
        let mut script = self.lock();
        script.calls.push(Endpoint::Servers);
        script
            .servers
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted(Endpoint::Servers)))
    }

    async fn start(&self, request: &StartRequest) -> Result<ActionResponse, ApiError> {
        self.lock().start_requests.push(request.clone());
        self.next_action(Endpoint::Start, |s| s.starts.pop_front())
    }

    async fn stop(&self) -> Result<ActionResponse, ApiError> {
        self.next_action(Endpoint::Stop, |s| s.stops.pop_front())
    }

    async fn refresh_servers(&self) -> Result<ActionResponse, ApiError> {
        self.next_action(Endpoint::RefreshServers, |s| s.refreshes.pop_front())
    }
}
