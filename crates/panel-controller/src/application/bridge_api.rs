//! The control API seam.
//!
//! The application layer talks to the control server only through
//! [`BridgeApi`].  The production implementation
//! (`infrastructure::api::HttpBridgeApi`) uses reqwest; tests use
//! `infrastructure::api::mock::ScriptedBridgeApi`.

use async_trait::async_trait;
use bridge_panel_core::{ActionResponse, BridgeStatus, ServerEntry, StartRequest};
use thiserror::Error;

/// A request that could not produce a decodable response.
///
/// Application-level failures (`{"success": false}`) are *not* errors at this
/// layer: they arrive as an `Ok(ActionResponse)` and the caller decides how
/// to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed mid-flight.
    #[error("request to {path} failed: {message}")]
    Transport { path: &'static str, message: String },

    /// The server answered but the body was not the expected JSON shape.
    #[error("response from {path} could not be decoded: {message}")]
    Decode { path: &'static str, message: String },
}

impl ApiError {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Transport { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}

/// The five endpoints of the control API.
///
/// Implementations must be cheap to share (`Arc<dyn BridgeApi>`) and safe to
/// call concurrently: the status poller and a lifecycle action can have
/// requests in flight at the same time.
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// `GET /api/status`
    async fn status(&self) -> Result<BridgeStatus, ApiError>;

    /// `GET /api/servers`
    async fn servers(&self) -> Result<Vec<ServerEntry>, ApiError>;

    /// `POST /api/start` with `{port, server}`
    async fn start(&self, request: &StartRequest) -> Result<ActionResponse, ApiError>;

    /// `POST /api/stop`
    async fn stop(&self) -> Result<ActionResponse, ApiError>;

    /// `POST /api/refresh-servers`
    async fn refresh_servers(&self) -> Result<ActionResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_reports_its_path() {
        let err = ApiError::Decode {
            path: "/api/status",
            message: "expected value".to_string(),
        };
        assert_eq!(err.path(), "/api/status");
        assert!(err.to_string().contains("could not be decoded"));
    }
}
