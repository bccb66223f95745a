//! reqwest-backed implementation of [`BridgeApi`].
//!
//! # Request handling (for beginners)
//!
//! Every endpoint goes through [`HttpBridgeApi::send`]:
//!
//! 1. Build `{base_url}{path}` and the GET/POST request (JSON body for start).
//! 2. Send it.  Connection refused, DNS failure, timeout → [`ApiError::Transport`].
//! 3. Read the body and decode it as JSON.  Anything that is not the expected
//!    shape → [`ApiError::Decode`].
//!
//! The HTTP status code is not inspected: a `500` whose body is
//! `{"success": false, "error": "..."}` is a perfectly good application
//! failure, and the server's text reaches the operator verbatim.

pub mod mock;

use std::time::Duration;

use async_trait::async_trait;
use bridge_panel_core::protocol::routes::Method;
use bridge_panel_core::{ActionResponse, BridgeStatus, Endpoint, ServerEntry, StartRequest};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::application::bridge_api::{ApiError, BridgeApi};

/// Failure to construct an [`HttpBridgeApi`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid control API URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Talks to the control server over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpBridgeApi {
    client: Client,
    base_url: Url,
}

impl HttpBridgeApi {
    /// Builds a client for the control server at `base_url` with a per-request
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidBaseUrl`] unless `base_url` is an absolute
    /// `http`/`https` URL; [`ClientError::Build`] if the TLS backend fails to
    /// initialise.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of `endpoint`.  A path prefix on the base URL is kept.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.path()
        )
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&StartRequest>,
    ) -> Result<T, ApiError> {
        let path = endpoint.path();
        let url = self.url(endpoint);
        let request = match endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        debug!(%url, "control API request");
        let response = request.send().await.map_err(|e| ApiError::Transport {
            path,
            message: e.to_string(),
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport {
            path,
            message: e.to_string(),
        })?;
        debug!(%url, %status, len = bytes.len(), "control API response");

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            path,
            message: format!("HTTP {status}: {e}"),
        })
    }
}

/// Parses and checks the control server root URL.
///
/// # Errors
///
/// [`ClientError::InvalidBaseUrl`] for unparsable or non-HTTP URLs.
pub fn parse_base_url(input: &str) -> Result<Url, ClientError> {
    let invalid = |message: String| ClientError::InvalidBaseUrl {
        url: input.to_string(),
        message,
    };
    let url = Url::parse(input.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[async_trait]
impl BridgeApi for HttpBridgeApi {
    async fn status(&self) -> Result<BridgeStatus, ApiError> {
        self.send(Endpoint::Status, None).await
    }

    async fn servers(&self) -> Result<Vec<ServerEntry>, ApiError> {
        // `null` is an empty catalog.
        let entries: Option<Vec<ServerEntry>> = self.send(Endpoint::Servers, None).await?;
        Ok(entries.unwrap_or_default())
    }

    async fn start(&self, request: &StartRequest) -> Result<ActionResponse, ApiError> {
        self.send(Endpoint::Start, Some(request)).await
    }

    async fn stop(&self) -> Result<ActionResponse, ApiError> {
        self.send(Endpoint::Stop, None).await
    }

    async fn refresh_servers(&self) -> Result<ActionResponse, ApiError> {
        self.send(Endpoint::RefreshServers, None).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api_for(server: &MockServer) -> HttpBridgeApi {
        HttpBridgeApi::new(&server.base_url(), Duration::from_secs(2)).expect("client")
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let api = HttpBridgeApi::new("http://localhost:8081", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url(Endpoint::Status), "http://localhost:8081/api/status");

        let prefixed = HttpBridgeApi::new("http://host/bridge/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            prefixed.url(Endpoint::RefreshServers),
            "http://host/bridge/api/refresh-servers"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://localhost"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("https://panel.example").is_ok());
    }

    #[tokio::test]
    async fn test_status_decodes_response() {
        // Arrange
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"status": "Running", "running": true, "port": "25565"}));
        });

        // Act
        let status = api_for(&server).status().await.unwrap();

        // Assert
        mock.assert();
        assert!(status.running);
        assert_eq!(status.status, "Running");
        assert_eq!(status.port(), Some("25565"));
    }

    #[tokio::test]
    async fn test_status_with_missing_fields_defaults() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(200).json_body(json!({}));
        });

        let status = api_for(&server).status().await.unwrap();

        assert!(!status.running);
        assert_eq!(status.status, "");
    }

    #[tokio::test]
    async fn test_servers_decodes_catalog() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/servers");
            then.status(200).json_body(json!([
                {"name": "A", "host": "1.2.3.4", "port": 7777, "players": 3,
                 "version": "1.21", "zone": "eu", "site": "x", "clientsite": "y"}
            ]));
        });

        let servers = api_for(&server).servers().await.unwrap();

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].target(), "1.2.3.4:7777");
        assert_eq!(servers[0].client_site.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_odd_entry_does_not_hide_the_rest_of_the_catalog() {
        // Arrange: a negative player count and an out-of-range port
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/servers");
            then.status(200).json_body(json!([
                {"name": "A", "host": "1.2.3.4", "port": 7777, "players": 3},
                {"name": "B", "host": "5.6.7.8", "port": 70000, "players": -1}
            ]));
        });

        // Act
        let servers = api_for(&server).servers().await.unwrap();

        // Assert
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].label(), "A (3 players) - 1.2.3.4:7777");
        assert_eq!(servers[1].label(), "B (-1 players) - 5.6.7.8:70000");
    }

    #[tokio::test]
    async fn test_null_server_list_is_empty() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/servers");
            then.status(200).body("null");
        });

        let servers = api_for(&server).servers().await.unwrap();

        assert!(servers.is_empty());
    }

    #[tokio::test]
    async fn test_start_posts_port_and_server() {
        // Arrange
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/start")
                .json_body(json!({"port": 25565, "server": "1.2.3.4:7777"}));
            then.status(200).json_body(json!({"success": true}));
        });
        let request = StartRequest {
            port: 25565,
            server: "1.2.3.4:7777".into(),
        };

        // Act
        let response = api_for(&server).start(&request).await.unwrap();

        // Assert
        mock.assert();
        assert_eq!(response, ActionResponse::ok());
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_application_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/refresh-servers");
            then.status(500)
                .json_body(json!({"success": false, "error": "scan failed"}));
        });

        let response = api_for(&server).refresh_servers().await.unwrap();

        assert_eq!(response.into_result(), Err("scan failed".to_string()));
    }

    #[tokio::test]
    async fn test_stop_posts_without_body() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/stop");
            then.status(200).json_body(json!({"success": true}));
        });

        let response = api_for(&server).stop().await.unwrap();

        mock.assert();
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_html_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(502).body("<html>Bad Gateway</html>");
        });

        let err = api_for(&server).status().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode { path: "/api/status", .. }));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is not served by anything in CI.
        let api = HttpBridgeApi::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = api.stop().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport { path: "/api/stop", .. }));
    }
}
