//! Endpoint table of the control API.

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// The five endpoints consumed by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /api/status` – polled on every tick.
    Status,
    /// `GET /api/servers` – catalog source.
    Servers,
    /// `POST /api/start` – body `{port, server}`.
    Start,
    /// `POST /api/stop` – no body.
    Stop,
    /// `POST /api/refresh-servers` – triggers a server-side rescan.
    RefreshServers,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Status,
        Endpoint::Servers,
        Endpoint::Start,
        Endpoint::Stop,
        Endpoint::RefreshServers,
    ];

    /// Path relative to the control server root.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Status => "/api/status",
            Self::Servers => "/api/servers",
            Self::Start => "/api/start",
            Self::Stop => "/api/stop",
            Self::RefreshServers => "/api/refresh-servers",
        }
    }

    pub const fn method(self) -> Method {
        match self {
            Self::Status | Self::Servers => Method::Get,
            Self::Start | Self::Stop | Self::RefreshServers => Method::Post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted_under_api() {
        for endpoint in Endpoint::ALL {
            assert!(endpoint.path().starts_with("/api/"), "{endpoint:?}");
        }
    }

    #[test]
    fn test_only_reads_use_get() {
        assert_eq!(Endpoint::Status.method(), Method::Get);
        assert_eq!(Endpoint::Servers.method(), Method::Get);
        assert_eq!(Endpoint::Start.method(), Method::Post);
        assert_eq!(Endpoint::Stop.method(), Method::Post);
        assert_eq!(Endpoint::RefreshServers.method(), Method::Post);
    }

    #[test]
    fn test_refresh_path_uses_hyphen() {
        assert_eq!(Endpoint::RefreshServers.path(), "/api/refresh-servers");
    }
}
