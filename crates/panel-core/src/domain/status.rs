//! Bridge status snapshot.
//!
//! The bridge lifecycle is owned by the remote control server.  The panel only
//! ever holds the *last applied* [`BridgeStatus`]; it is replaced wholesale on
//! every successful poll and never mutated locally.

use serde::{Deserialize, Serialize};

/// Status reported by `GET /api/status`.
///
/// Every field carries `#[serde(default)]` because the API contract treats an
/// absent field as falsy/empty: `{}` decodes to a stopped bridge with an empty
/// label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStatus {
    /// Human-readable status label, e.g. `"Bridge Running - ws://localhost:8080"`.
    #[serde(default)]
    pub status: String,
    /// Whether the bridge process is currently running.
    #[serde(default)]
    pub running: bool,
    /// Listening port of the running bridge.  The server sends `""` while
    /// stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl BridgeStatus {
    /// Creates a snapshot with the given label and running flag.
    pub fn new(status: impl Into<String>, running: bool) -> Self {
        Self {
            status: status.into(),
            running,
            port: None,
        }
    }

    /// Returns the bridge port, treating an empty string as absent.
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref().filter(|p| !p.is_empty())
    }

    /// Visual tone of the status label.
    pub fn tone(&self) -> StatusTone {
        StatusTone::from_running(self.running)
    }
}

/// Colour class of the status label.
///
/// `Unknown` is only used before the first successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Unknown,
    Running,
    Stopped,
}

impl StatusTone {
    pub fn from_running(running: bool) -> Self {
        if running {
            Self::Running
        } else {
            Self::Stopped
        }
    }

    /// Short lowercase name, suitable for a CSS class or a terminal tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}
