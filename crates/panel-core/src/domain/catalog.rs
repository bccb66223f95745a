//! Server catalog: discoverable game servers and their select-box options.
//!
//! The catalog is replaced wholesale on every load.  There is no incremental
//! diffing and no identity carried between loads: two loads that return the
//! same servers produce equal but unrelated `Vec`s.

use serde::{Deserialize, Serialize};

/// Label of the synthetic "no selection" option that always heads the list.
pub const PLACEHOLDER_LABEL: &str = "Select a server...";

/// One discoverable game server, as returned by `GET /api/servers`.
///
/// Only `name`, `host`, `port`, and `players` take part in rendering; the
/// remaining descriptive fields are carried through when the server list
/// provides them.
///
/// `port` and `players` are plain signed integers on the wire and are shown
/// as received, so one odd entry (a negative player count, say) never makes
/// the whole list undecodable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub players: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, rename = "clientsite", skip_serializing_if = "Option::is_none")]
    pub client_site: Option<String>,
}

impl ServerEntry {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: i64, players: i64) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            players,
            ..Self::default()
        }
    }

    /// The `"host:port"` target string sent to `POST /api/start`.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Display label: `"{name} ({players} players) - {host}:{port}"`.
    pub fn label(&self) -> String {
        format!("{} ({} players) - {}", self.name, self.players, self.target())
    }
}

/// One option of the catalog select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    pub label: String,
    /// `""` for the placeholder, `"host:port"` otherwise.
    pub value: String,
}

impl CatalogOption {
    pub fn placeholder() -> Self {
        Self {
            label: PLACEHOLDER_LABEL.to_string(),
            value: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&ServerEntry> for CatalogOption {
    fn from(entry: &ServerEntry) -> Self {
        Self {
            label: entry.label(),
            value: entry.target(),
        }
    }
}

/// Builds the full option list: the placeholder first, then one option per
/// entry in server order.
pub fn build_catalog_options(entries: &[ServerEntry]) -> Vec<CatalogOption> {
    std::iter::once(CatalogOption::placeholder())
        .chain(entries.iter().map(CatalogOption::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry_renders_placeholder_and_entry() {
        // Arrange
        let entries = vec![ServerEntry::new("A", "1.2.3.4", 7777, 3)];

        // Act
        let options = build_catalog_options(&entries);

        // Assert
        assert_eq!(options.len(), 2);
        assert!(options[0].is_placeholder());
        assert_eq!(options[0].label, PLACEHOLDER_LABEL);
        assert_eq!(options[1].label, "A (3 players) - 1.2.3.4:7777");
        assert_eq!(options[1].value, "1.2.3.4:7777");
    }

    #[test]
    fn test_empty_catalog_still_has_placeholder() {
        let options = build_catalog_options(&[]);
        assert_eq!(options, vec![CatalogOption::placeholder()]);
    }

    #[test]
    fn test_options_preserve_server_order() {
        let entries = vec![
            ServerEntry::new("Zeta", "10.0.0.9", 8078, 0),
            ServerEntry::new("Alpha", "10.0.0.1", 8078, 12),
        ];
        let options = build_catalog_options(&entries);
        assert_eq!(options[1].value, "10.0.0.9:8078");
        assert_eq!(options[2].value, "10.0.0.1:8078");
    }

    #[test]
    fn test_entry_decodes_with_wire_field_names() {
        // Arrange: the upstream server list uses `clientsite` (no underscore).
        let body = r#"{"name":"EO Main","host":"game.example.org","port":8078,
            "version":"0.0.28","zone":"EU","players":41,
            "site":"https://example.org","clientsite":"https://example.org/client"}"#;

        // Act
        let entry: ServerEntry = serde_json::from_str(body).unwrap();

        // Assert
        assert_eq!(entry.players, 41);
        assert_eq!(entry.zone.as_deref(), Some("EU"));
        assert_eq!(entry.client_site.as_deref(), Some("https://example.org/client"));
        assert_eq!(entry.target(), "game.example.org:8078");
    }

    #[test]
    fn test_entry_keeps_values_outside_port_and_count_ranges() {
        let entry: ServerEntry =
            serde_json::from_str(r#"{"name":"B","host":"h","port":70000,"players":-1}"#).unwrap();

        assert_eq!(entry.port, 70000);
        assert_eq!(entry.players, -1);
        assert_eq!(entry.target(), "h:70000");
    }

    #[test]
    fn test_entry_missing_fields_default_to_empty() {
        let entry: ServerEntry = serde_json::from_str(r#"{"host":"h"}"#).unwrap();
        assert_eq!(entry.name, "");
        assert_eq!(entry.port, 0);
        assert_eq!(entry.players, 0);
        assert_eq!(entry.label(), " (0 players) - h:0");
    }
}
