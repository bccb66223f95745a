//! Plain-text rendering of the panel.
//!
//! Hidden controls are not drawn.  Disabled controls carry a `(locked)` tag
//! and busy buttons show their busy label, so the terminal shows the same
//! state a page would.

use std::fmt::Write;

use bridge_panel_core::{ControlState, ServerEntry};

use crate::application::panel::{ButtonState, PanelView};

fn lock_tag(control: ControlState) -> &'static str {
    if control.enabled {
        ""
    } else {
        " (locked)"
    }
}

fn button(state: &ButtonState) -> Option<String> {
    state
        .control
        .visible
        .then(|| format!("[{}]{}", state.label, lock_tag(state.control)))
}

/// One-line status: label, tone, and the bridge port when reported.
pub fn render_status(view: &PanelView) -> String {
    let port = view
        .status()
        .and_then(|s| s.port())
        .map(|p| format!(" on port {p}"))
        .unwrap_or_default();
    format!("{} [{}]{port}", view.status_label, view.tone.as_str())
}

/// Renders the whole panel as a multi-line block.
pub fn render_panel(view: &PanelView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bridge: {}", render_status(view));

    if view.port_input.control.visible {
        let _ = writeln!(
            out,
            "Port:   {}{}",
            display_value(&view.port_input.value),
            lock_tag(view.port_input.control)
        );
    }

    let mode = if view.discovery.checked { "discovery" } else { "manual" };
    let _ = writeln!(out, "Mode:   {mode}{}", lock_tag(view.discovery.control));

    if view.server_select.control.visible {
        let _ = writeln!(out, "Servers:{}", lock_tag(view.server_select.control));
        for (index, option) in view.server_select.options.iter().enumerate() {
            let marker = if index == view.server_select.selected { '>' } else { ' ' };
            let _ = writeln!(out, "  {marker} {index:>2}. {}", option.label);
        }
    }
    if view.manual_server.control.visible {
        let _ = writeln!(
            out,
            "Server: {}{}",
            display_value(&view.manual_server.value),
            lock_tag(view.manual_server.control)
        );
    }
    let _ = writeln!(out, "Target: {}", display_value(view.target()));

    let buttons: Vec<String> = [&view.start_button, &view.stop_button, &view.refresh_button]
        .into_iter()
        .filter_map(button)
        .collect();
    let _ = write!(out, "{}", buttons.join(" "));
    out
}

/// Renders a catalog as a numbered list.  Numbers match the select option
/// indices, so `1` is the first server.
pub fn render_catalog(entries: &[ServerEntry]) -> String {
    if entries.is_empty() {
        return "No servers found".to_string();
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = write!(out, "{:>3}. {}", i + 1, entry.label());
        let extra: Vec<&str> = [entry.version.as_deref(), entry.zone.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if !extra.is_empty() {
            let _ = write!(out, " [{}]", extra.join(", "));
        }
        out.push('\n');
    }
    out
}

fn display_value(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_panel_core::{BridgeStatus, DiscoveryMode};

    #[test]
    fn test_running_panel_hides_start_and_locks_inputs() {
        // Arrange
        let mut view = PanelView::new(DiscoveryMode::Discovery, "25565");
        let mut status = BridgeStatus::new("Running", true);
        status.port = Some("25565".into());
        view.apply_status(0, status);

        // Act
        let text = render_panel(&view);

        // Assert
        assert!(text.starts_with("Bridge: Running [running] on port 25565"));
        assert!(text.contains("Port:   25565 (locked)"));
        assert!(text.contains("[Stop Bridge]"));
        assert!(!text.contains("[Start Bridge]"));
    }

    #[test]
    fn test_stopped_panel_lists_catalog_with_selection_marker() {
        let mut view = PanelView::new(DiscoveryMode::Discovery, "");
        view.apply_status(0, BridgeStatus::new("Bridge Stopped", false));
        view.replace_catalog(vec![ServerEntry::new("A", "1.2.3.4", 7777, 3)]);
        view.select_option(1).unwrap();

        let text = render_panel(&view);

        assert!(text.contains(">  1. A (3 players) - 1.2.3.4:7777"));
        assert!(text.contains("Target: 1.2.3.4:7777"));
        assert!(text.contains("[Start Bridge] [Refresh Servers]"));
        assert!(!text.contains("Server: "));
    }

    #[test]
    fn test_manual_mode_shows_manual_field() {
        let mut view = PanelView::new(DiscoveryMode::Manual, "");
        view.apply_status(0, BridgeStatus::new("Bridge Stopped", false));

        let text = render_panel(&view);

        assert!(text.contains("Mode:   manual"));
        assert!(text.contains("Server: -"));
        assert!(!text.contains("Servers:"));
    }

    #[test]
    fn test_catalog_listing_is_one_based() {
        let mut b = ServerEntry::new("B", "5.6.7.8", 7778, 0);
        b.version = Some("1.21".into());
        let text = render_catalog(&[ServerEntry::new("A", "1.2.3.4", 7777, 3), b]);

        assert_eq!(
            text,
            "  1. A (3 players) - 1.2.3.4:7777\n  2. B (0 players) - 5.6.7.8:7778 [1.21]\n"
        );
        assert_eq!(render_catalog(&[]), "No servers found");
    }
}
