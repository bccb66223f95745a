//! Discovery / manual target selection.
//!
//! The checkbox chooses which target input is live: the catalog select
//! (discovery) or the free-text field (manual).  Whatever the operator picks
//! in the catalog is copied into the manual field, which is the one the
//! start action reads.  The copy is one-directional.

use bridge_panel_core::DiscoveryMode;
use tracing::debug;

use super::panel::{ControlError, SharedPanel};

/// Mode switch and target inputs.  All operations fail with
/// [`ControlError::Locked`] while the corresponding control is disabled,
/// which is always the case while the bridge is running.
#[derive(Clone)]
pub struct DiscoveryModeSwitch {
    panel: SharedPanel,
}

impl DiscoveryModeSwitch {
    pub fn new(panel: SharedPanel) -> Self {
        Self { panel }
    }

    /// Ticks (`true`) or clears (`false`) the discovery checkbox.
    pub fn set_discovery(&self, checked: bool) -> Result<DiscoveryMode, ControlError> {
        let mode = DiscoveryMode::from_checkbox(checked);
        self.panel.update(|view| view.set_mode(mode))?;
        debug!(?mode, "target mode switched");
        Ok(mode)
    }

    /// Picks catalog option `index` (0 is the placeholder).  Returns the
    /// target copied into the manual field, if any.
    pub fn select_server(&self, index: usize) -> Result<Option<String>, ControlError> {
        self.panel.update(|view| view.select_option(index))
    }

    /// Picks the catalog option whose value is `target` (`host:port`).
    pub fn select_target(&self, target: &str) -> Result<Option<String>, ControlError> {
        self.panel.update(|view| view.select_value(target))
    }

    /// Types `text` into the manual server field.
    pub fn enter_manual_server(&self, text: &str) -> Result<(), ControlError> {
        self.panel.update(|view| view.enter_manual_server(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::panel::PanelView;
    use bridge_panel_core::{BridgeStatus, ServerEntry};

    fn panel_with_catalog() -> SharedPanel {
        let mut view = PanelView::new(DiscoveryMode::Discovery, "8080");
        view.apply_status(0, BridgeStatus::new("Bridge Stopped", false));
        view.replace_catalog(vec![ServerEntry::new("A", "1.2.3.4", 7777, 3)]);
        SharedPanel::new(view)
    }

    #[test]
    fn test_switch_to_manual_swaps_visible_input() {
        // Arrange
        let panel = panel_with_catalog();
        let switch = DiscoveryModeSwitch::new(panel.clone());

        // Act
        let mode = switch.set_discovery(false).unwrap();

        // Assert
        assert_eq!(mode, DiscoveryMode::Manual);
        panel.read(|v| {
            assert!(v.manual_server.control.visible);
            assert!(v.manual_server.control.enabled);
            assert!(!v.server_select.control.visible);
            assert!(!v.server_select.control.enabled);
        });
    }

    #[test]
    fn test_switch_back_to_discovery() {
        let panel = panel_with_catalog();
        let switch = DiscoveryModeSwitch::new(panel.clone());
        switch.set_discovery(false).unwrap();

        switch.set_discovery(true).unwrap();

        panel.read(|v| {
            assert!(v.server_select.control.enabled);
            assert!(!v.manual_server.control.visible);
        });
    }

    #[test]
    fn test_selection_feeds_manual_field() {
        let panel = panel_with_catalog();
        let switch = DiscoveryModeSwitch::new(panel.clone());

        let picked = switch.select_target("1.2.3.4:7777").unwrap();

        assert_eq!(picked.as_deref(), Some("1.2.3.4:7777"));
        panel.read(|v| assert_eq!(v.target(), "1.2.3.4:7777"));
    }

    #[test]
    fn test_toggle_rejected_while_running() {
        // Arrange
        let panel = panel_with_catalog();
        panel.update(|v| v.apply_status(1, BridgeStatus::new("Running", true)));
        let switch = DiscoveryModeSwitch::new(panel.clone());

        // Act
        let result = switch.set_discovery(false);

        // Assert
        assert_eq!(result, Err(ControlError::Locked("discovery checkbox")));
        panel.read(|v| assert_eq!(v.mode(), DiscoveryMode::Discovery));
    }

    #[test]
    fn test_manual_entry_only_in_manual_mode() {
        let panel = panel_with_catalog();
        let switch = DiscoveryModeSwitch::new(panel.clone());
        assert!(switch.enter_manual_server("5.6.7.8:1").is_err());

        switch.set_discovery(false).unwrap();
        switch.enter_manual_server("5.6.7.8:1").unwrap();

        panel.read(|v| assert_eq!(v.target(), "5.6.7.8:1"));
    }
}
