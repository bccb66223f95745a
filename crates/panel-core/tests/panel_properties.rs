//! Integration tests for the bridge-panel core through its public API.
//!
//! These tests exercise the projection, validation, catalog building and
//! response sequencing together, the way the controller uses them.

use bridge_panel_core::{
    build_catalog_options, parse_port, project_ui_state, validate_start, ActionResponse,
    BridgeStatus, DiscoveryMode, LatestWins, ServerEntry, StartRequest,
    ValidationError, PLACEHOLDER_LABEL,
};
use serde_json::json;

const MODES: [DiscoveryMode; 2] = [DiscoveryMode::Discovery, DiscoveryMode::Manual];

#[test]
fn test_projection_holds_invariants_for_every_input() {
    for running in [false, true] {
        for mode in MODES {
            let ui = project_ui_state(running, mode);

            assert_eq!(ui.visible_lifecycle_buttons(), 1, "{running} {mode:?}");
            assert_eq!(ui.visible_target_inputs(), 1, "{running} {mode:?}");
            assert_eq!(ui.enabled_target_inputs(), usize::from(!running), "{running} {mode:?}");
            assert_eq!(ui, project_ui_state(running, mode), "projection must be pure");
        }
    }
}

#[test]
fn test_running_status_from_wire_disables_inputs() {
    // Arrange
    let status: BridgeStatus =
        serde_json::from_value(json!({"status": "Running", "running": true})).unwrap();

    // Act
    let ui = project_ui_state(status.running, DiscoveryMode::Discovery);

    // Assert
    assert!(!ui.port_input.enabled);
    assert!(!ui.discovery_toggle.enabled);
    assert!(!ui.server_select.enabled);
    assert!(!ui.manual_server.enabled);
    assert!(ui.stop_button.visible && ui.stop_button.enabled);
}

#[test]
fn test_port_bounds() {
    assert_eq!(parse_port("1"), Ok(1));
    assert_eq!(parse_port("65535"), Ok(65535));
    for bad in ["0", "65536", "abc", "", "-1", "8080.5"] {
        assert!(
            matches!(parse_port(bad), Err(ValidationError::InvalidPort(_))),
            "{bad:?} must be rejected"
        );
    }
}

#[test]
fn test_start_request_never_built_without_target() {
    assert_eq!(validate_start("25565", "  "), Err(ValidationError::EmptyTarget));
    assert_eq!(
        validate_start("25565", "1.2.3.4:7777"),
        Ok(StartRequest {
            port: 25565,
            server: "1.2.3.4:7777".to_string()
        })
    );
}

#[test]
fn test_catalog_from_wire_has_placeholder_first() {
    // Arrange
    let entries: Vec<ServerEntry> = serde_json::from_value(json!([
        {"name": "A", "host": "1.2.3.4", "port": 7777, "players": 3}
    ]))
    .unwrap();

    // Act
    let options = build_catalog_options(&entries);

    // Assert
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].label, PLACEHOLDER_LABEL);
    assert_eq!(options[0].value, "");
    assert_eq!(options[1].label, "A (3 players) - 1.2.3.4:7777");
    assert_eq!(options[1].value, "1.2.3.4:7777");
}

#[test]
fn test_refresh_failure_message_from_wire() {
    let response: ActionResponse =
        serde_json::from_value(json!({"success": false, "error": "scan failed"})).unwrap();

    assert_eq!(response.into_result(), Err("scan failed".to_string()));
}

#[test]
fn test_sequenced_results_applied_latest_first_only() {
    // Arrange: three polls issued in order, completing out of order
    let mut gate = LatestWins::new();
    let (first, second, third) = (gate.issue(), gate.issue(), gate.issue());

    // Act / Assert
    assert!(gate.admit(second));
    assert!(!gate.admit(first));
    assert!(gate.admit(third));
    assert!(!gate.admit(second));
    assert_eq!(gate.last_admitted(), Some(third));
}
