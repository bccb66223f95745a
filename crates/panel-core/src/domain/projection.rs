//! UI-state projection: `(running, mode) -> UiState`.
//!
//! This is the only place that decides which controls are enabled and which
//! are visible.  It is a pure function of its two inputs, so calling it twice
//! with the same arguments yields the same configuration and there is no
//! hidden state to get out of sync with the server.
//!
//! # Invariants
//!
//! ```text
//!                  running = false              running = true
//!               Discovery     Manual         Discovery     Manual
//! port input    on            on             off           off
//! discovery     on            on             off           off
//! server select on  (shown)   off (hidden)   off (shown)   off (hidden)
//! manual field  off (hidden)  on  (shown)    off (hidden)  off (shown)
//! start button  on  (shown)   on  (shown)    off (hidden)  off (hidden)
//! stop button   off (hidden)  off (hidden)   on  (shown)   on  (shown)
//! ```
//!
//! - Exactly one of {start, stop} is visible.
//! - Exactly one target input is visible, and it is the only one that can be
//!   enabled.
//! - Every input is disabled while the bridge is running.

use super::mode::DiscoveryMode;

/// Enabled/visible flags of a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub visible: bool,
}

impl ControlState {
    pub const fn shown(enabled: bool) -> Self {
        Self {
            enabled,
            visible: true,
        }
    }

    pub const fn hidden() -> Self {
        Self {
            enabled: false,
            visible: false,
        }
    }

    /// Shown and enabled when `active`, hidden and disabled otherwise.
    pub const fn active_if(active: bool) -> Self {
        if active {
            Self::shown(true)
        } else {
            Self::hidden()
        }
    }
}

/// Derived configuration of every projected control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub port_input: ControlState,
    pub discovery_toggle: ControlState,
    pub server_select: ControlState,
    pub manual_server: ControlState,
    pub start_button: ControlState,
    pub stop_button: ControlState,
}

impl UiState {
    /// Number of visible lifecycle buttons (always 1).
    pub fn visible_lifecycle_buttons(&self) -> usize {
        [self.start_button, self.stop_button]
            .iter()
            .filter(|c| c.visible)
            .count()
    }

    /// Number of visible target inputs (always 1).
    pub fn visible_target_inputs(&self) -> usize {
        [self.server_select, self.manual_server]
            .iter()
            .filter(|c| c.visible)
            .count()
    }

    /// Number of enabled target inputs (1 while stopped, 0 while running).
    pub fn enabled_target_inputs(&self) -> usize {
        [self.server_select, self.manual_server]
            .iter()
            .filter(|c| c.enabled)
            .count()
    }
}

/// Projects the bridge running flag and the target input mode onto the
/// enabled/visible flags of every control.
pub fn project_ui_state(running: bool, mode: DiscoveryMode) -> UiState {
    let editable = !running;
    let discovery = mode.is_discovery();

    UiState {
        port_input: ControlState::shown(editable),
        discovery_toggle: ControlState::shown(editable),
        server_select: ControlState {
            enabled: editable && discovery,
            visible: discovery,
        },
        manual_server: ControlState {
            enabled: editable && !discovery,
            visible: !discovery,
        },
        start_button: ControlState::active_if(!running),
        stop_button: ControlState::active_if(running),
    }
}
