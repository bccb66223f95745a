//! The panel view model: every control the controller is bound to.
//!
//! [`PanelView`] plays the role of the page: it holds the value and the
//! enabled/visible flags of each input and button, the status label, and the
//! catalog options.  A renderer only ever *reads* it; the application
//! components write to it through [`SharedPanel`].
//!
//! # Who writes what
//!
//! | Resource                 | Single writer                       |
//! |--------------------------|-------------------------------------|
//! | status snapshot + label  | `StatusPoller` (via `apply_status`) |
//! | catalog + select options | `ServerCatalog` (via `replace_catalog`) |
//! | button busy state        | the component holding a `BusyGuard` |
//! | input values             | the operator (via the switch / controller) |
//!
//! Enabled/visible flags are never set by hand: every mutation ends with
//! [`PanelView::project`], which re-derives them from
//! `project_ui_state(running, mode)` and then overlays busy buttons.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bridge_panel_core::{
    build_catalog_options, project_ui_state, BridgeStatus, CatalogOption, ControlState,
    DiscoveryMode, LatestWins, ServerEntry, StatusTone, UiState,
};
use thiserror::Error;

pub const START_IDLE_LABEL: &str = "Start Bridge";
pub const STOP_IDLE_LABEL: &str = "Stop Bridge";
pub const REFRESH_IDLE_LABEL: &str = "Refresh Servers";

/// Status label shown before the first successful poll.
pub const INITIAL_STATUS_LABEL: &str = "Checking bridge status...";

/// An operator action on a control that is currently unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The control is disabled (typically because the bridge is running).
    #[error("the {0} is disabled")]
    Locked(&'static str),

    /// No catalog option at this index.
    #[error("no server at position {0} in the catalog")]
    NoSuchOption(usize),

    /// No catalog option carries this `host:port` value.
    #[error("server {0} is not in the catalog")]
    UnknownTarget(String),
}

/// The three buttons of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Stop,
    Refresh,
}

/// A button: its current label, projected flags, and busy overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub control: ControlState,
    idle_label: &'static str,
    busy: bool,
}

impl ButtonState {
    fn idle(idle_label: &'static str) -> Self {
        Self {
            label: idle_label.to_string(),
            control: ControlState::shown(true),
            idle_label,
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether an operator could press this button right now.
    pub fn is_clickable(&self) -> bool {
        self.control.visible && self.control.enabled && !self.busy
    }

    fn set_projected(&mut self, projected: ControlState) {
        self.control = ControlState {
            enabled: projected.enabled && !self.busy,
            visible: projected.visible,
        };
    }
}

/// A text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub control: ControlState,
}

/// The discovery checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub checked: bool,
    pub control: ControlState,
}

/// The catalog select box.  Option 0 is always the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub options: Vec<CatalogOption>,
    pub selected: usize,
    pub control: ControlState,
}

impl SelectField {
    pub fn selected_option(&self) -> Option<&CatalogOption> {
        self.options.get(self.selected)
    }

    /// Value of the selected option; `""` for the placeholder.
    pub fn value(&self) -> &str {
        self.selected_option().map_or("", |o| o.value.as_str())
    }
}

/// Model of every control the controller is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub status_label: String,
    pub tone: StatusTone,
    pub port_input: InputField,
    pub discovery: Checkbox,
    pub server_select: SelectField,
    pub manual_server: InputField,
    pub start_button: ButtonState,
    pub stop_button: ButtonState,
    pub refresh_button: ButtonState,
    snapshot: Option<BridgeStatus>,
    catalog: Vec<ServerEntry>,
    status_gate: LatestWins,
}

impl PanelView {
    /// Builds the initial panel: no status yet, empty catalog, and the given
    /// mode and port text.  Controls are projected as if the bridge were
    /// stopped until the first poll says otherwise.
    pub fn new(mode: DiscoveryMode, port: impl Into<String>) -> Self {
        let hidden = ControlState::hidden();
        let mut view = Self {
            status_label: INITIAL_STATUS_LABEL.to_string(),
            tone: StatusTone::Unknown,
            port_input: InputField {
                value: port.into(),
                control: hidden,
            },
            discovery: Checkbox {
                checked: mode.is_discovery(),
                control: hidden,
            },
            server_select: SelectField {
                options: build_catalog_options(&[]),
                selected: 0,
                control: hidden,
            },
            manual_server: InputField {
                value: String::new(),
                control: hidden,
            },
            start_button: ButtonState::idle(START_IDLE_LABEL),
            stop_button: ButtonState::idle(STOP_IDLE_LABEL),
            refresh_button: ButtonState::idle(REFRESH_IDLE_LABEL),
            snapshot: None,
            catalog: Vec::new(),
            status_gate: LatestWins::new(),
        };
        view.project();
        view
    }

    pub fn mode(&self) -> DiscoveryMode {
        DiscoveryMode::from_checkbox(self.discovery.checked)
    }

    /// Running flag of the last applied status; `false` before the first poll.
    pub fn running(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.running)
    }

    /// Last applied status snapshot.
    pub fn status(&self) -> Option<&BridgeStatus> {
        self.snapshot.as_ref()
    }

    /// Entries behind the current catalog options (placeholder excluded).
    pub fn catalog(&self) -> &[ServerEntry] {
        &self.catalog
    }

    /// The canonical target the start action reads.
    pub fn target(&self) -> &str {
        &self.manual_server.value
    }

    /// The projection for the current `(running, mode)`.
    pub fn ui_state(&self) -> UiState {
        project_ui_state(self.running(), self.mode())
    }

    /// Re-derives every enabled/visible flag from the projection, then
    /// overlays busy buttons.
    pub fn project(&mut self) {
        let ui = self.ui_state();
        self.port_input.control = ui.port_input;
        self.discovery.control = ui.discovery_toggle;
        self.server_select.control = ui.server_select;
        self.manual_server.control = ui.manual_server;
        self.start_button.set_projected(ui.start_button);
        self.stop_button.set_projected(ui.stop_button);
        self.refresh_button.set_projected(ControlState::shown(true));
    }

    /// Hands out the number for the next status request.  Always newer than
    /// every status applied so far, however that status was numbered.
    pub fn next_status_seq(&mut self) -> u64 {
        self.status_gate.issue()
    }

    /// Applies a polled status if `seq` is newer than every status applied
    /// so far.  Returns `false` (and changes nothing) for a stale result.
    pub fn apply_status(&mut self, seq: u64, status: BridgeStatus) -> bool {
        if !self.status_gate.admit(seq) {
            return false;
        }
        self.status_label = status.status.clone();
        self.tone = status.tone();
        self.snapshot = Some(status);
        self.project();
        true
    }

    /// Replaces the catalog wholesale and resets the selection to the
    /// placeholder.  The manual field keeps whatever it held.
    pub fn replace_catalog(&mut self, entries: Vec<ServerEntry>) {
        self.server_select.options = build_catalog_options(&entries);
        self.server_select.selected = 0;
        self.catalog = entries;
    }

    /// Switches between discovery and manual entry.
    ///
    /// # Errors
    ///
    /// [`ControlError::Locked`] while the checkbox is disabled.
    pub fn set_mode(&mut self, mode: DiscoveryMode) -> Result<(), ControlError> {
        if !self.discovery.control.enabled {
            return Err(ControlError::Locked("discovery checkbox"));
        }
        self.discovery.checked = mode.is_discovery();
        self.project();
        Ok(())
    }

    /// Selects the catalog option at `index`.  A non-placeholder selection
    /// is copied into the manual field and returned.
    ///
    /// # Errors
    ///
    /// [`ControlError::Locked`] while the select is disabled, or
    /// [`ControlError::NoSuchOption`] for an out-of-range index.
    pub fn select_option(&mut self, index: usize) -> Result<Option<String>, ControlError> {
        if !self.server_select.control.enabled {
            return Err(ControlError::Locked("server select"));
        }
        let value = self
            .server_select
            .options
            .get(index)
            .map(|o| o.value.clone())
            .ok_or(ControlError::NoSuchOption(index))?;
        self.server_select.selected = index;
        if value.is_empty() {
            return Ok(None);
        }
        self.manual_server.value = value.clone();
        Ok(Some(value))
    }

    /// Selects the catalog option whose value is `target`.
    ///
    /// # Errors
    ///
    /// As [`select_option`](Self::select_option), plus
    /// [`ControlError::UnknownTarget`] when no option matches.
    pub fn select_value(&mut self, target: &str) -> Result<Option<String>, ControlError> {
        let index = self
            .server_select
            .options
            .iter()
            .position(|o| !o.is_placeholder() && o.value == target)
            .ok_or_else(|| ControlError::UnknownTarget(target.to_string()))?;
        self.select_option(index)
    }

    /// Types into the port input.
    ///
    /// # Errors
    ///
    /// [`ControlError::Locked`] while the input is disabled.
    pub fn enter_port(&mut self, text: impl Into<String>) -> Result<(), ControlError> {
        if !self.port_input.control.enabled {
            return Err(ControlError::Locked("port input"));
        }
        self.port_input.value = text.into();
        Ok(())
    }

    /// Types into the manual server field.  The catalog selection is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`ControlError::Locked`] while the field is disabled.
    pub fn enter_manual_server(&mut self, text: impl Into<String>) -> Result<(), ControlError> {
        if !self.manual_server.control.enabled {
            return Err(ControlError::Locked("manual server field"));
        }
        self.manual_server.value = text.into();
        Ok(())
    }

    pub fn button(&self, button: Button) -> &ButtonState {
        match button {
            Button::Start => &self.start_button,
            Button::Stop => &self.stop_button,
            Button::Refresh => &self.refresh_button,
        }
    }

    fn button_mut(&mut self, button: Button) -> &mut ButtonState {
        match button {
            Button::Start => &mut self.start_button,
            Button::Stop => &mut self.stop_button,
            Button::Refresh => &mut self.refresh_button,
        }
    }

    /// Puts a clickable button into its busy state.  Returns `false` when the
    /// button is hidden, disabled, or already busy.
    pub fn begin_busy(&mut self, button: Button, label: &str) -> bool {
        let state = self.button_mut(button);
        if !state.is_clickable() {
            return false;
        }
        state.busy = true;
        state.label = label.to_string();
        state.control.enabled = false;
        true
    }

    /// Restores the idle label and lets the projection decide the flags again.
    pub fn end_busy(&mut self, button: Button) {
        let state = self.button_mut(button);
        state.busy = false;
        state.label = state.idle_label.to_string();
        self.project();
    }
}

/// Shared handle to the panel, cloned into every component.
///
/// The lock is a `std::sync::Mutex` because it is never held across an
/// `.await`: every access goes through [`read`](Self::read) or
/// [`update`](Self::update), whose closures are synchronous.
#[derive(Debug, Clone)]
pub struct SharedPanel {
    inner: Arc<Mutex<PanelView>>,
}

impl SharedPanel {
    pub fn new(view: PanelView) -> Self {
        Self {
            inner: Arc::new(Mutex::new(view)),
        }
    }

    // The view is plain data with no invariants spanning a panic, so a
    // poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, PanelView> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read<R>(&self, f: impl FnOnce(&PanelView) -> R) -> R {
        f(&self.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut PanelView) -> R) -> R {
        f(&mut self.lock())
    }

    /// A copy of the whole view, e.g. for rendering.
    pub fn snapshot(&self) -> PanelView {
        self.lock().clone()
    }

    /// Marks `button` busy with `label` and returns a guard that restores it
    /// on drop, on every exit path.  `None` if the button is not clickable.
    pub fn busy(&self, button: Button, label: &str) -> Option<BusyGuard> {
        if self.update(|v| v.begin_busy(button, label)) {
            Some(BusyGuard {
                panel: self.clone(),
                button,
            })
        } else {
            None
        }
    }
}

/// Releases a button's busy state when dropped.
#[must_use = "dropping the guard immediately releases the busy state"]
pub struct BusyGuard {
    panel: SharedPanel,
    button: Button,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let button = self.button;
        self.panel.update(|v| v.end_busy(button));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
