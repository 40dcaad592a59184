//! Shared UI handles: the trigger control and the result display.
//!
//! The wiring process creates one `UiContext` and hands clones of it to the
//! trigger controller and the orchestrator. Every access is a short critical
//! section; the lock is never held across an await point.

use std::sync::{Arc, Mutex, MutexGuard};

/// Visual state of the trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

impl TriggerState {
    pub fn label(self) -> &'static str {
        match self {
            TriggerState::Idle | TriggerState::Success => "Analyze",
            TriggerState::Analyzing => "Analyzing",
            TriggerState::Error => "Error!",
        }
    }
}

#[derive(Debug)]
struct UiState {
    trigger: TriggerState,
    /// Bumped on every activation so stale reset timers can be ignored.
    activation: u64,
    lines: Vec<String>,
    display_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            trigger: TriggerState::Idle,
            activation: 0,
            lines: Vec::new(),
            display_visible: true,
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct UiContext {
    inner: Arc<Mutex<UiState>>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UiState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.lock().trigger
    }

    pub fn control_label(&self) -> &'static str {
        self.trigger_state().label()
    }

    /// Enter `state` as a new activation and return its id.
    pub fn begin_activation(&self, state: TriggerState) -> u64 {
        let mut ui = self.lock();
        ui.activation += 1;
        ui.trigger = state;
        ui.activation
    }

    /// Move to `state` only if `activation` is still the latest one.
    pub fn settle_activation(&self, activation: u64, state: TriggerState) -> bool {
        let mut ui = self.lock();
        if ui.activation != activation {
            return false;
        }
        ui.trigger = state;
        true
    }

    pub fn replace_display(&self, line: impl Into<String>) {
        let mut ui = self.lock();
        ui.lines.clear();
        ui.lines.push(line.into());
    }

    pub fn append_display(&self, line: impl Into<String>) {
        self.lock().lines.push(line.into());
    }

    pub fn display_lines(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    pub fn display_text(&self) -> String {
        self.lock().lines.join("\n")
    }

    pub fn is_display_visible(&self) -> bool {
        self.lock().display_visible
    }

    /// Flip display visibility and return the new value.
    pub fn toggle_display(&self) -> bool {
        let mut ui = self.lock();
        ui.display_visible = !ui.display_visible;
        ui.display_visible
    }
}
