//! Trigger control state machine.
//!
//! ```text
//!   Idle/Success --trigger--> Analyzing --reset timer--> Success
//!   any          --failure--> Error     --reset timer--> Idle
//! ```
//!
//! The reset timer is visual feedback only. It fires after the configured
//! delay whether or not the analysis has finished. Display visibility is a
//! separate toggle outside this state machine.

use std::sync::Arc;
use std::time::Duration;

use board_core::{decode_board, resolve_candidates, Candidate};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::clients::PositionAnalyzer;
use crate::error::TriggerError;
use crate::host::HostDocument;
use crate::orchestrator::{AnalysisOrchestrator, OrchestrationOutcome};
use crate::ui::{TriggerState, UiContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub trigger: char,
    pub toggle_display: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            trigger: 'z',
            toggle_display: 'a',
        }
    }
}

/// Handles of one started activation.
pub struct Activation {
    pub id: u64,
    pub candidates: usize,
    /// The detached analysis run. Dropping this handle does not cancel it.
    pub analysis: JoinHandle<OrchestrationOutcome>,
    pub reset: JoinHandle<()>,
}

pub enum KeyAction {
    Triggered(Result<Activation, TriggerError>),
    DisplayToggled { visible: bool },
    Ignored,
}

pub struct TriggerController<D: ?Sized, A: ?Sized> {
    document: Arc<D>,
    orchestrator: Arc<AnalysisOrchestrator<A>>,
    ui: UiContext,
    reset_delay: Duration,
    bindings: KeyBindings,
}

impl<D, A> TriggerController<D, A>
where
    D: HostDocument + ?Sized,
    A: PositionAnalyzer + ?Sized + 'static,
{
    pub fn new(
        document: Arc<D>,
        orchestrator: Arc<AnalysisOrchestrator<A>>,
        ui: UiContext,
        reset_delay: Duration,
    ) -> Self {
        Self {
            document,
            orchestrator,
            ui,
            reset_delay,
            bindings: KeyBindings::default(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Dispatch a key press. Bindings are case-insensitive.
    pub fn handle_key(&self, key: char) -> KeyAction {
        if key.eq_ignore_ascii_case(&self.bindings.trigger) {
            KeyAction::Triggered(self.trigger())
        } else if key.eq_ignore_ascii_case(&self.bindings.toggle_display) {
            let visible = self.ui.toggle_display();
            debug!(visible, "Toggled result display");
            KeyAction::DisplayToggled { visible }
        } else {
            KeyAction::Ignored
        }
    }

    /// Start an activation: extract the board, spawn the analysis run and
    /// the reset timer. Must be called inside a Tokio runtime.
    pub fn trigger(&self) -> Result<Activation, TriggerError> {
        match self.prepare() {
            Ok(candidates) => {
                let id = self.ui.begin_activation(TriggerState::Analyzing);
                let count = candidates.len();
                info!(activation = id, candidates = count, "Analyzing position");

                let orchestrator = Arc::clone(&self.orchestrator);
                let analysis = tokio::spawn(async move { orchestrator.run(candidates).await });
                let reset = self.spawn_reset(id, TriggerState::Success);

                Ok(Activation {
                    id,
                    candidates: count,
                    analysis,
                    reset,
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to start analysis");
                let id = self.ui.begin_activation(TriggerState::Error);
                self.spawn_reset(id, TriggerState::Idle);
                Err(e)
            }
        }
    }

    fn prepare(&self) -> Result<Vec<Candidate>, TriggerError> {
        let markup = self
            .document
            .board_markup()
            .ok_or(TriggerError::BoardNotFound)?;
        let board = decode_board(&markup)?;
        debug!(placement = %board.placement, "Extracted placement");

        let indicator = self.document.turn_indicator();
        Ok(resolve_candidates(&board.placement, indicator.as_deref()))
    }

    fn spawn_reset(&self, activation: u64, state: TriggerState) -> JoinHandle<()> {
        let ui = self.ui.clone();
        let delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !ui.settle_activation(activation, state) {
                debug!(activation, "Reset timer superseded by a newer activation");
            }
        })
    }
}
