pub mod clients;
pub mod config;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod trigger;
pub mod ui;

pub use clients::{AnalysisResult, PositionAnalyzer, StockfishOnlineClient};
pub use error::{AnalysisError, ConfigError, TransportError, TriggerError};
pub use orchestrator::{AnalysisOrchestrator, OrchestrationOutcome};
pub use trigger::{Activation, KeyAction, KeyBindings, TriggerController};
pub use ui::{TriggerState, UiContext};
