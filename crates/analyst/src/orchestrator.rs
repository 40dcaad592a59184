//! Concurrent analysis of side-to-move candidates.
//!
//! One run owns a `FuturesUnordered` holding one analysis future per
//! candidate. All futures are in flight before any is awaited, and each is
//! rendered as it resolves, so display order follows completion order, not
//! candidate order.
//!
//! There is no cancellation. A run keeps going after the trigger control has
//! reset, and a run from an earlier activation can still write to the display
//! after a newer one started.

use std::sync::Arc;

use board_core::Candidate;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{error, info, warn};

use crate::clients::{AnalysisResult, PositionAnalyzer};
use crate::error::AnalysisError;
use crate::ui::UiContext;

pub const DEFAULT_DEPTH: u32 = 14;

/// Display text when no candidate could be analysed.
pub const ERROR_LINE: &str = "Error";

/// How each candidate of one run ended.
#[derive(Debug)]
pub struct OrchestrationOutcome {
    pub resolved: Vec<(Candidate, Result<AnalysisResult, AnalysisError>)>,
}

impl OrchestrationOutcome {
    pub fn successes(&self) -> usize {
        self.resolved.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn all_failed(&self) -> bool {
        self.successes() == 0
    }
}

pub struct AnalysisOrchestrator<A: ?Sized> {
    analyzer: Arc<A>,
    ui: UiContext,
    depth: u32,
}

impl<A> AnalysisOrchestrator<A>
where
    A: PositionAnalyzer + ?Sized,
{
    pub fn new(analyzer: Arc<A>, ui: UiContext, depth: u32) -> Self {
        Self { analyzer, ui, depth }
    }

    pub async fn run(&self, candidates: Vec<Candidate>) -> OrchestrationOutcome {
        let mut pending: FuturesUnordered<_> = candidates
            .into_iter()
            .map(|candidate| {
                let analyzer = Arc::clone(&self.analyzer);
                let depth = self.depth;
                async move {
                    let result = analyzer.analyze(&candidate.notation, depth).await;
                    (candidate, result)
                }
            })
            .collect();

        let mut rendered = 0usize;
        let mut resolved = Vec::with_capacity(pending.len());

        while let Some((candidate, result)) = pending.next().await {
            match &result {
                Ok(analysis) => {
                    let line = format!("{}: {}", candidate.label(), analysis.best_move);
                    if rendered == 0 {
                        self.ui.replace_display(line);
                    } else {
                        self.ui.append_display(line);
                    }
                    rendered += 1;
                    info!(
                        side = candidate.label(),
                        best_move = %analysis.best_move,
                        evaluation = ?analysis.evaluation,
                        mate = ?analysis.mate,
                        "Analysis complete"
                    );
                }
                Err(e) => {
                    warn!(side = candidate.label(), fen = %candidate.notation, error = %e, "Analysis failed");
                }
            }
            resolved.push((candidate, result));
        }

        if rendered == 0 && !resolved.is_empty() {
            error!(candidates = resolved.len(), "Every candidate failed");
            self.ui.replace_display(ERROR_LINE);
        }

        OrchestrationOutcome { resolved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use board_core::Color;

    struct EchoAnalyzer;

    #[async_trait]
    impl PositionAnalyzer for EchoAnalyzer {
        async fn analyze(&self, notation: &str, depth: u32) -> Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult {
                best_move: format!("{}@{depth}", notation.split(' ').nth(1).unwrap_or("?")),
                evaluation: Some(0.0),
                mate: None,
                continuation: None,
            })
        }
    }

    #[tokio::test]
    async fn test_single_candidate_replaces_display() {
        let ui = UiContext::new();
        ui.replace_display("previous");
        let orchestrator = AnalysisOrchestrator::new(Arc::new(EchoAnalyzer), ui.clone(), DEFAULT_DEPTH);

        let outcome = orchestrator
            .run(vec![Candidate::new("8/8/8/8/8/8/8/4K3", Color::Black)])
            .await;

        assert_eq!(outcome.successes(), 1);
        assert_eq!(ui.display_lines(), vec!["B: b@14".to_string()]);
    }

    #[tokio::test]
    async fn test_no_candidates_leaves_display() {
        let ui = UiContext::new();
        ui.replace_display("previous");
        let orchestrator = AnalysisOrchestrator::new(Arc::new(EchoAnalyzer), ui.clone(), DEFAULT_DEPTH);

        let outcome = orchestrator.run(Vec::new()).await;

        assert!(outcome.resolved.is_empty());
        assert_eq!(ui.display_text(), "previous");
    }
}
