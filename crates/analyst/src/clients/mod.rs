pub mod stockfish_online;

use async_trait::async_trait;

use crate::error::AnalysisError;

pub use stockfish_online::{StockfishOnlineClient, MAX_DEPTH, MIN_DEPTH};

/// Engine verdict for one position. Values are the service's, unreinterpreted:
/// the score sign and units are whatever the engine reported.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub best_move: String,
    pub evaluation: Option<f64>,
    /// Mate in N when the engine found one.
    pub mate: Option<i32>,
    pub continuation: Option<String>,
}

/// Anything that can turn a FEN string and search depth into a best move.
#[async_trait]
pub trait PositionAnalyzer: Send + Sync {
    async fn analyze(&self, notation: &str, depth: u32) -> Result<AnalysisResult, AnalysisError>;
}
