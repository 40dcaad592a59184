use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::{AnalysisResult, PositionAnalyzer};
use crate::error::{AnalysisError, TransportError};

pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 15;

/// Client for the stockfish.online REST endpoint.
pub struct StockfishOnlineClient {
    client: Client,
    api_url: String,
}

/// Raw response body. Field names follow the service.
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    success: bool,
    bestmove: Option<String>,
    evaluation: Option<f64>,
    mate: Option<i32>,
    continuation: Option<String>,
    #[serde(alias = "data")]
    value: Option<Value>,
}

impl StockfishOnlineClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent("BoardAnalyst/1.0")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    async fn fetch(&self, notation: &str, depth: u32) -> Result<ServiceResponse, TransportError> {
        tracing::debug!(url = %self.api_url, fen = notation, depth, "Requesting analysis");

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("fen", notation.to_string()), ("depth", depth.to_string())])
            .send()
            .await?;

        // The service reports rejections in the body even on error statuses,
        // so the status only matters when the body is not a service response.
        let status_error = resp.error_for_status_ref().err();
        let body = resp.text().await?;

        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(match status_error {
                Some(status) => status.into(),
                None => e.into(),
            }),
        }
    }
}

/// Reject arguments the service would refuse, before touching the network.
pub fn validate_request(notation: &str, depth: u32) -> Result<(), AnalysisError> {
    if notation.trim().is_empty() {
        return Err(AnalysisError::InvalidArgument("FEN string is required".into()));
    }
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(AnalysisError::InvalidArgument(format!(
            "Depth must be a number between {MIN_DEPTH} and {MAX_DEPTH}, got {depth}"
        )));
    }
    Ok(())
}

fn normalize(resp: ServiceResponse) -> Result<AnalysisResult, AnalysisError> {
    if !resp.success {
        let diagnostic = match resp.value {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "no diagnostic provided".to_string(),
        };
        return Err(AnalysisError::AnalysisRejected(diagnostic));
    }

    let best_move = resp
        .bestmove
        .ok_or(TransportError::MissingField("bestmove"))?;

    Ok(AnalysisResult {
        best_move,
        evaluation: resp.evaluation,
        mate: resp.mate,
        continuation: resp.continuation,
    })
}

#[async_trait]
impl PositionAnalyzer for StockfishOnlineClient {
    async fn analyze(&self, notation: &str, depth: u32) -> Result<AnalysisResult, AnalysisError> {
        validate_request(notation, depth)?;

        let resp = self.fetch(notation, depth).await.map_err(|e| {
            tracing::error!(fen = notation, error = %e, "Error analyzing position");
            e
        })?;

        normalize(resp).inspect_err(|e| {
            tracing::error!(fen = notation, error = %e, "Error analyzing position");
        })
    }
}
