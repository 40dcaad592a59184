#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use analyst::clients::{AnalysisResult, PositionAnalyzer};
use analyst::error::{AnalysisError, TransportError};
use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::sync::Notify;

pub const SERVICE_PATH: &str = "/api/s/v2.php";

// ---------------------------------------------------------------------------
// Markup builders
// ---------------------------------------------------------------------------

/// One rendered piece, e.g. `piece("wk", "51")`.
pub fn piece(code: &str, square: &str) -> String {
    format!(r#"<div class="piece {code} square-{square}" style=""></div>"#)
}

/// Wrap pieces in a chess.com-style board region.
pub fn board(pieces: &[(&str, &str)]) -> String {
    let inner: String = pieces.iter().map(|(code, sq)| piece(code, sq)).collect();
    format!(
        r#"<wc-chess-board class="board board-layout-chessboard"><svg class="coordinates"></svg>{inner}</wc-chess-board>"#
    )
}

pub fn turn_indicator(white_to_move: bool) -> String {
    let (white, black) = if white_to_move {
        ("clock-white clock-player-turn", "clock-black")
    } else {
        ("clock-white", "clock-black clock-player-turn")
    };
    format!(
        r#"<div class="clock-component {black}">0:59</div><div class="clock-component {white}">1:00</div>"#
    )
}

pub fn starting_position() -> String {
    let mut pieces = Vec::new();
    let back = ["r", "n", "b", "q", "k", "b", "n", "r"];
    for (file, role) in back.iter().enumerate() {
        let f = file + 1;
        pieces.push((format!("w{role}"), format!("{f}1")));
        pieces.push(("wp".to_string(), format!("{f}2")));
        pieces.push(("bp".to_string(), format!("{f}7")));
        pieces.push((format!("b{role}"), format!("{f}8")));
    }
    let refs: Vec<(&str, &str)> = pieces.iter().map(|(c, s)| (c.as_str(), s.as_str())).collect();
    board(&refs)
}

// ---------------------------------------------------------------------------
// In-process analysis service
// ---------------------------------------------------------------------------

type Responder = fn(&HashMap<String, String>) -> (StatusCode, String);

#[derive(Clone)]
struct ServiceState {
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    respond: Responder,
}

pub struct MockService {
    pub url: String,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockService {
    /// Query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<ServiceState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let (status, body) = (state.respond)(&params);
    state.requests.lock().unwrap().push(params);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Start a stand-in for the analysis service on an ephemeral port.
pub async fn spawn_service(respond: Responder) -> MockService {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(SERVICE_PATH, get(handle))
        .with_state(ServiceState {
            requests: requests.clone(),
            respond,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockService {
        url: format!("http://{addr}{SERVICE_PATH}"),
        requests,
    }
}

/// Answers like the live service: white to move plays e2e4, black e7e5.
pub fn engine_like(params: &HashMap<String, String>) -> (StatusCode, String) {
    let fen = params.get("fen").map(String::as_str).unwrap_or("");
    let best = if fen.contains(" b ") { "e7e5" } else { "e2e4" };
    (
        StatusCode::OK,
        format!(
            r#"{{"success":true,"evaluation":0.3,"mate":null,"bestmove":"{best}","continuation":"{best} g1f3"}}"#
        ),
    )
}

/// Accepts white-to-move positions and rejects black-to-move ones.
pub fn rejects_black(params: &HashMap<String, String>) -> (StatusCode, String) {
    let fen = params.get("fen").map(String::as_str).unwrap_or("");
    if fen.contains(" b ") {
        (StatusCode::OK, r#"{"success":false,"value":"Invalid fen"}"#.to_string())
    } else {
        engine_like(params)
    }
}

/// Refuses every position with a 400 and a service-shaped body.
pub fn rejects_with_status(_: &HashMap<String, String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, r#"{"success":false,"data":"Invalid fen"}"#.to_string())
}

pub fn garbage(_: &HashMap<String, String>) -> (StatusCode, String) {
    (StatusCode::OK, "<html>rate limited</html>".to_string())
}

pub fn server_error(_: &HashMap<String, String>) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "{}".to_string())
}

// ---------------------------------------------------------------------------
// Scripted analyzer
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub enum Script {
    Move(&'static str),
    /// Answer with a move after sleeping.
    Slow(&'static str, Duration),
    Reject(&'static str),
    Transport,
    /// Answer only once the notify fires.
    Hold(&'static str, Arc<Notify>),
}

/// Analyzer whose answer depends on the side to move in the notation.
pub struct ScriptedAnalyzer {
    white: Script,
    black: Script,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedAnalyzer {
    pub fn new(white: Script, black: Script) -> Self {
        Self {
            white,
            black,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

fn found(best_move: &str) -> Result<AnalysisResult, AnalysisError> {
    Ok(AnalysisResult {
        best_move: best_move.to_string(),
        evaluation: Some(0.0),
        mate: None,
        continuation: None,
    })
}

#[async_trait]
impl PositionAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, notation: &str, depth: u32) -> Result<AnalysisResult, AnalysisError> {
        self.calls.lock().unwrap().push((notation.to_string(), depth));
        let script = if notation.contains(" b ") {
            self.black.clone()
        } else {
            self.white.clone()
        };

        match script {
            Script::Move(m) => found(m),
            Script::Slow(m, delay) => {
                tokio::time::sleep(delay).await;
                found(m)
            }
            Script::Reject(msg) => Err(AnalysisError::AnalysisRejected(msg.to_string())),
            Script::Transport => Err(TransportError::MissingField("bestmove").into()),
            Script::Hold(m, notify) => {
                notify.notified().await;
                found(m)
            }
        }
    }
}
