use analyst::config::AnalystConfig;
use analyst::host::SnapshotDocument;
use analyst::{
    AnalysisOrchestrator, KeyAction, KeyBindings, StockfishOnlineClient, TriggerController,
    UiContext,
};

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AnalystConfig::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        depth = config.depth,
        snapshot = %config.board_snapshot,
        "Analyst config loaded"
    );

    let ui = UiContext::new();
    let client = Arc::new(StockfishOnlineClient::new(&config.api_url, config.http_timeout)?);
    let orchestrator = Arc::new(AnalysisOrchestrator::new(client, ui.clone(), config.depth));
    let document = Arc::new(SnapshotDocument::new(&config.board_snapshot));
    let controller = TriggerController::new(document, orchestrator, ui.clone(), config.reset_delay)
        .with_bindings(KeyBindings {
            trigger: config.trigger_key,
            toggle_display: config.toggle_key,
        });

    println!(
        "[{}]  press '{}' + Enter to analyze, '{}' + Enter to toggle the result",
        ui.control_label(),
        config.trigger_key,
        config.toggle_key
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        for key in line.chars().filter(|c| !c.is_whitespace()) {
            match controller.handle_key(key) {
                KeyAction::Triggered(Ok(activation)) => {
                    println!("[{}]", ui.control_label());
                    let ui = ui.clone();
                    tokio::spawn(async move {
                        if activation.analysis.await.is_ok() && ui.is_display_visible() {
                            println!("{}", ui.display_text());
                        }
                    });
                }
                KeyAction::Triggered(Err(e)) => {
                    println!("[{}] {e}", ui.control_label());
                }
                KeyAction::DisplayToggled { visible } => {
                    if visible {
                        println!("{}", ui.display_text());
                    } else {
                        println!("(result hidden)");
                    }
                }
                KeyAction::Ignored => {}
            }
        }
    }

    Ok(())
}
