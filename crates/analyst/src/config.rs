use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::clients::{MAX_DEPTH, MIN_DEPTH};
use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://stockfish.online/api/s/v2.php";

#[derive(Clone, Debug)]
pub struct AnalystConfig {
    pub api_url: String,
    pub depth: u32,
    pub http_timeout: Duration,
    pub reset_delay: Duration,
    pub trigger_key: char,
    pub toggle_key: char,
    /// HTML snapshot the terminal host treats as the live document.
    pub board_snapshot: String,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            depth: 14,
            http_timeout: Duration::from_secs(30),
            reset_delay: Duration::from_millis(2000),
            trigger_key: 'z',
            toggle_key: 'a',
            board_snapshot: "board.html".to_string(),
        }
    }
}

impl AnalystConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            api_url: env::var("STOCKFISH_API_URL").unwrap_or(defaults.api_url),
            depth: depth_var("ANALYSIS_DEPTH")?.unwrap_or(defaults.depth),
            http_timeout: parse_var("HTTP_TIMEOUT_SECS", "a number of seconds")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            reset_delay: parse_var("RESET_DELAY_MS", "a number of milliseconds")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.reset_delay),
            trigger_key: parse_var("TRIGGER_KEY", "a single character")?
                .unwrap_or(defaults.trigger_key),
            toggle_key: parse_var("TOGGLE_KEY", "a single character")?
                .unwrap_or(defaults.toggle_key),
            board_snapshot: env::var("BOARD_SNAPSHOT").unwrap_or(defaults.board_snapshot),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
        Err(_) => Ok(None),
    }
}

/// Depths outside what the analysis service accepts are refused at startup.
fn depth_var(name: &'static str) -> Result<Option<u32>, ConfigError> {
    const EXPECTED: &str = "an integer between 1 and 15";

    match parse_var::<u32>(name, EXPECTED)? {
        Some(depth) if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) => Err(ConfigError::Invalid {
            name,
            expected: EXPECTED,
            value: depth.to_string(),
        }),
        depth => Ok(depth),
    }
}
