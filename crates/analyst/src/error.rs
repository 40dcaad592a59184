use board_core::ExtractError;

/// Failure of a single analysis call.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Analysis failed: {0}")]
    AnalysisRejected(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Why the analysis service could not be reached or read.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

/// Failure raised synchronously while handling a trigger.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("No board found in the current document")]
    BoardNotFound,

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
