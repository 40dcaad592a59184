//! Board extraction errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No pieces found in board markup")]
    NoPiecesFound,
}
