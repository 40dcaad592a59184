//! Board-state extraction: rendered board markup to FEN candidates.

pub use shakmaty::{Color, Piece, Role};

pub mod error;
pub mod fen;
pub mod grid;
pub mod markup;
pub mod turn;

pub use error::ExtractError;
pub use fen::{compose_notation, PLACEHOLDER_FIELDS};
pub use grid::{decode_board, BoardGrid, DecodedBoard};
pub use markup::SquareToken;
pub use turn::{read_side_to_move, resolve_candidates, Candidate};
