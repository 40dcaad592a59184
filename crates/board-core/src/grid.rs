//! 8x8 board grid and FEN placement-field encoding.

use shakmaty::Piece;
use tracing::debug;

use crate::error::ExtractError;
use crate::markup::{scan_tokens, SquareToken};

/// Square contents indexed `[rank][file]`, rank 0 = 8th rank, file 0 = a-file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardGrid {
    cells: [[Option<Piece>; 8]; 8],
}

impl BoardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rank: usize, file: usize) -> Option<Piece> {
        self.cells[rank][file]
    }

    /// Overwrites whatever the cell held before.
    pub fn set(&mut self, rank: usize, file: usize, piece: Piece) {
        self.cells[rank][file] = Some(piece);
    }

    pub fn place(&mut self, token: &SquareToken) {
        let (rank, file) = token.grid_index();
        self.set(rank, file, token.piece);
    }

    /// `(rank, file, piece)` for every occupied cell, top-left to bottom-right.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(rank, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(file, cell)| cell.map(|p| (rank, file, p)))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.occupied().next().is_none()
    }

    /// Encode the placement field: ranks top to bottom joined by `/`, empty
    /// runs as digits, white pieces uppercase.
    pub fn placement(&self) -> String {
        let mut fen = String::with_capacity(64);

        for (rank, row) in self.cells.iter().enumerate() {
            let mut empty = 0u8;
            for cell in row {
                match cell {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if rank < 7 {
                fen.push('/');
            }
        }

        fen
    }
}

/// A freshly extracted board and its encoded placement field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBoard {
    pub grid: BoardGrid,
    pub placement: String,
}

/// Decode board markup into a grid and placement field.
///
/// Tokens are applied in document order, so a later token for an already
/// occupied square replaces the earlier one.
pub fn decode_board(markup: &str) -> Result<DecodedBoard, ExtractError> {
    let tokens = scan_tokens(markup);

    let mut grid = BoardGrid::new();
    for token in &tokens {
        grid.place(token);
    }
    if grid.is_empty() {
        return Err(ExtractError::NoPiecesFound);
    }
    debug!(tokens = tokens.len(), "Decoded board markup");

    let placement = grid.placement();
    Ok(DecodedBoard { grid, placement })
}
