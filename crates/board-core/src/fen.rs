//! Full FEN composition from a placement field.

use shakmaty::Color;

/// Castling rights, en-passant target, halfmove clock and fullmove number.
/// Always emitted verbatim; never derived from game history.
pub const PLACEHOLDER_FIELDS: &str = "KQkq - 0 1";

pub fn side_char(side: Color) -> char {
    match side {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

/// `<placement> <side> KQkq - 0 1`
pub fn compose_notation(placement: &str, side: Color) -> String {
    format!("{placement} {} {PLACEHOLDER_FIELDS}", side_char(side))
}
