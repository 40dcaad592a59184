//! Side-to-move resolution.
//!
//! The host page does not always show whose turn it is. When the turn
//! indicator can be read the position is analysed once; otherwise one
//! candidate per side is produced and the user picks the relevant line.

use shakmaty::Color;

use crate::fen::compose_notation;
use crate::markup::class_lists;

const TURN_CLASS: &str = "clock-player-turn";
const WHITE_CLOCK_CLASS: &str = "clock-white";
const BLACK_CLOCK_CLASS: &str = "clock-black";

/// One full notation string for one side-to-move hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub side: Color,
    pub notation: String,
}

impl Candidate {
    pub fn new(placement: &str, side: Color) -> Self {
        Self {
            side,
            notation: compose_notation(placement, side),
        }
    }

    /// Short tag used in the result display.
    pub fn label(&self) -> &'static str {
        match self.side {
            Color::White => "W",
            Color::Black => "B",
        }
    }
}

/// Read the side to move from the clock markup.
///
/// Returns `None` unless exactly one side's clock carries the active-turn class.
pub fn read_side_to_move(markup: &str) -> Option<Color> {
    let mut white = false;
    let mut black = false;

    for classes in class_lists(markup) {
        let mut is_turn = false;
        let mut side = None;
        for class in classes.split_whitespace() {
            match class {
                TURN_CLASS => is_turn = true,
                WHITE_CLOCK_CLASS => side = Some(Color::White),
                BLACK_CLOCK_CLASS => side = Some(Color::Black),
                _ => {}
            }
        }
        match (is_turn, side) {
            (true, Some(Color::White)) => white = true,
            (true, Some(Color::Black)) => black = true,
            _ => {}
        }
    }

    match (white, black) {
        (true, false) => Some(Color::White),
        (false, true) => Some(Color::Black),
        _ => None,
    }
}

/// Expand a placement field into one candidate, or two (white first) when
/// the turn indicator is missing or ambiguous.
pub fn resolve_candidates(placement: &str, indicator: Option<&str>) -> Vec<Candidate> {
    match indicator.and_then(read_side_to_move) {
        Some(side) => vec![Candidate::new(placement, side)],
        None => vec![
            Candidate::new(placement, Color::White),
            Candidate::new(placement, Color::Black),
        ],
    }
}
