//! Square-token scanning over rendered board markup.
//!
//! Chess.com renders every piece as an element whose class list carries the
//! piece code and the square, e.g. `class="piece wk square-51"`. The class
//! order is not stable across site versions, so a token is any class
//! attribute that contains both a `[wb][prnbqk]` class and a `square-XY`
//! class, wherever they sit in the list.

use std::sync::LazyLock;

use regex::Regex;
use shakmaty::{Color, Piece, Role};
use tracing::warn;

static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("class attribute pattern")
});

static PIECE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([wb])([prnbqk])$").expect("piece class pattern"));

static SQUARE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^square-([0-9])([0-9])$").expect("square class pattern"));

/// One occupied square as rendered in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareToken {
    pub piece: Piece,
    /// File digit as rendered, 1 = a-file.
    pub file: u8,
    /// Rank digit as rendered, 1 = first rank.
    pub rank: u8,
}

impl SquareToken {
    /// Grid indices `(rank_index, file_index)`, rank index 0 being the 8th rank.
    pub fn grid_index(&self) -> (usize, usize) {
        ((8 - self.rank) as usize, (self.file - 1) as usize)
    }
}

/// Iterate the class-attribute values of a markup fragment in document order.
pub fn class_lists(markup: &str) -> impl Iterator<Item = &str> {
    CLASS_ATTR_RE.captures_iter(markup).filter_map(|cap| {
        cap.get(1)
            .or_else(|| cap.get(2))
            .map(|m| m.as_str())
    })
}

/// Collect every well-formed square token in document order.
///
/// Tokens with a coordinate digit outside 1-8 are logged and skipped.
pub fn scan_tokens(markup: &str) -> Vec<SquareToken> {
    class_lists(markup).filter_map(parse_class_list).collect()
}

fn parse_class_list(classes: &str) -> Option<SquareToken> {
    let mut piece = None;
    let mut coords = None;

    for class in classes.split_whitespace() {
        if let Some(cap) = PIECE_CLASS_RE.captures(class) {
            let color = if &cap[1] == "w" { Color::White } else { Color::Black };
            let role = Role::from_char(cap[2].chars().next()?)?;
            piece = Some(Piece { color, role });
        } else if let Some(cap) = SQUARE_CLASS_RE.captures(class) {
            coords = Some((digit(&cap[1]), digit(&cap[2])));
        }
    }

    let piece = piece?;
    let (file, rank) = coords?;

    if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
        warn!(classes, file, rank, "Skipping square token with out-of-range coordinate");
        return None;
    }

    Some(SquareToken { piece, file, rank })
}

fn digit(s: &str) -> u8 {
    s.bytes().next().map(|b| b - b'0').unwrap_or(0)
}
