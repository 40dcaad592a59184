//! Host document seam: where board and turn-indicator markup come from.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

/// Class of the element wrapping the rendered board on chess.com.
pub const BOARD_REGION_CLASS: &str = "board-layout-chessboard";

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9-]*)[^>]*?\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>"#)
        .expect("opening tag pattern")
});

pub trait HostDocument: Send + Sync {
    /// Markup of the board region, or `None` when the page shows no board.
    fn board_markup(&self) -> Option<String>;

    /// Markup that may reveal whose turn it is.
    fn turn_indicator(&self) -> Option<String>;
}

/// Fixed markup, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    pub board: Option<String>,
    pub turn_indicator: Option<String>,
}

impl StaticDocument {
    pub fn with_board(board: impl Into<String>) -> Self {
        Self {
            board: Some(board.into()),
            turn_indicator: None,
        }
    }
}

impl HostDocument for StaticDocument {
    fn board_markup(&self) -> Option<String> {
        self.board.clone()
    }

    fn turn_indicator(&self) -> Option<String> {
        self.turn_indicator.clone()
    }
}

/// A saved HTML page, re-read on every access so edits show up on the next trigger.
#[derive(Debug, Clone)]
pub struct SnapshotDocument {
    path: PathBuf,
}

impl SnapshotDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read board snapshot");
                None
            }
        }
    }
}

impl HostDocument for SnapshotDocument {
    fn board_markup(&self) -> Option<String> {
        let html = self.read()?;
        element_inner_markup(&html, BOARD_REGION_CLASS).map(str::to_string)
    }

    fn turn_indicator(&self) -> Option<String> {
        self.read()
    }
}

/// Inner markup of the first element whose class list contains `class`.
///
/// The element ends at the close tag that balances its opening tag. An
/// element left open runs to the end of the document.
pub fn element_inner_markup<'a>(html: &'a str, class: &str) -> Option<&'a str> {
    let open = OPEN_TAG_RE.captures_iter(html).find(|cap| {
        cap.get(2)
            .or_else(|| cap.get(3))
            .is_some_and(|classes| classes.as_str().split_whitespace().any(|c| c == class))
    })?;

    let tag = open.get(1)?.as_str();
    let inner_start = open.get(0)?.end();
    let same_tag = Regex::new(&format!(r"(?i)<(/?){}[\s/>]", regex::escape(tag))).ok()?;

    let mut depth = 1usize;
    for cap in same_tag.captures_iter(&html[inner_start..]) {
        if cap[1].is_empty() {
            depth += 1;
            continue;
        }
        depth -= 1;
        if depth == 0 {
            let end = inner_start + cap.get(0)?.start();
            return Some(&html[inner_start..end]);
        }
    }

    tracing::debug!(tag, class, "Region element is never closed");
    Some(&html[inner_start..])
}
