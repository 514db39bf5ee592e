//! PGN games as a move tree: header tags plus a mainline whose nodes may
//! carry NAGs, comments and recursive variations.

pub mod parser;
pub mod san;
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::fen::STARTING_FEN;

pub use parser::{parse_pgn, PgnError};

/// A parsed PGN game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgnData {
    pub headers: Vec<PgnHeader>,
    pub moves: Vec<MoveNode>,
    /// Game termination marker from the movetext (`1-0`, `*`, ...)
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgnHeader {
    pub name: String,
    pub value: String,
}

/// A single move in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveNode {
    /// Fullmove number of the position the move is played from
    pub move_number: u32,
    #[serde(rename = "move")]
    pub san: String,
    /// Numeric Annotation Glyphs, as written (`$1`, `$14`, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    /// Alternatives to this move, each starting from the position before it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ravs: Vec<Variation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub moves: Vec<MoveNode>,
}

impl MoveNode {
    pub fn new(move_number: u32, san: impl Into<String>) -> Self {
        Self {
            move_number,
            san: san.into(),
            nags: Vec::new(),
            comments: Vec::new(),
            ravs: Vec::new(),
        }
    }
}

impl PgnData {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    /// Starting position: the `FEN` tag when present, else the standard one.
    pub fn start_fen(&self) -> &str {
        self.header("FEN").unwrap_or(STARTING_FEN)
    }

    /// Study goal text for `locale`: `Goal_<locale>`, then `Goal_en`, then
    /// `Goal`, then empty.
    pub fn goal(&self, locale: &str) -> &str {
        self.header(&format!("Goal_{locale}"))
            .or_else(|| self.header("Goal_en"))
            .or_else(|| self.header("Goal"))
            .unwrap_or("")
    }
}
