//! PGN text to [`PgnData`], driven by a `pgn_reader` visitor.
//!
//! The parser only checks PGN syntax. Move legality is left to whoever
//! replays the tree, so `1. e5` parses fine here.

use std::io::Cursor;
use std::ops::ControlFlow;

use pgn_reader::{Nag, Outcome, RawComment, RawTag, Reader, SanPlus, Skip, Visitor};
use tracing::debug;

use super::{MoveNode, PgnData, PgnHeader, Variation};
use crate::fen::{self, STARTING_FEN};
use crate::types::PieceColor;

/// Parse the first game of a PGN string
pub fn parse_pgn(input: &str) -> Result<PgnData, PgnError> {
    let mut reader = Reader::new(Cursor::new(input.trim_start_matches('\u{feff}').as_bytes()));
    match reader.read_game(&mut TreeBuilder) {
        Ok(Some(game)) => game,
        Ok(None) => Err(PgnError::NoGame),
        Err(e) => Err(PgnError::Read(e.to_string())),
    }
}

/// Move number and side of the next move in a line.
#[derive(Debug, Clone, Copy)]
struct Ply {
    number: u32,
    white: bool,
}

impl Ply {
    fn from_fen(fen: &str) -> Self {
        Self {
            number: fen::fullmove_number(fen),
            white: fen::side_to_move(fen) != Some(PieceColor::Black),
        }
    }

    fn next(self) -> Self {
        Self {
            number: if self.white { self.number } else { self.number + 1 },
            white: !self.white,
        }
    }
}

struct Line {
    moves: Vec<MoveNode>,
    ply: Ply,
    /// Ply of the last move, where a variation on it starts from
    before_last: Option<Ply>,
}

impl Line {
    fn starting_at(ply: Ply) -> Self {
        Self {
            moves: Vec::new(),
            ply,
            before_last: None,
        }
    }
}

/// Movetext state: the mainline at the bottom of `lines`, open variations
/// stacked above it.
struct Movetext {
    headers: Vec<PgnHeader>,
    lines: Vec<Line>,
    result: Option<String>,
}

impl Movetext {
    fn last_move(&mut self) -> Option<&mut MoveNode> {
        self.lines.last_mut().and_then(|line| line.moves.last_mut())
    }
}

struct TreeBuilder;

impl Visitor for TreeBuilder {
    type Tags = Vec<PgnHeader>;
    type Movetext = Movetext;
    type Output = Result<PgnData, PgnError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(Vec::new())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        tags.push(PgnHeader {
            name: String::from_utf8_lossy(name).into_owned(),
            value: value.decode_utf8_lossy().into_owned(),
        });
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, headers: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start_fen = headers
            .iter()
            .find(|h| h.name == "FEN")
            .map_or(STARTING_FEN, |h| h.value.as_str());
        let start = Ply::from_fen(start_fen);
        ControlFlow::Continue(Movetext {
            headers,
            lines: vec![Line::starting_at(start)],
            result: None,
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        if let Some(line) = movetext.lines.last_mut() {
            line.moves.push(MoveNode::new(line.ply.number, san_plus.to_string()));
            line.before_last = Some(line.ply);
            line.ply = line.ply.next();
        }
        ControlFlow::Continue(())
    }

    fn nag(&mut self, movetext: &mut Self::Movetext, nag: Nag) -> ControlFlow<Self::Output> {
        match movetext.last_move() {
            Some(node) => node.nags.push(format!("${}", nag.0)),
            None => debug!(nag = nag.0, "annotation before any move, ignored"),
        }
        ControlFlow::Continue(())
    }

    fn comment(
        &mut self,
        movetext: &mut Self::Movetext,
        comment: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        let text = String::from_utf8_lossy(comment.as_bytes()).trim().to_string();
        match movetext.last_move() {
            Some(node) => node.comments.push(text),
            None => debug!("comment before any move, ignored"),
        }
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, movetext: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        let Some(branch) = movetext.lines.last().and_then(|line| line.before_last) else {
            return ControlFlow::Break(Err(PgnError::VariationWithoutMove));
        };
        movetext.lines.push(Line::starting_at(branch));
        ControlFlow::Continue(Skip(false))
    }

    fn end_variation(&mut self, movetext: &mut Self::Movetext) -> ControlFlow<Self::Output> {
        if movetext.lines.len() < 2 {
            return ControlFlow::Break(Err(PgnError::UnbalancedVariation));
        }
        if let Some(variation) = movetext.lines.pop() {
            if let Some(node) = movetext.last_move() {
                node.ravs.push(Variation {
                    moves: variation.moves,
                });
            }
        }
        ControlFlow::Continue(())
    }

    fn outcome(&mut self, movetext: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        movetext.result = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, mut movetext: Self::Movetext) -> Self::Output {
        if movetext.lines.len() > 1 {
            return Err(PgnError::UnterminatedVariation);
        }
        let moves = movetext.lines.pop().map(|line| line.moves).unwrap_or_default();
        Ok(PgnData {
            headers: movetext.headers,
            moves,
            result: movetext.result,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PgnError {
    #[error("No game found")]
    NoGame,
    #[error("Failed to read PGN: {0}")]
    Read(String),
    #[error("Variation opened before any move")]
    VariationWithoutMove,
    #[error("Closing parenthesis without an open variation")]
    UnbalancedVariation,
    #[error("Variation not closed")]
    UnterminatedVariation,
}
