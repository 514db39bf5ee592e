//! The rules-engine seam.
//!
//! Game sessions and the PGN linearizer never touch cozy_chess directly;
//! they drive a [`RulesEngine`]. [`crate::Game`] is the production
//! implementation.

use cozy_chess::Square;
use serde::{Deserialize, Serialize};

use crate::converters::square_indices;
use crate::game::GameError;
use crate::types::{PieceColor, PieceKind};

/// Outcome of a successfully played move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub san: String,
    pub from: Square,
    /// Landing square of the moving piece (g1/c1 for castling).
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl PlayedMove {
    pub fn arrow(&self) -> MoveArrow {
        MoveArrow::between(self.from, self.to)
    }
}

/// From/to board coordinates (0-7) of the last move, for drawing an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveArrow {
    pub from_file: u8,
    pub from_rank: u8,
    pub to_file: u8,
    pub to_rank: u8,
}

impl MoveArrow {
    pub fn between(from: Square, to: Square) -> Self {
        let (from_file, from_rank) = square_indices(from);
        let (to_file, to_rank) = square_indices(to);
        Self {
            from_file,
            from_rank,
            to_file,
            to_rank,
        }
    }
}

/// Chess rules as consumed by the study core.
///
/// Rejected moves come back as `None` and leave the engine untouched.
pub trait RulesEngine: Sized {
    /// Build an engine positioned at `fen`.
    fn from_fen(fen: &str) -> Result<Self, GameError>;

    /// Play a move given by coordinates. Castling may be given as the king's
    /// two-square move. `promotion` only applies to pawns reaching the last
    /// rank and defaults to a queen there.
    fn try_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<PlayedMove>;

    /// Play a move given in SAN.
    fn play_san(&mut self, san: &str) -> Option<PlayedMove>;

    fn fen(&self) -> String;

    fn turn(&self) -> PieceColor;

    fn piece_at(&self, square: Square) -> Option<(PieceKind, PieceColor)>;

    fn in_check(&self) -> bool;

    fn in_checkmate(&self) -> bool;

    fn in_stalemate(&self) -> bool;

    fn in_threefold_repetition(&self) -> bool;

    fn insufficient_material(&self) -> bool;

    fn fifty_move_rule(&self) -> bool;

    fn in_draw(&self) -> bool {
        self.in_stalemate()
            || self.in_threefold_repetition()
            || self.insufficient_material()
            || self.fifty_move_rule()
    }

    /// Set (or replace) a PGN header tag.
    fn set_header(&mut self, name: &str, value: &str);

    /// Export the game played so far as PGN text.
    fn pgn(&self) -> String;

    /// Replace the position and forget the move history. `false` when the FEN
    /// is rejected, in which case nothing changes.
    fn load(&mut self, fen: &str) -> bool;
}
