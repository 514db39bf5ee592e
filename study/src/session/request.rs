use chess::{square_from_indices, MoveArrow, PieceKind};
use cozy_chess::Square;
use serde::{Deserialize, Serialize};

/// A move given by board coordinates (files and ranks 0-7).
///
/// `promotion` only matters for a pawn reaching the last rank and defaults to
/// a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub start_file: u8,
    pub start_rank: u8,
    pub end_file: u8,
    pub end_rank: u8,
    #[serde(default = "default_promotion")]
    pub promotion: PieceKind,
}

fn default_promotion() -> PieceKind {
    PieceKind::Queen
}

impl MoveRequest {
    pub fn new(start_file: u8, start_rank: u8, end_file: u8, end_rank: u8) -> Self {
        Self {
            start_file,
            start_rank,
            end_file,
            end_rank,
            promotion: default_promotion(),
        }
    }

    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = promotion;
        self
    }

    /// Build a request from a pair of squares.
    pub fn between(from: Square, to: Square) -> Self {
        Self::new(
            from.file() as u8,
            from.rank() as u8,
            to.file() as u8,
            to.rank() as u8,
        )
    }

    /// Start and end squares; `None` when a coordinate is off the board.
    pub fn squares(&self) -> Option<(Square, Square)> {
        let from = square_from_indices(self.start_file, self.start_rank)?;
        let to = square_from_indices(self.end_file, self.end_rank)?;
        Some((from, to))
    }
}

/// Result of an accepted external move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMove {
    pub san: String,
    pub position_fen: String,
    pub last_move_arrow: MoveArrow,
}
