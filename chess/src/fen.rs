use cozy_chess::Board;

use crate::types::PieceColor;

/// Standard initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a Board
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let fields = fen.split_whitespace().count();
    if fields == 0 {
        return Err(FenError::InvalidFormat);
    }
    if fields != 6 {
        return Err(FenError::FieldCount(fields));
    }

    fen.parse().map_err(|_| FenError::InvalidBoardLayout)
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

/// The FEN fields that identify a position for repetition purposes:
/// placement, side to move, castling rights and en-passant target.
/// Halfmove and fullmove clocks are dropped.
pub fn reduced_key(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// Side to move as written in the second FEN field.
pub fn side_to_move(fen: &str) -> Option<PieceColor> {
    let field = fen.split_whitespace().nth(1)?;
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PieceColor::from_fen_char(c),
        _ => None,
    }
}

/// Fullmove number from the sixth FEN field, defaulting to 1.
pub fn fullmove_number(fen: &str) -> u32 {
    fen.split_whitespace()
        .nth(5)
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Invalid FEN format")]
    InvalidFormat,
    #[error("Expected 6 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid board layout")]
    InvalidBoardLayout,
}
