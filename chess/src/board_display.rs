//! Lightweight piece grid built from FEN, for input hit-testing and text
//! rendering.

use crate::coords::{edge_file_label, edge_rank_label, to_file, to_rank};
use crate::types::{PieceColor, PieceKind};

/// An 8x8 board for display purposes only, indexed `[rank][file]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBoard {
    squares: [[Option<(PieceKind, PieceColor)>; 8]; 8],
}

impl DisplayBoard {
    /// Parse the piece placement field of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, DisplayBoardError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or(DisplayBoardError::InvalidFen)?;
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(DisplayBoardError::InvalidFen);
        }

        let mut squares = [[None; 8]; 8];
        for (row, text) in rows.into_iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0usize;
            for c in text.chars() {
                match c.to_digit(10) {
                    Some(run @ 1..=8) => file += run as usize,
                    Some(_) => return Err(DisplayBoardError::InvalidFen),
                    None => {
                        let kind = PieceKind::from_char(c).ok_or(DisplayBoardError::InvalidPiece(c))?;
                        let color = if c.is_ascii_uppercase() {
                            PieceColor::White
                        } else {
                            PieceColor::Black
                        };
                        let cell = squares[rank]
                            .get_mut(file)
                            .ok_or(DisplayBoardError::InvalidFen)?;
                        *cell = Some((kind, color));
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(DisplayBoardError::InvalidFen);
            }
        }

        Ok(Self { squares })
    }

    pub fn piece_at(&self, file: u8, rank: u8) -> Option<(PieceKind, PieceColor)> {
        if file > 7 || rank > 7 {
            return None;
        }
        self.squares[rank as usize][file as usize]
    }

    /// True when the square holds a piece of `color`.
    pub fn has_piece_of(&self, file: u8, rank: u8, color: PieceColor) -> bool {
        matches!(self.piece_at(file, rank), Some((_, c)) if c == color)
    }

    /// Text diagram with figurines and edge labels, White at the bottom
    /// unless `reversed`.
    pub fn render(&self, reversed: bool) -> String {
        let mut out = String::new();
        for row in 0..8u8 {
            let rank = 7 - to_rank(row, reversed);
            out.push(edge_rank_label(row, reversed).unwrap_or(' '));
            for col in 0..8u8 {
                let file = to_file(col, reversed);
                out.push(' ');
                out.push(match self.piece_at(file, rank) {
                    Some((kind, color)) => kind.figurine(color),
                    None => '.',
                });
            }
            out.push('\n');
        }
        out.push(' ');
        for col in 0..8u8 {
            out.push(' ');
            out.push(edge_file_label(col, reversed).unwrap_or(' '));
        }
        out.push('\n');
        out
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayBoardError {
    #[error("Invalid FEN string")]
    InvalidFen,
    #[error("Invalid piece character: {0}")]
    InvalidPiece(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::STARTING_FEN;

    #[test]
    fn test_starting_position() {
        let board = DisplayBoard::from_fen(STARTING_FEN).unwrap();
        assert_eq!(
            board.piece_at(0, 0),
            Some((PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(
            board.piece_at(3, 7),
            Some((PieceKind::Queen, PieceColor::Black))
        );
        assert_eq!(board.piece_at(4, 4), None);
        assert!(board.has_piece_of(4, 1, PieceColor::White));
        assert!(!board.has_piece_of(4, 6, PieceColor::White));
    }

    #[test]
    fn test_rejects_short_and_long_ranks() {
        assert!(DisplayBoard::from_fen("8/8/8/8/8/8/8/7 w - - 0 1").is_err());
        assert!(DisplayBoard::from_fen("8/8/8/8/8/8/8/9 w - - 0 1").is_err());
        assert!(matches!(
            DisplayBoard::from_fen("8/8/8/8/8/8/8/7x w - - 0 1"),
            Err(DisplayBoardError::InvalidPiece('x'))
        ));
    }

    #[test]
    fn test_render_orientation() {
        let board = DisplayBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let normal = board.render(false);
        let lines: Vec<&str> = normal.lines().collect();
        assert_eq!(lines[0], "8 . . . . ♚ . . .");
        assert_eq!(lines[7], "1 . . . . ♔ . . .");
        assert_eq!(lines[8], "  A B C D E F G H");

        let reversed = board.render(true);
        let lines: Vec<&str> = reversed.lines().collect();
        assert_eq!(lines[0], "1 . . . ♔ . . . .");
        assert_eq!(lines[8], "  H G F E D C B A");
    }
}
