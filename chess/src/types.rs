//! Canonical piece and color types for the project.
//! cozy-chess types stay behind the rules-engine adapter.

use serde::{Deserialize, Serialize};

/// Project-owned piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Project-owned color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceKind {
    /// Letter used in SAN and in white FEN placement.
    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// Pieces a pawn may promote to, parsed from a SAN/UCI suffix letter.
    pub fn promotion_from_char(c: char) -> Option<Self> {
        match Self::from_char(c)? {
            kind @ (Self::Knight | Self::Bishop | Self::Rook | Self::Queen) => Some(kind),
            _ => None,
        }
    }

    /// Unicode chess figurine for this piece drawn in `color`.
    pub fn figurine(self, color: PieceColor) -> char {
        match (color, self) {
            (PieceColor::White, Self::King) => '\u{2654}',
            (PieceColor::White, Self::Queen) => '\u{2655}',
            (PieceColor::White, Self::Rook) => '\u{2656}',
            (PieceColor::White, Self::Bishop) => '\u{2657}',
            (PieceColor::White, Self::Knight) => '\u{2658}',
            (PieceColor::White, Self::Pawn) => '\u{2659}',
            (PieceColor::Black, Self::King) => '\u{265A}',
            (PieceColor::Black, Self::Queen) => '\u{265B}',
            (PieceColor::Black, Self::Rook) => '\u{265C}',
            (PieceColor::Black, Self::Bishop) => '\u{265D}',
            (PieceColor::Black, Self::Knight) => '\u{265E}',
            (PieceColor::Black, Self::Pawn) => '\u{265F}',
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }

    /// Rank index (0-7) a pawn of this color promotes on.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(p: cozy_chess::Piece) -> Self {
        match p {
            cozy_chess::Piece::Pawn => Self::Pawn,
            cozy_chess::Piece::Knight => Self::Knight,
            cozy_chess::Piece::Bishop => Self::Bishop,
            cozy_chess::Piece::Rook => Self::Rook,
            cozy_chess::Piece::Queen => Self::Queen,
            cozy_chess::Piece::King => Self::King,
        }
    }
}

impl From<PieceKind> for cozy_chess::Piece {
    fn from(p: PieceKind) -> Self {
        match p {
            PieceKind::Pawn => Self::Pawn,
            PieceKind::Knight => Self::Knight,
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Rook => Self::Rook,
            PieceKind::Queen => Self::Queen,
            PieceKind::King => Self::King,
        }
    }
}

impl From<cozy_chess::Color> for PieceColor {
    fn from(c: cozy_chess::Color) -> Self {
        match c {
            cozy_chess::Color::White => Self::White,
            cozy_chess::Color::Black => Self::Black,
        }
    }
}

impl From<PieceColor> for cozy_chess::Color {
    fn from(c: PieceColor) -> Self {
        match c {
            PieceColor::White => Self::White,
            PieceColor::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_from_char_rejects_king_and_pawn() {
        assert_eq!(PieceKind::promotion_from_char('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::promotion_from_char('Q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::promotion_from_char('k'), None);
        assert_eq!(PieceKind::promotion_from_char('p'), None);
    }

    #[test]
    fn test_figurines_by_color() {
        assert_eq!(PieceKind::Knight.figurine(PieceColor::White), '♘');
        assert_eq!(PieceKind::Knight.figurine(PieceColor::Black), '♞');
        assert_eq!(PieceKind::King.figurine(PieceColor::Black), '♚');
    }

    #[test]
    fn test_fen_side_letters() {
        assert_eq!(PieceColor::from_fen_char('w'), Some(PieceColor::White));
        assert_eq!(PieceColor::from_fen_char('b'), Some(PieceColor::Black));
        assert_eq!(PieceColor::from_fen_char('x'), None);
    }
}
