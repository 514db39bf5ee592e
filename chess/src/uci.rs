//! Coordinate move helpers (`e2e4`, `e7e8q`) and castling translation.
//!
//! Board input and UCI text both describe castling as the king moving two
//! squares (e1g1). cozy_chess encodes it as the king capturing its own rook
//! (e1h1). Everything outside the rules engine sees the standard form.

use cozy_chess::{Board, File, Move, Piece, Rank, Square};

use crate::converters::{format_piece, format_square, parse_square};
use crate::types::PieceKind;

/// Convert standard castling notation to cozy_chess notation
///
/// Standard: e1g1, e1c1, e8g8, e8c8
/// cozy_chess: e1h1, e1a1, e8h8, e8a8
///
/// The conversion is only applied when the converted move is legal, so any
/// other move comes back unchanged.
pub fn convert_uci_castling_to_cozy(mv: Move, legal_moves: &[Move]) -> Move {
    let is_rank_1_or_8 = matches!(mv.from.rank(), Rank::First | Rank::Eighth);
    let is_e_file = matches!(mv.from.file(), File::E);
    let is_g_or_c_file = matches!(mv.to.file(), File::G | File::C);

    if is_rank_1_or_8 && is_e_file && is_g_or_c_file && mv.promotion.is_none() {
        let target_square = match (mv.from.rank(), mv.to.file()) {
            (Rank::First, File::G) => Square::new(File::H, Rank::First),
            (Rank::First, File::C) => Square::new(File::A, Rank::First),
            (Rank::Eighth, File::G) => Square::new(File::H, Rank::Eighth),
            (Rank::Eighth, File::C) => Square::new(File::A, Rank::Eighth),
            _ => return mv,
        };

        let converted = Move {
            from: mv.from,
            to: target_square,
            promotion: None,
        };

        if legal_moves.contains(&converted) {
            return converted;
        }
    }

    mv
}

/// True when `mv` is a castling move in cozy_chess encoding on `board`.
pub fn is_cozy_castling(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move())
}

/// Square the king lands on, for a move in cozy_chess encoding. Identical to
/// `mv.to` for everything except castling.
pub fn standard_destination(board: &Board, mv: Move) -> Square {
    if !is_cozy_castling(board, mv) {
        return mv.to;
    }
    let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
        File::G
    } else {
        File::C
    };
    Square::new(file, mv.from.rank())
}

/// Format a move in UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_uci_move(mv: Move) -> String {
    let mut s = format!("{}{}", format_square(mv.from), format_square(mv.to));
    if let Some(promo) = mv.promotion {
        s.push(format_piece(promo));
    }
    s
}

/// Parse coordinate text like "e2e4" or "e7e8n" into squares and an
/// optional promotion piece.
pub fn parse_coordinate_move(text: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return None;
    }
    let from = parse_square(&text[0..2])?;
    let to = parse_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(c) => Some(PieceKind::promotion_from_char(c)?),
        None => None,
    };
    Some((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    #[test]
    fn test_format_uci_move() {
        let mv = Move {
            from: sq("e2"),
            to: sq("e4"),
            promotion: None,
        };
        assert_eq!(format_uci_move(mv), "e2e4");
    }

    #[test]
    fn test_format_uci_move_with_promotion() {
        let mv = Move {
            from: sq("e7"),
            to: sq("e8"),
            promotion: Some(Piece::Queen),
        };
        assert_eq!(format_uci_move(mv), "e7e8q");
    }

    #[test]
    fn test_castling_conversion_requires_legal_target() {
        let castle = Move {
            from: sq("e1"),
            to: sq("h1"),
            promotion: None,
        };
        let standard = Move {
            from: sq("e1"),
            to: sq("g1"),
            promotion: None,
        };
        assert_eq!(convert_uci_castling_to_cozy(standard, &[castle]), castle);
        assert_eq!(convert_uci_castling_to_cozy(standard, &[]), standard);
    }

    #[test]
    fn test_standard_destination_for_castling() {
        let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let short = Move {
            from: sq("e1"),
            to: sq("h1"),
            promotion: None,
        };
        let long = Move {
            from: sq("e1"),
            to: sq("a1"),
            promotion: None,
        };
        assert!(is_cozy_castling(&board, short));
        assert_eq!(standard_destination(&board, short), sq("g1"));
        assert_eq!(standard_destination(&board, long), sq("c1"));
    }

    #[test]
    fn test_parse_coordinate_move() {
        assert_eq!(
            parse_coordinate_move("e7e8n"),
            Some((sq("e7"), sq("e8"), Some(PieceKind::Knight)))
        );
        assert_eq!(parse_coordinate_move("e2e4"), Some((sq("e2"), sq("e4"), None)));
        assert_eq!(parse_coordinate_move("e7e8k"), None);
        assert_eq!(parse_coordinate_move("e2"), None);
    }
}
