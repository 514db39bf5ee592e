//! Standard Algebraic Notation on top of cozy_chess move generation.

use cozy_chess::{Board, File, Move, Piece, Rank};

use crate::converters::{format_file, format_rank, format_square, parse_file, parse_rank, parse_square};
use crate::game::{collect_legal_moves, has_legal_moves};
use crate::types::PieceKind;
use crate::uci::is_cozy_castling;

/// Parse Standard Algebraic Notation (SAN) move
///
/// Accepts check/mate markers and trailing annotation glyphs (`Nf3+!`),
/// both `O-O` and `0-0` castling, and promotions with or without `=`.
pub fn parse_san(board: &Board, san: &str) -> Result<Move, SanError> {
    let body = san
        .trim()
        .trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    if body.is_empty() {
        return Err(SanError::InvalidFormat(san.to_string()));
    }

    let legal = collect_legal_moves(board);

    if let Some(short) = castling_side(body) {
        return legal
            .into_iter()
            .find(|&mv| {
                is_cozy_castling(board, mv)
                    && ((mv.to.file() as u8) > (mv.from.file() as u8)) == short
            })
            .ok_or_else(|| SanError::NoLegalMove(san.to_string()));
    }

    let pattern = SanPattern::parse(body).ok_or_else(|| SanError::InvalidFormat(san.to_string()))?;

    let mut candidates = legal
        .into_iter()
        .filter(|&mv| !is_cozy_castling(board, mv) && pattern.matches(board, mv));

    match (candidates.next(), candidates.next()) {
        (Some(mv), None) => Ok(mv),
        (None, _) => Err(SanError::NoLegalMove(san.to_string())),
        (Some(_), Some(_)) => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

/// Format a legal move as SAN, including the check or mate marker.
pub fn format_san(board: &Board, mv: Move) -> String {
    let Some(piece) = board.piece_on(mv.from) else {
        return crate::uci::format_uci_move(mv);
    };

    let mut san = if is_cozy_castling(board, mv) {
        if (mv.to.file() as u8) > (mv.from.file() as u8) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        format_plain_move(board, mv, piece)
    };

    let mut after = board.clone();
    after.play_unchecked(mv);
    if !after.checkers().is_empty() {
        san.push(if has_legal_moves(&after) { '+' } else { '#' });
    }

    san
}

fn format_plain_move(board: &Board, mv: Move, piece: Piece) -> String {
    let mut san = String::new();
    let is_capture =
        board.color_on(mv.to).is_some() || (piece == Piece::Pawn && mv.from.file() != mv.to.file());

    if piece == Piece::Pawn {
        if is_capture {
            san.push(format_file(mv.from.file()));
        }
    } else {
        san.push(PieceKind::from(piece).to_char_upper());
        san.push_str(&disambiguation(board, mv, piece));
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&format_square(mv.to));

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(PieceKind::from(promo).to_char_upper());
    }

    san
}

/// Minimal origin hint when another piece of the same kind can reach the
/// same square: file first, then rank, then the full square.
fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Move> = collect_legal_moves(board)
        .into_iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && board.piece_on(other.from) == Some(piece)
                && !is_cozy_castling(board, *other)
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|r| r.from.file() != mv.from.file()) {
        return format_file(mv.from.file()).to_string();
    }
    if rivals.iter().all(|r| r.from.rank() != mv.from.rank()) {
        return format_rank(mv.from.rank()).to_string();
    }
    format_square(mv.from)
}

fn castling_side(body: &str) -> Option<bool> {
    match body {
        "O-O" | "0-0" => Some(true),
        "O-O-O" | "0-0-0" => Some(false),
        _ => None,
    }
}

/// The constraints a non-castling SAN string places on a legal move.
struct SanPattern {
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to: cozy_chess::Square,
    promotion: Option<Piece>,
}

impl SanPattern {
    fn parse(body: &str) -> Option<Self> {
        let mut chars: Vec<char> = body.chars().filter(|&c| c != 'x' && c != ':').collect();

        let mut promotion = None;
        if let Some(&last) = chars.last() {
            if last.is_ascii_uppercase() {
                promotion = Some(PieceKind::promotion_from_char(last)?.into());
                chars.pop();
                if chars.last() == Some(&'=') {
                    chars.pop();
                }
            }
        }

        let piece = match chars.first() {
            Some(&c) if c.is_ascii_uppercase() => {
                let kind = PieceKind::from_char(c)?;
                chars.remove(0);
                kind.into()
            }
            _ => Piece::Pawn,
        };

        if chars.len() < 2 || chars.len() > 4 {
            return None;
        }
        let split = chars.len() - 2;
        let to: String = chars[split..].iter().collect();
        let to = parse_square(&to)?;

        let mut from_file = None;
        let mut from_rank = None;
        for &c in &chars[..split] {
            if let Some(file) = parse_file(c) {
                from_file = Some(file);
            } else if let Some(rank) = parse_rank(c) {
                from_rank = Some(rank);
            } else {
                return None;
            }
        }

        Some(Self {
            piece,
            from_file,
            from_rank,
            to,
            promotion,
        })
    }

    fn matches(&self, board: &Board, mv: Move) -> bool {
        mv.to == self.to
            && board.piece_on(mv.from) == Some(self.piece)
            && mv.promotion == self.promotion
            && self.from_file.map_or(true, |f| mv.from.file() == f)
            && self.from_rank.map_or(true, |r| mv.from.rank() == r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanError {
    #[error("No legal move found for: {0}")]
    NoLegalMove(String),
    #[error("Ambiguous move: {0}")]
    AmbiguousMove(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::parse_square;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move {
            from: parse_square(from).unwrap(),
            to: parse_square(to).unwrap(),
            promotion: None,
        }
    }

    #[test]
    fn test_parse_pawn_and_piece_moves() {
        let b = Board::default();
        assert_eq!(parse_san(&b, "e4").unwrap(), mv("e2", "e4"));
        assert_eq!(parse_san(&b, "Nf3").unwrap(), mv("g1", "f3"));
        assert_eq!(parse_san(&b, "Nf3!?").unwrap(), mv("g1", "f3"));
    }

    #[test]
    fn test_parse_rejects_illegal_and_garbage() {
        let b = Board::default();
        assert_eq!(
            parse_san(&b, "e5"),
            Err(SanError::NoLegalMove("e5".to_string()))
        );
        assert_eq!(
            parse_san(&b, "Zz9"),
            Err(SanError::InvalidFormat("Zz9".to_string()))
        );
        assert!(parse_san(&b, "").is_err());
    }

    #[test]
    fn test_parse_disambiguation() {
        // Knights on b1 and f1 can both reach d2.
        let b = board("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(
            parse_san(&b, "Nd2"),
            Err(SanError::AmbiguousMove("Nd2".to_string()))
        );
        assert_eq!(parse_san(&b, "Nbd2").unwrap(), mv("b1", "d2"));
        assert_eq!(parse_san(&b, "Nfd2").unwrap(), mv("f1", "d2"));
        assert_eq!(format_san(&b, mv("b1", "d2")), "Nbd2");
    }

    #[test]
    fn test_castling_round_trip() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let short = parse_san(&b, "O-O").unwrap();
        assert_eq!(short, mv("e1", "h1"));
        assert_eq!(format_san(&b, short), "O-O");
        let long = parse_san(&b, "0-0-0").unwrap();
        assert_eq!(format_san(&b, long), "O-O-O");
    }

    #[test]
    fn test_promotion_formats_and_parses() {
        let b = board("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let promo = parse_san(&b, "e8=N").unwrap();
        assert_eq!(promo.promotion, Some(Piece::Knight));
        assert_eq!(parse_san(&b, "e8Q").unwrap().promotion, Some(Piece::Queen));
        assert_eq!(format_san(&b, promo), "e8=N");
        assert!(parse_san(&b, "e8=K").is_err());
    }

    #[test]
    fn test_capture_check_and_mate_markers() {
        // Scholar's mate final move.
        let b = board("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
        let mate = parse_san(&b, "Qxf7#").unwrap();
        assert_eq!(format_san(&b, mate), "Qxf7#");

        let b = board("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
        assert_eq!(format_san(&b, mv("h1", "h8")), "Rh8+");
    }

    #[test]
    fn test_en_passant_is_a_capture() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep = parse_san(&b, "exd6").unwrap();
        assert_eq!(ep, mv("e5", "d6"));
        assert_eq!(format_san(&b, ep), "exd6");
    }
}
