//! Conversions between cozy-chess squares and the 0-7 file/rank indices and
//! algebraic text used everywhere else in the project.

use cozy_chess::{File, Piece, Rank, Square};

/// Build a square from 0-based file/rank indices. `None` when either index
/// is off the board.
pub fn square_from_indices(file: u8, rank: u8) -> Option<Square> {
    Some(Square::new(file_from_index(file)?, rank_from_index(rank)?))
}

/// 0-based (file, rank) indices of a square.
pub fn square_indices(sq: Square) -> (u8, u8) {
    (sq.file() as u8, sq.rank() as u8)
}

pub fn file_from_index(index: u8) -> Option<File> {
    match index {
        0 => Some(File::A),
        1 => Some(File::B),
        2 => Some(File::C),
        3 => Some(File::D),
        4 => Some(File::E),
        5 => Some(File::F),
        6 => Some(File::G),
        7 => Some(File::H),
        _ => None,
    }
}

pub fn rank_from_index(index: u8) -> Option<Rank> {
    match index {
        0 => Some(Rank::First),
        1 => Some(Rank::Second),
        2 => Some(Rank::Third),
        3 => Some(Rank::Fourth),
        4 => Some(Rank::Fifth),
        5 => Some(Rank::Sixth),
        6 => Some(Rank::Seventh),
        7 => Some(Rank::Eighth),
        _ => None,
    }
}

/// Parse a square string like "e2".
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars = s.chars();
    let file = parse_file(chars.next()?)?;
    let rank = parse_rank(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Square::new(file, rank))
}

pub fn parse_file(c: char) -> Option<File> {
    match c {
        'a'..='h' => file_from_index(c as u8 - b'a'),
        _ => None,
    }
}

pub fn parse_rank(c: char) -> Option<Rank> {
    match c {
        '1'..='8' => rank_from_index(c as u8 - b'1'),
        _ => None,
    }
}

/// Format a square like "e2".
pub fn format_square(sq: Square) -> String {
    format!("{}{}", format_file(sq.file()), format_rank(sq.rank()))
}

pub fn format_file(f: File) -> char {
    (b'a' + f as u8) as char
}

pub fn format_rank(r: Rank) -> char {
    (b'1' + r as u8) as char
}

/// Lowercase piece letter, as used in UCI promotion suffixes.
pub fn format_piece(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_from_indices() {
        assert_eq!(
            square_from_indices(4, 1),
            Some(Square::new(File::E, Rank::Second))
        );
        assert_eq!(square_from_indices(8, 0), None);
        assert_eq!(square_from_indices(0, 8), None);
    }

    #[test]
    fn test_square_indices_round_trip() {
        let sq = Square::new(File::G, Rank::Seventh);
        let (file, rank) = square_indices(sq);
        assert_eq!((file, rank), (6, 6));
        assert_eq!(square_from_indices(file, rank), Some(sq));
    }

    #[test]
    fn test_parse_and_format_square() {
        let sq = parse_square("h8").unwrap();
        assert_eq!(format_square(sq), "h8");
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a10"), None);
        assert_eq!(parse_square(""), None);
    }
}
