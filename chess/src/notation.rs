//! Display transforms for move text: figurine notation and NAG symbols.

use crate::types::{PieceColor, PieceKind};

/// Replace the piece letters of a SAN string with figurines of `mover`'s
/// color (FAN). Every K, Q, R, B and N is substituted, promotion suffix
/// included; pawn moves and castling pass through unchanged.
pub fn san_to_fan(san: &str, mover: PieceColor) -> String {
    san.chars()
        .map(|c| match c {
            'K' | 'Q' | 'R' | 'B' | 'N' => PieceKind::from_char(c)
                .map_or(c, |kind| kind.figurine(mover)),
            _ => c,
        })
        .collect()
}

/// Display symbol for a NAG code such as `$1`. Codes without a symbol are
/// returned as written.
pub fn nag_to_symbol(nag: &str) -> &str {
    match nag {
        "$1" => "!",
        "$2" => "?",
        "$3" => "\u{203C}",
        "$4" => "\u{2047}",
        "$5" => "\u{2049}",
        "$6" => "\u{2048}",
        "$7" => "\u{25A1}",
        "$10" => "=",
        "$13" => "\u{221E}",
        "$14" => "\u{2A72}",
        "$15" => "\u{2A71}",
        "$16" => "\u{00B1}",
        "$17" => "\u{2213}",
        "$18" => "+-",
        "$19" => "-+",
        "$22" | "$23" => "\u{2A00}",
        "$32" | "$33" => "\u{27F3}",
        "$36" | "$37" => "\u{2192}",
        "$40" | "$41" => "\u{2191}",
        "$45" | "$46" => "\u{2A73}",
        "$131" | "$132" => "\u{21C6}",
        "$138" | "$139" => "\u{2A01}",
        other => other,
    }
}

/// Append the symbols of `nags`, in order, to `text`.
pub fn append_nags<S: AsRef<str>>(mut text: String, nags: &[S]) -> String {
    for nag in nags {
        text.push_str(nag_to_symbol(nag.as_ref()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_san_to_fan_by_mover() {
        assert_eq!(san_to_fan("Nf3", PieceColor::White), "♘f3");
        assert_eq!(san_to_fan("Nf6", PieceColor::Black), "♞f6");
        assert_eq!(san_to_fan("Qxf7#", PieceColor::White), "♕xf7#");
        assert_eq!(san_to_fan("exd8=Q+", PieceColor::White), "exd8=♕+");
        assert_eq!(san_to_fan("Rbd1", PieceColor::Black), "♜bd1");
    }

    #[test]
    fn test_san_to_fan_leaves_pawns_and_castling() {
        assert_eq!(san_to_fan("e4", PieceColor::White), "e4");
        assert_eq!(san_to_fan("O-O-O", PieceColor::Black), "O-O-O");
    }

    #[test]
    fn test_nag_symbols() {
        assert_eq!(nag_to_symbol("$1"), "!");
        assert_eq!(nag_to_symbol("$3"), "‼");
        assert_eq!(nag_to_symbol("$18"), "+-");
        assert_eq!(nag_to_symbol("$23"), "⨀");
        assert_eq!(nag_to_symbol("$999"), "$999");
    }

    #[test]
    fn test_append_nags_in_order() {
        let text = append_nags("♘f3".to_string(), &["$1", "$14"]);
        assert_eq!(text, "♘f3!⩲");
        assert_eq!(append_nags::<&str>("e4".to_string(), &[]), "e4");
    }

    proptest! {
        #[test]
        fn prop_fan_removes_piece_letters(san in "[KQRBNa-h1-8x=+#]{1,8}") {
            for color in [PieceColor::White, PieceColor::Black] {
                let fan = san_to_fan(&san, color);
                prop_assert!(!fan.contains(|c| matches!(c, 'K' | 'Q' | 'R' | 'B' | 'N')));
                prop_assert_eq!(fan.chars().count(), san.chars().count());
            }
        }
    }
}
