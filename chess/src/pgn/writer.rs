//! PGN export.

use crate::fen;

const LINE_WIDTH: usize = 80;

/// Render header tags and SAN moves as PGN text.
///
/// `start_fen` is the non-standard starting position, if any; it adds the
/// `SetUp`/`FEN` pair unless the caller already set a `FEN` tag. The result
/// token is taken from the `Result` tag and defaults to `*`.
pub fn write_pgn(tags: &[(String, String)], start_fen: Option<&str>, moves: &[&str]) -> String {
    let mut out = String::new();

    for (name, value) in tags {
        push_tag(&mut out, name, value);
    }
    if let Some(fen) = start_fen {
        if !tags.iter().any(|(name, _)| name == "FEN") {
            push_tag(&mut out, "SetUp", "1");
            push_tag(&mut out, "FEN", fen);
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }

    let result = tags
        .iter()
        .find(|(name, _)| name == "Result")
        .map_or("*", |(_, value)| value.as_str());

    let start = start_fen.unwrap_or(fen::STARTING_FEN);
    let mut move_number = fen::fullmove_number(start);
    let mut white = fen::side_to_move(start) != Some(crate::PieceColor::Black);

    let mut tokens = Vec::with_capacity(moves.len() * 3 / 2 + 1);
    for (i, san) in moves.iter().enumerate() {
        if white {
            tokens.push(format!("{move_number}."));
        } else if i == 0 {
            tokens.push(format!("{move_number}..."));
        }
        tokens.push((*san).to_string());
        if !white {
            move_number += 1;
        }
        white = !white;
    }
    tokens.push(result.to_string());

    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        line_len += token.len();
        out.push_str(&token);
    }
    out.push('\n');

    out
}

fn push_tag(out: &mut String, name: &str, value: &str) {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    out.push_str(&format!("[{name} \"{escaped}\"]\n"));
}
