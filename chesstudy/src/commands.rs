//! Subcommand implementations. Each returns the text to print on stdout.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chess::{parse_coordinate_move, parse_pgn, DisplayBoard, PieceKind, STARTING_FEN};
use study::{GameSession, GameStatus, MoveRequest, PgnTreeLinearizer, PlayerType};

/// Player type as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerArg {
    Human,
    External,
}

impl From<PlayerArg> for PlayerType {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::Human => PlayerType::Human,
            PlayerArg::External => PlayerType::External,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("not a coordinate move: {0}")]
    UnparseableMove(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Read a PGN file and print its linearized move list.
pub fn linearize(path: &Path, json: bool) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data = parse_pgn(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    let history = PgnTreeLinearizer::convert(&data)?;
    tracing::info!(
        file = %path.display(),
        tokens = history.elements.len(),
        "Linearized PGN"
    );

    if json {
        let mut out = serde_json::to_string_pretty(&history)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(format!("{}\n", history.render_line()))
    }
}

/// Play `moves` from `fen` and report the game.
///
/// Moves for a side marked external go through the guarded external path.
/// Moves given after the game ended are ignored; a game still running at the
/// end is stopped so its PGN can be printed.
pub fn play(
    fen: Option<&str>,
    white: PlayerArg,
    black: PlayerArg,
    moves: &[String],
) -> anyhow::Result<String> {
    let mut session = GameSession::new();
    session.start_new_game(fen.unwrap_or(STARTING_FEN), white.into(), black.into())?;

    let mut out = String::new();
    for text in moves {
        if session.game_status() != GameStatus::Running {
            tracing::warn!(mv = %text, "Game already over, ignoring remaining moves");
            break;
        }
        let (from, to, promotion) = parse_coordinate_move(text)
            .ok_or_else(|| CommandError::UnparseableMove(text.clone()))?;
        let request =
            MoveRequest::between(from, to).with_promotion(promotion.unwrap_or(PieceKind::Queen));

        let san = if session.is_external_turn() {
            session.make_external_move(&request).map(|reply| reply.san)
        } else {
            session.make_move(&request)
        };
        let san = san.ok_or_else(|| CommandError::IllegalMove(text.clone()))?;
        writeln!(out, "{text}: {san}")?;
    }

    if session.game_status() == GameStatus::Running {
        session.stop_current_game();
    }
    writeln!(out, "status: {}", session.game_status())?;
    writeln!(out, "fen: {}", session.position_fen())?;
    if let Some(pgn) = session.game_pgn() {
        writeln!(out)?;
        out.push_str(pgn);
        if !pgn.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}

/// Render a position as a text board.
pub fn board(fen: Option<&str>, reversed: bool) -> anyhow::Result<String> {
    let fen = fen.unwrap_or(STARTING_FEN);
    let board = DisplayBoard::from_fen(fen).with_context(|| format!("invalid FEN: {fen}"))?;
    Ok(board.render(reversed))
}
