use chess::{PieceColor, RulesEngine};
use serde::{Deserialize, Serialize};

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Idle,
    Running,
    WhiteWin,
    BlackWin,
    DrawStalemate,
    DrawThreefold,
    DrawInsufficientMaterial,
    DrawFiftyMove,
    Stopped,
}

impl GameStatus {
    /// The game ended on the board.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Idle | Self::Running | Self::Stopped)
    }

    /// States from which a new game may start or a position may be loaded.
    pub fn is_between_games(self) -> bool {
        matches!(self, Self::Idle | Self::Stopped)
    }

    /// PGN result token for a game finalized in this state.
    pub fn result(self) -> &'static str {
        match self {
            Self::WhiteWin => "1-0",
            Self::BlackWin => "0-1",
            Self::DrawStalemate
            | Self::DrawThreefold
            | Self::DrawInsufficientMaterial
            | Self::DrawFiftyMove => "1/2-1/2",
            Self::Idle | Self::Running | Self::Stopped => "*",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::WhiteWin => "white wins",
            Self::BlackWin => "black wins",
            Self::DrawStalemate => "draw by stalemate",
            Self::DrawThreefold => "draw by threefold repetition",
            Self::DrawInsufficientMaterial => "draw by insufficient material",
            Self::DrawFiftyMove => "draw by the fifty-move rule",
            Self::Stopped => "stopped",
        };
        f.write_str(text)
    }
}

/// Who drives a side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    #[default]
    None,
    Human,
    /// Engine or remote opponent submitting moves through
    /// `make_external_move`.
    External,
}

/// Game-ending conditions, in the order they are checked after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl Termination {
    pub const PRIORITY: [Termination; 5] = [
        Self::Checkmate,
        Self::Stalemate,
        Self::ThreefoldRepetition,
        Self::InsufficientMaterial,
        Self::FiftyMoveRule,
    ];

    /// First condition that holds right after a move, if any.
    /// `occurrences` is the repetition count of the resulting position.
    pub fn detect<E: RulesEngine>(engine: &E, occurrences: u32) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|condition| condition.holds(engine, occurrences))
    }

    fn holds<E: RulesEngine>(self, engine: &E, occurrences: u32) -> bool {
        match self {
            Self::Checkmate => engine.in_checkmate(),
            Self::Stalemate => engine.in_stalemate(),
            Self::ThreefoldRepetition => occurrences >= 3,
            Self::InsufficientMaterial => engine.insufficient_material(),
            Self::FiftyMoveRule => engine.fifty_move_rule(),
        }
    }

    /// Final status, given the side that made the deciding move.
    pub fn status(self, mover: PieceColor) -> GameStatus {
        match self {
            Self::Checkmate => match mover {
                PieceColor::White => GameStatus::WhiteWin,
                PieceColor::Black => GameStatus::BlackWin,
            },
            Self::Stalemate => GameStatus::DrawStalemate,
            Self::ThreefoldRepetition => GameStatus::DrawThreefold,
            Self::InsufficientMaterial => GameStatus::DrawInsufficientMaterial,
            Self::FiftyMoveRule => GameStatus::DrawFiftyMove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::Game;

    #[test]
    fn test_results() {
        assert_eq!(GameStatus::WhiteWin.result(), "1-0");
        assert_eq!(GameStatus::BlackWin.result(), "0-1");
        assert_eq!(GameStatus::DrawFiftyMove.result(), "1/2-1/2");
        assert_eq!(GameStatus::Stopped.result(), "*");
    }

    #[test]
    fn test_terminal_and_between_games() {
        assert!(GameStatus::DrawThreefold.is_terminal());
        assert!(!GameStatus::Running.is_terminal());
        assert!(!GameStatus::Stopped.is_terminal());
        assert!(GameStatus::Idle.is_between_games());
        assert!(!GameStatus::WhiteWin.is_between_games());
    }

    #[test]
    fn test_detect_nothing_in_normal_position() {
        assert_eq!(Termination::detect(&Game::new(), 1), None);
    }

    #[test]
    fn test_stalemate_beats_insufficient_material() {
        // King and knight against a stalemated bare king.
        let game = Game::from_fen("7k/5K2/5N2/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.insufficient_material());
        assert_eq!(
            Termination::detect(&game, 1),
            Some(Termination::Stalemate)
        );
    }

    #[test]
    fn test_repetition_beats_insufficient_material_and_fifty_moves() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 90").unwrap();
        assert_eq!(
            Termination::detect(&game, 3),
            Some(Termination::ThreefoldRepetition)
        );
        assert_eq!(
            Termination::detect(&game, 2),
            Some(Termination::InsufficientMaterial)
        );
    }

    #[test]
    fn test_checkmate_status_uses_mover() {
        assert_eq!(
            Termination::Checkmate.status(PieceColor::Black),
            GameStatus::BlackWin
        );
        assert_eq!(
            Termination::Stalemate.status(PieceColor::White),
            GameStatus::DrawStalemate
        );
    }
}
