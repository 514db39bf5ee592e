//! One live game: position, turn arbitration between human and external
//! players, termination detection and PGN finalization.

pub mod repetition;
pub mod request;
pub mod status;

use chess::{Game, PieceColor, PieceKind, PlayedMove, RulesEngine};

use crate::config::SessionConfig;
pub use repetition::RepetitionTable;
pub use request::{ExternalMove, MoveRequest};
pub use status::{GameStatus, PlayerType, Termination};

/// Game state machine driving a [`RulesEngine`].
///
/// Calls must be serialized by the caller; every method completes its state
/// change before returning.
#[derive(Debug, Clone)]
pub struct GameSession<E: RulesEngine = Game> {
    engine: E,
    status: GameStatus,
    white_player: PlayerType,
    black_player: PlayerType,
    repetitions: RepetitionTable,
    moves: Vec<String>,
    pgn: Option<String>,
    config: SessionConfig,
}

impl GameSession<Game> {
    /// Idle session on the standard position, headers from the environment.
    pub fn new() -> Self {
        Self::with_engine(Game::new(), SessionConfig::from_env())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_engine(Game::new(), config)
    }
}

impl Default for GameSession<Game> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RulesEngine> GameSession<E> {
    /// Idle session positioned wherever `engine` stands.
    pub fn with_engine(engine: E, config: SessionConfig) -> Self {
        Self {
            engine,
            status: GameStatus::Idle,
            white_player: PlayerType::None,
            black_player: PlayerType::None,
            repetitions: RepetitionTable::new(),
            moves: Vec::new(),
            pgn: None,
            config,
        }
    }

    /// Start a game from `fen`. Only allowed while idle or stopped.
    pub fn start_new_game(
        &mut self,
        fen: &str,
        white: PlayerType,
        black: PlayerType,
    ) -> Result<(), SessionError> {
        if !self.status.is_between_games() {
            return Err(SessionError::GameInProgress(self.status));
        }
        let engine = E::from_fen(fen).map_err(|e| SessionError::InvalidFen(e.to_string()))?;

        self.engine = engine;
        self.repetitions.clear();
        self.repetitions.record(&self.engine.fen());
        self.moves.clear();
        self.pgn = None;
        self.white_player = white;
        self.black_player = black;
        self.status = GameStatus::Running;
        tracing::info!(%fen, ?white, ?black, "Game started");
        Ok(())
    }

    /// Stop the game. A running game is finalized with result `*`; the PGN of
    /// a game that already ended stays as it was.
    pub fn stop_current_game(&mut self) {
        let was_running = self.status == GameStatus::Running;
        self.status = GameStatus::Stopped;
        if was_running {
            self.finalize();
        }
        self.white_player = PlayerType::None;
        self.black_player = PlayerType::None;
        tracing::info!(was_running, "Game stopped");
    }

    /// Play a move for the side to move. Returns its SAN, or `None` when the
    /// move is illegal or no game is running.
    pub fn make_move(&mut self, request: &MoveRequest) -> Option<String> {
        self.play(request).map(|played| played.san)
    }

    /// Play a move on behalf of the external side. Ignored unless it is that
    /// side's turn and the move is legal.
    pub fn make_external_move(&mut self, request: &MoveRequest) -> Option<ExternalMove> {
        if !self.is_external_turn() {
            tracing::debug!(?request, "Ignoring external move: not the external side's turn");
            return None;
        }
        if !self.is_legal_move(request) {
            tracing::debug!(?request, "Ignoring illegal external move");
            return None;
        }

        let played = self.play(request)?;
        Some(ExternalMove {
            last_move_arrow: played.arrow(),
            san: played.san,
            position_fen: self.engine.fen(),
        })
    }

    /// Whether `request` is legal in the current position. Never changes the
    /// session.
    pub fn is_legal_move(&self, request: &MoveRequest) -> bool {
        let Some((from, to)) = request.squares() else {
            return false;
        };
        match E::from_fen(&self.engine.fen()) {
            Ok(mut scratch) => scratch.try_move(from, to, Some(request.promotion)).is_some(),
            Err(_) => false,
        }
    }

    /// A pawn heading for the farthest rank of the side to move.
    pub fn is_promotion_move(&self, request: &MoveRequest) -> bool {
        let Some((from, _)) = request.squares() else {
            return false;
        };
        matches!(self.engine.piece_at(from), Some((PieceKind::Pawn, _)))
            && request.end_rank == self.engine.turn().promotion_rank()
    }

    pub fn is_white_turn(&self) -> bool {
        self.engine.turn() == PieceColor::White
    }

    pub fn player_type(&self, side: PieceColor) -> PlayerType {
        match side {
            PieceColor::White => self.white_player,
            PieceColor::Black => self.black_player,
        }
    }

    pub fn is_human_turn(&self) -> bool {
        self.player_type(self.engine.turn()) == PlayerType::Human
    }

    pub fn is_external_turn(&self) -> bool {
        self.player_type(self.engine.turn()) == PlayerType::External
    }

    pub fn game_status(&self) -> GameStatus {
        self.status
    }

    pub fn position_fen(&self) -> String {
        self.engine.fen()
    }

    /// Load a position between games. Rejected while idle or running, and
    /// for FEN text the rules engine refuses.
    pub fn try_to_setup_position_fen(&mut self, fen: &str) -> bool {
        if matches!(self.status, GameStatus::Idle | GameStatus::Running) {
            tracing::debug!(status = %self.status, "Ignoring position setup outside the setup window");
            return false;
        }
        if !self.engine.load(fen) {
            tracing::debug!(%fen, "Rejected position setup");
            return false;
        }
        true
    }

    /// PGN of the last finished game, frozen when it ended.
    pub fn game_pgn(&self) -> Option<&str> {
        self.pgn.as_deref()
    }

    /// SAN of every move played since the game started.
    pub fn history(&self) -> &[String] {
        &self.moves
    }

    /// How often the position in `fen` occurred since the game started.
    pub fn occurrences(&self, fen: &str) -> u32 {
        self.repetitions.count(fen)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn play(&mut self, request: &MoveRequest) -> Option<PlayedMove> {
        if self.status != GameStatus::Running {
            tracing::debug!(status = %self.status, "Ignoring move: no game running");
            return None;
        }
        let (from, to) = request.squares()?;
        let mover = self.engine.turn();
        let Some(played) = self.engine.try_move(from, to, Some(request.promotion)) else {
            tracing::debug!(?request, "Rejected illegal move");
            return None;
        };

        let fen = self.engine.fen();
        let occurrences = self.repetitions.record(&fen);
        self.moves.push(played.san.clone());
        tracing::debug!(san = %played.san, %fen, occurrences, "Move played");

        if let Some(termination) = Termination::detect(&self.engine, occurrences) {
            self.status = termination.status(mover);
            tracing::info!(status = %self.status, ?termination, "Game over");
            self.finalize();
        }
        Some(played)
    }

    fn finalize(&mut self) {
        let date = chrono::Local::now().format("%Y.%m.%d").to_string();
        let white = self.player_label(PieceColor::White).to_string();
        let black = self.player_label(PieceColor::Black).to_string();
        let event = self.config.event.clone();
        let site = self.config.site.clone();

        self.engine.set_header("Event", &event);
        self.engine.set_header("Site", &site);
        self.engine.set_header("Date", &date);
        self.engine.set_header("White", &white);
        self.engine.set_header("Black", &black);
        self.engine.set_header("Result", self.status.result());
        self.pgn = Some(self.engine.pgn());
    }

    fn player_label(&self, side: PieceColor) -> &str {
        if self.player_type(side) == PlayerType::Human {
            &self.config.human_label
        } else {
            &self.config.external_label
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
    #[error("A game is already in progress ({0})")]
    GameInProgress(GameStatus),
}
