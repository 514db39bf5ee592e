use cozy_chess::{Board, Color, Move, Piece, Rank, Square};
use tracing::trace;

use crate::fen::{self, FenError, STARTING_FEN};
use crate::pgn::san::{format_san, parse_san};
use crate::pgn::writer::write_pgn;
use crate::rules::{PlayedMove, RulesEngine};
use crate::types::{PieceColor, PieceKind};
use crate::uci::{convert_uci_castling_to_cozy, format_uci_move, standard_destination};

/// Main game state wrapper around cozy-chess Board
#[derive(Debug, Clone)]
pub struct Game {
    position: Board,
    history: Vec<HistoryEntry>,
    pgn_tags: Vec<(String, String)>,
    start_position: StartPosition,
}

/// Record of one played move
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub from: Square,
    pub to: Square,                // Landing square (g1/c1 when castling)
    pub promotion: Option<Piece>,  // Promotion piece if any
    pub san: String,               // Standard Algebraic Notation
    pub fen: String,               // FEN after this move
}

/// Starting position of the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPosition {
    Standard,
    Fen(String),
}

impl StartPosition {
    pub fn fen(&self) -> &str {
        match self {
            Self::Standard => STARTING_FEN,
            Self::Fen(fen) => fen,
        }
    }

    fn board(&self) -> Result<Board, FenError> {
        match self {
            Self::Standard => Ok(Board::default()),
            Self::Fen(fen) => fen::parse_fen(fen),
        }
    }
}

impl Game {
    /// Create a new game from the standard starting position
    pub fn new() -> Self {
        Self {
            position: Board::default(),
            history: Vec::new(),
            pgn_tags: Vec::new(),
            start_position: StartPosition::Standard,
        }
    }

    /// Create a game from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let position = fen::parse_fen(fen)?;
        let normalized = fen::format_fen(&position);
        let start_position = if normalized == STARTING_FEN {
            StartPosition::Standard
        } else {
            StartPosition::Fen(normalized)
        };
        Ok(Self {
            position,
            history: Vec::new(),
            pgn_tags: Vec::new(),
            start_position,
        })
    }

    /// Get the current board position
    pub fn position(&self) -> &Board {
        &self.position
    }

    pub fn start_position(&self) -> &StartPosition {
        &self.start_position
    }

    /// Get the move history
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Header tags in insertion order
    pub fn headers(&self) -> &[(String, String)] {
        &self.pgn_tags
    }

    /// Make a move on the board
    pub fn make_move(&mut self, mv: Move) -> Result<HistoryEntry, GameError> {
        if !self.legal_moves().contains(&mv) {
            return Err(GameError::IllegalMove(format_uci_move(mv)));
        }

        let to = standard_destination(&self.position, mv);

        // SAN depends on the position before the move
        let san = format_san(&self.position, mv);

        self.position.play_unchecked(mv);
        let fen = self.to_fen();
        trace!(%san, %fen, "move played");

        let entry = HistoryEntry {
            mv,
            from: mv.from,
            to,
            promotion: mv.promotion,
            san,
            fen,
        };

        self.history.push(entry.clone());

        Ok(entry)
    }

    /// Undo the last move
    pub fn undo(&mut self) -> Result<HistoryEntry, GameError> {
        let entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.rebuild_position()?;
        Ok(entry)
    }

    /// Get all legal moves for the current position
    pub fn legal_moves(&self) -> Vec<Move> {
        collect_legal_moves(&self.position)
    }

    /// Get the side to move
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Export position to FEN string
    pub fn to_fen(&self) -> String {
        fen::format_fen(&self.position)
    }

    /// Rebuild position from start + history (for undo)
    fn rebuild_position(&mut self) -> Result<(), GameError> {
        let mut board = self.start_position.board()?;
        for entry in &self.history {
            board.play_unchecked(entry.mv);
        }
        self.position = board;
        Ok(())
    }

    fn record(entry: HistoryEntry) -> PlayedMove {
        PlayedMove {
            san: entry.san,
            from: entry.from,
            to: entry.to,
            promotion: entry.promotion.map(PieceKind::from),
        }
    }
}

impl RulesEngine for Game {
    fn from_fen(fen: &str) -> Result<Self, GameError> {
        Game::from_fen(fen)
    }

    fn try_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<PlayedMove> {
        let piece = self.position.piece_on(from)?;
        let reaches_last_rank = matches!(to.rank(), Rank::First | Rank::Eighth);
        let promotion = if piece == Piece::Pawn && reaches_last_rank {
            Some(promotion.unwrap_or(PieceKind::Queen).into())
        } else {
            None
        };

        let legal = self.legal_moves();
        let mv = convert_uci_castling_to_cozy(Move { from, to, promotion }, &legal);
        self.make_move(mv).ok().map(Self::record)
    }

    fn play_san(&mut self, san: &str) -> Option<PlayedMove> {
        let mv = parse_san(&self.position, san).ok()?;
        self.make_move(mv).ok().map(Self::record)
    }

    fn fen(&self) -> String {
        self.to_fen()
    }

    fn turn(&self) -> PieceColor {
        self.position.side_to_move().into()
    }

    fn piece_at(&self, square: Square) -> Option<(PieceKind, PieceColor)> {
        let piece = self.position.piece_on(square)?;
        let color = self.position.color_on(square)?;
        Some((piece.into(), color.into()))
    }

    fn in_check(&self) -> bool {
        !self.position.checkers().is_empty()
    }

    fn in_checkmate(&self) -> bool {
        self.in_check() && !has_legal_moves(&self.position)
    }

    fn in_stalemate(&self) -> bool {
        !self.in_check() && !has_legal_moves(&self.position)
    }

    fn in_threefold_repetition(&self) -> bool {
        let current = fen::reduced_key(&self.to_fen());
        let start = fen::reduced_key(self.start_position.fen());
        let occurrences = std::iter::once(start)
            .chain(self.history.iter().map(|e| fen::reduced_key(&e.fen)))
            .filter(|key| *key == current)
            .count();
        occurrences >= 3
    }

    fn insufficient_material(&self) -> bool {
        insufficient_material(&self.position)
    }

    fn fifty_move_rule(&self) -> bool {
        self.position.halfmove_clock() >= 100
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self.pgn_tags.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.pgn_tags.push((name.to_string(), value.to_string())),
        }
    }

    fn pgn(&self) -> String {
        let start = match &self.start_position {
            StartPosition::Standard => None,
            StartPosition::Fen(fen) => Some(fen.as_str()),
        };
        let moves: Vec<&str> = self.history.iter().map(|e| e.san.as_str()).collect();
        write_pgn(&self.pgn_tags, start, &moves)
    }

    fn load(&mut self, fen: &str) -> bool {
        match Game::from_fen(fen) {
            Ok(game) => {
                *self = game;
                true
            }
            Err(err) => {
                trace!(%fen, %err, "rejected FEN");
                false
            }
        }
    }
}

/// All legal moves of `board`, castling in cozy_chess encoding.
pub(crate) fn collect_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|mvs| {
        moves.extend(mvs);
        false
    });
    moves
}

pub(crate) fn has_legal_moves(board: &Board) -> bool {
    let mut found = false;
    board.generate_moves(|mvs| {
        found = mvs.into_iter().next().is_some();
        found
    });
    found
}

/// No sequence of legal moves can produce mate: bare kings, a single minor
/// piece, or bishops that all stand on one square color.
fn insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }

    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);
    if knights.len() + bishops.len() <= 1 {
        return true;
    }
    if !knights.is_empty() {
        return false;
    }

    let light = bishops
        .into_iter()
        .filter(|sq| (sq.file() as u8 + sq.rank() as u8) % 2 == 1)
        .count();
    light == 0 || light == bishops.len() as usize
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("FEN parse error: {0}")]
    FenError(#[from] FenError),
}
