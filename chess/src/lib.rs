pub mod board_display;
pub mod converters;
pub mod coords;
pub mod fen;
pub mod game;
pub mod notation;
pub mod pgn;
pub mod rules;
pub mod types;
pub mod uci;

pub use board_display::{DisplayBoard, DisplayBoardError};
pub use converters::*;
pub use coords::{pixel_to_cell, BoardCell};
pub use fen::{FenError, STARTING_FEN};
pub use game::{Game, GameError, HistoryEntry, StartPosition};
pub use notation::{append_nags, nag_to_symbol, san_to_fan};
pub use pgn::{parse_pgn, MoveNode, PgnData, PgnError, PgnHeader, Variation};
pub use rules::{MoveArrow, PlayedMove, RulesEngine};
pub use types::{PieceColor, PieceKind};
pub use uci::{convert_uci_castling_to_cozy, format_uci_move, parse_coordinate_move};
