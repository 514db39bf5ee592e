pub mod config;
pub mod input;
pub mod linearizer;
pub mod session;

pub use config::SessionConfig;
pub use input::{DragController, DragOutcome, DragState};
pub use linearizer::{LinearizeError, PgnHistory, PgnToken, PgnTreeLinearizer};
pub use session::{
    ExternalMove, GameSession, GameStatus, MoveRequest, PlayerType, RepetitionTable, SessionError,
    Termination,
};
