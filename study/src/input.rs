//! Drag-and-drop move input on a board widget.
//!
//! Pixel positions are resolved to cells, the dragged piece is checked
//! against the side to move, and a drop becomes a [`MoveRequest`] for the
//! session. A drop onto the last rank parks the move until the promotion
//! piece is chosen.

use chess::coords::cell_size;
use chess::{pixel_to_cell, BoardCell, DisplayBoard, MoveArrow, PieceColor, PieceKind, RulesEngine};

use crate::session::{GameSession, MoveRequest};

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub start: BoardCell,
    /// Cell under the pointer, `None` while it is off the squares.
    pub end: Option<BoardCell>,
    /// Top-left corner for drawing the dragged piece.
    pub piece_x: f64,
    pub piece_y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was in progress, or the piece was dropped off the board.
    Ignored,
    /// The drop was handled; `san` is `None` when the move was illegal.
    Played { san: Option<String>, arrow: MoveArrow },
    /// A legal promotion awaits [`DragController::terminate_promotion`].
    PromotionPending { arrow: MoveArrow },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    drag: Option<DragState>,
    pending_promotion: Option<MoveRequest>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn pending_promotion(&self) -> Option<&MoveRequest> {
        self.pending_promotion.as_ref()
    }

    /// Begin dragging the piece under `(x, y)`. Returns `false` (and starts
    /// nothing) off the squares, on an empty cell, or on a piece of the
    /// side not to move.
    pub fn drag_start(
        &mut self,
        x: f64,
        y: f64,
        board_px: f64,
        reversed: bool,
        board: &DisplayBoard,
        white_turn: bool,
    ) -> bool {
        let Some(cell) = pixel_to_cell(x, y, board_px, reversed) else {
            return false;
        };
        let side = if white_turn {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        if !board.has_piece_of(cell.file, cell.rank, side) {
            return false;
        }

        let half = cell_size(board_px) * 0.5;
        self.drag = Some(DragState {
            start: cell,
            end: Some(cell),
            piece_x: x - half,
            piece_y: y - half,
        });
        true
    }

    pub fn drag_move(&mut self, x: f64, y: f64, board_px: f64, reversed: bool) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let half = cell_size(board_px) * 0.5;
        drag.end = pixel_to_cell(x, y, board_px, reversed);
        drag.piece_x = x - half;
        drag.piece_y = y - half;
    }

    /// Drop the piece and try the move on `session`.
    pub fn drag_end<E: RulesEngine>(&mut self, session: &mut GameSession<E>) -> DragOutcome {
        let Some(drag) = self.drag else {
            return DragOutcome::Ignored;
        };
        let Some(end) = drag.end else {
            tracing::debug!("Piece dropped off the board");
            self.drag = None;
            return DragOutcome::Ignored;
        };

        let request = MoveRequest::new(drag.start.file, drag.start.rank, end.file, end.rank);
        let arrow = MoveArrow::between(drag.start.square(), end.square());

        let mut san = None;
        if session.is_legal_move(&request) {
            if session.is_promotion_move(&request) {
                self.pending_promotion = Some(request);
                return DragOutcome::PromotionPending { arrow };
            }
            san = session.make_move(&request);
        }
        self.drag = None;
        DragOutcome::Played { san, arrow }
    }

    /// Play the parked promotion with `piece`. `None` when nothing was
    /// pending or the session refused the move.
    pub fn terminate_promotion<E: RulesEngine>(
        &mut self,
        piece: PieceKind,
        session: &mut GameSession<E>,
    ) -> Option<String> {
        let request = self.pending_promotion.take()?.with_promotion(piece);
        self.drag = None;
        session.make_move(&request)
    }

    pub fn drag_cancel(&mut self) {
        self.drag = None;
    }
}
