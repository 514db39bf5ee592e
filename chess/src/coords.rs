//! Board geometry: pixel positions to cells, orientation and edge labels.
//!
//! The board is drawn as a 9x9 grid of equal cells: the 8x8 squares plus a
//! half-cell border on every side for the coordinate labels.

use cozy_chess::Square;

use crate::converters::square_from_indices;

/// A board cell as 0-based file and rank indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardCell {
    pub file: u8,
    pub rank: u8,
}

impl BoardCell {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn square(self) -> Square {
        // Fields are range-checked on construction.
        square_from_indices(self.file, self.rank).unwrap_or(Square::A1)
    }
}

pub fn cell_size(board_px: f64) -> f64 {
    board_px / 9.0
}

/// Font size, in whole pixels, for the edge coordinate labels.
pub fn coordinates_font_size(board_px: f64) -> u32 {
    (cell_size(board_px) * 0.4).floor().max(0.0) as u32
}

/// Resolve a pixel offset inside the board widget to a cell.
///
/// Returns `None` for points on the border or outside the board; callers
/// must drop such input instead of attempting a move.
pub fn pixel_to_cell(x: f64, y: f64, board_px: f64, reversed: bool) -> Option<BoardCell> {
    if !(board_px > 0.0) || !x.is_finite() || !y.is_finite() {
        return None;
    }
    let cell = cell_size(board_px);
    let col = ((x - cell * 0.5) / cell).floor();
    let row = ((y - cell * 0.5) / cell).floor();
    if !(0.0..8.0).contains(&col) || !(0.0..8.0).contains(&row) {
        return None;
    }

    let (col, row) = (col as u8, row as u8);
    let file = if reversed { 7 - col } else { col };
    let rank = if reversed { row } else { 7 - row };
    BoardCell::new(file, rank)
}

/// Board file shown in grid column `col` (0 = leftmost).
pub fn to_file(col: u8, reversed: bool) -> u8 {
    if reversed {
        7 - col.min(7)
    } else {
        col
    }
}

/// Index into a top-down grid of ranks for row `row` (0 = top).
pub fn to_rank(row: u8, reversed: bool) -> u8 {
    if reversed {
        7 - row.min(7)
    } else {
        row
    }
}

/// Letter printed under grid column `col`.
pub fn edge_file_label(col: u8, reversed: bool) -> Option<char> {
    let labels = if reversed { "HGFEDCBA" } else { "ABCDEFGH" };
    labels.chars().nth(col as usize)
}

/// Digit printed beside grid row `row`.
pub fn edge_rank_label(row: u8, reversed: bool) -> Option<char> {
    let labels = if reversed { "12345678" } else { "87654321" };
    labels.chars().nth(row as usize)
}

pub fn is_light_cell(row: u8, col: u8) -> bool {
    (row + col) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOARD: f64 = 450.0; // 50px cells

    #[test]
    fn test_pixel_to_cell_normal_orientation() {
        // Centre of the top-left square is a8.
        assert_eq!(pixel_to_cell(50.0, 50.0, BOARD, false), BoardCell::new(0, 7));
        // Bottom-right square is h1.
        assert_eq!(pixel_to_cell(420.0, 420.0, BOARD, false), BoardCell::new(7, 0));
        // e2: column 4, row 6.
        assert_eq!(pixel_to_cell(250.0, 350.0, BOARD, false), BoardCell::new(4, 1));
    }

    #[test]
    fn test_pixel_to_cell_reversed() {
        assert_eq!(pixel_to_cell(50.0, 50.0, BOARD, true), BoardCell::new(7, 0));
        assert_eq!(pixel_to_cell(420.0, 420.0, BOARD, true), BoardCell::new(0, 7));
    }

    #[test]
    fn test_pixel_on_border_is_out_of_bounds() {
        assert_eq!(pixel_to_cell(10.0, 200.0, BOARD, false), None);
        assert_eq!(pixel_to_cell(200.0, 440.0, BOARD, false), None);
        assert_eq!(pixel_to_cell(-5.0, 200.0, BOARD, false), None);
        assert_eq!(pixel_to_cell(200.0, 200.0, 0.0, false), None);
        assert_eq!(pixel_to_cell(f64::NAN, 200.0, BOARD, false), None);
    }

    #[test]
    fn test_edge_labels() {
        assert_eq!(edge_file_label(0, false), Some('A'));
        assert_eq!(edge_file_label(0, true), Some('H'));
        assert_eq!(edge_rank_label(0, false), Some('8'));
        assert_eq!(edge_rank_label(0, true), Some('1'));
        assert_eq!(edge_file_label(8, false), None);
    }

    #[test]
    fn test_grid_helpers() {
        assert!(is_light_cell(0, 0));
        assert!(!is_light_cell(0, 1));
        assert_eq!(to_file(2, true), 5);
        assert_eq!(to_rank(2, false), 2);
        assert_eq!(coordinates_font_size(BOARD), 20);
        assert_eq!(BoardCell::new(4, 1).unwrap().square(), Square::E2);
        assert_eq!(BoardCell::new(8, 1), None);
    }

    proptest! {
        #[test]
        fn prop_pixel_to_cell_never_leaves_board(
            x in -100.0f64..600.0,
            y in -100.0f64..600.0,
            reversed in any::<bool>(),
        ) {
            if let Some(cell) = pixel_to_cell(x, y, BOARD, reversed) {
                prop_assert!(cell.file < 8 && cell.rank < 8);
            }
        }

        #[test]
        fn prop_reversal_mirrors_cells(x in 25.0f64..425.0, y in 25.0f64..425.0) {
            let normal = pixel_to_cell(x, y, BOARD, false);
            let reversed = pixel_to_cell(x, y, BOARD, true);
            prop_assert_eq!(normal.is_some(), reversed.is_some());
            if let (Some(n), Some(r)) = (normal, reversed) {
                prop_assert_eq!(n.file, 7 - r.file);
                prop_assert_eq!(n.rank, 7 - r.rank);
            }
        }
    }
}
