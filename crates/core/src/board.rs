//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of the piece
//! that was locked there. Storage is a flat row-major array, so the whole board is `Copy`-sized
//! and never allocates.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows with negative y sit above the visible area; they are never solid.

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false (and writes nothing) if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a cell holds a locked block.
    ///
    /// Rows above the board (y < 0) are never occupied, which lets pieces spawn partly
    /// outside the visible area. Other out-of-range coordinates also report false; bounds
    /// are the collision engine's concern.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top with a read and a write cursor: surviving rows are
    /// copied down over the removed ones, keeping their relative order, and the rows left
    /// over at the top are emptied. Each surviving row moves down by exactly the number of
    /// full rows beneath it.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Write `color` into every listed cell that is on the board.
    ///
    /// Cells above the board are dropped silently; a piece that locks while sticking out of
    /// the top only leaves its visible part behind.
    pub fn lock_cells(&mut self, cells: impl IntoIterator<Item = (i8, i8)>, color: Color) {
        for (x, y) in cells {
            if y >= 0 {
                self.set(x, y, Some(color));
            }
        }
    }

    /// Iterate rows top to bottom as slices of `BOARD_WIDTH` cells
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Copy the board into a fixed 2D grid (used by snapshots).
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, top to bottom.
    ///
    /// Any character other than `.` or space is a filled cell painted with `color`.
    /// Rows shorter than the board are padded with empty cells; rows are aligned to the
    /// bottom, so a three-line picture fills rows 17..=19.
    pub fn from_ascii(rows: &[&str], color: Color) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' && ch != ' ' {
                    board.set(x as i8, y, Some(color));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_hex(0xff0000);
    const BLUE: Color = Color::from_hex(0x0000ff);

    fn fill_row(board: &mut Board, y: i8, color: Color) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_negative_rows_are_never_occupied() {
        let mut board = Board::new();
        fill_row(&mut board, 0, RED);
        assert!(board.is_occupied(3, 0));
        assert!(!board.is_occupied(3, -1));
        assert!(!board.is_occupied(3, -4));
    }

    #[test]
    fn test_clear_single_row_shifts_rows_above() {
        let mut board = Board::new();
        fill_row(&mut board, 19, RED);
        board.set(2, 18, Some(BLUE));
        board.set(7, 10, Some(BLUE));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.get(2, 19), Some(Some(BLUE)));
        assert_eq!(board.get(7, 11), Some(Some(BLUE)));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_non_adjacent_rows_preserves_order() {
        let mut board = Board::new();
        fill_row(&mut board, 19, RED);
        board.set(0, 18, Some(BLUE));
        fill_row(&mut board, 17, RED);
        board.set(5, 16, Some(BLUE));

        assert_eq!(board.clear_full_rows(), 2);
        // Row 18 drops by one (one full row below it), row 16 by two.
        assert_eq!(board.get(0, 19), Some(Some(BLUE)));
        assert_eq!(board.get(5, 18), Some(Some(BLUE)));
        assert_eq!(board.filled_count(), 2);
        assert!(board.rows().take(18).all(|r| r.iter().all(|c| c.is_none())));
    }

    #[test]
    fn test_clear_nothing_is_noop() {
        let mut board = Board::from_ascii(&["#########.", "##.#######"], RED);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_lock_cells_skips_rows_above_board() {
        let mut board = Board::new();
        board.lock_cells([(4, -1), (4, 0), (5, 0)], RED);
        assert_eq!(board.filled_count(), 2);
        assert!(board.is_occupied(4, 0));
    }

    #[test]
    fn test_from_ascii_aligns_to_bottom() {
        let board = Board::from_ascii(&["#.........", "##########"], RED);
        assert!(board.is_occupied(0, 18));
        assert!(!board.is_occupied(1, 18));
        assert!(board.is_row_full(19));
        assert!(!board.is_row_full(18));
    }
}
