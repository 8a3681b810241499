//! Collision engine - can a shape sit at a given board position?

use crate::board::Board;
use crate::pieces::{Piece, Shape};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Check whether `shape` placed with its top-left at (`x`, `y`) hits a wall, the floor or a
/// locked cell.
///
/// Rows above the board (y < 0) are open space: only the side walls apply there, so a
/// piece may spawn or rotate while partly out of view.
pub fn collides(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    shape.cells().any(|(dx, dy)| {
        let col = x as i16 + dx as i16;
        let row = y as i16 + dy as i16;
        if col < 0 || col >= BOARD_WIDTH as i16 || row >= BOARD_HEIGHT as i16 {
            return true;
        }
        row >= 0 && board.is_occupied(col as i8, row as i8)
    })
}

/// Check a piece's own shape at a candidate position
pub fn piece_collides(board: &Board, piece: &Piece, x: i8, y: i8) -> bool {
    collides(board, &piece.shape, x, y)
}
