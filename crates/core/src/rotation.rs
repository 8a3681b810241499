//! Rotation resolver - clockwise rotation with a horizontal wall-kick search
//!
//! The kick search is deliberately simple: the rotated shape is probed at the current row
//! with horizontal offsets 0, -1, +1, -2, +2 (nearest first, left before right). There are
//! no vertical kicks and no per-kind kick tables.

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::Piece;

/// Horizontal offsets tried after rotating, in order
pub const WALL_KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Rotate `piece` clockwise, kicking it sideways if needed.
///
/// Returns the rotated piece, or `None` if every probe collides; the piece then stays as it
/// was.
pub fn try_rotate(board: &Board, piece: &Piece) -> Option<Piece> {
    let rotated = piece.shape.rotate_cw();
    WALL_KICK_OFFSETS.iter().find_map(|&kick| {
        let x = piece.x + kick;
        (!collides(board, &rotated, x, piece.y)).then_some(Piece {
            shape: rotated,
            x,
            ..*piece
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    const GRAY: Color = Color::from_hex(0x808080);

    #[test]
    fn test_rotate_in_open_space_keeps_position() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T).at(4, 5);
        let rotated = try_rotate(&board, &piece).unwrap();
        assert_eq!((rotated.x, rotated.y), (4, 5));
        assert_eq!(rotated.shape, piece.shape.rotate_cw());
    }

    #[test]
    fn test_vertical_i_near_right_wall_kicks_two_left() {
        let board = Board::new();
        let vertical = Piece {
            shape: Piece::spawn(PieceKind::I).shape.rotate_cw(),
            ..Piece::spawn(PieceKind::I)
        };
        // Horizontal I at x=8 spans 8..=11; only the -2 probe fits.
        let rotated = try_rotate(&board, &vertical.at(8, 5)).unwrap();
        assert_eq!((rotated.x, rotated.y), (6, 5));

        // In the last column even -2 overflows.
        assert_eq!(try_rotate(&board, &vertical.at(9, 5)), None);
    }

    #[test]
    fn test_kick_prefers_left_over_right() {
        let mut board = Board::new();
        // T at x=4 rotated is a 3x2 shape with cells at columns 4 and 5.
        // Block column 5 on the rotated rows so offset 0 fails.
        board.set(5, 6, Some(GRAY));
        let piece = Piece::spawn(PieceKind::T).at(4, 5);
        let rotated = try_rotate(&board, &piece).unwrap();
        assert_eq!(rotated.x, 3);
    }

    #[test]
    fn test_rotation_rejected_when_all_probes_collide() {
        let mut board = Board::new();
        // Fill the rows the rotated I would occupy, leaving only the piece's own row free.
        for y in 6..10 {
            for x in 0..10 {
                board.set(x, y, Some(GRAY));
            }
        }
        let piece = Piece::spawn(PieceKind::I).at(3, 5);
        assert_eq!(try_rotate(&board, &piece), None);
    }

    #[test]
    fn test_no_vertical_kick_at_floor() {
        let board = Board::new();
        // Horizontal I resting on the floor cannot stand up: the vertical shape would
        // poke through the floor and no upward kick is attempted.
        let piece = Piece::spawn(PieceKind::I).at(3, 19);
        assert_eq!(try_rotate(&board, &piece), None);
    }

    #[test]
    fn test_o_rotation_keeps_cells() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O).at(0, 18);
        let rotated = try_rotate(&board, &piece).unwrap();
        let before: Vec<_> = piece.cells().collect();
        let after: Vec<_> = rotated.cells().collect();
        assert_eq!(before, after);
    }
}
