//! Property tests for board, rotation, collision and game-state invariants.
//!
//! Invariants covered:
//! - Clearing rows keeps the board size, reports the full rows and leaves none behind.
//! - Four clockwise rotations are the identity for any shape.
//! - An all-empty shape never collides.
//! - The falling piece never overlaps locked cells while the game runs.
//! - Score and lines never go down without a restart.

use proptest::prelude::*;

use blockfall::core::collision::collides;
use blockfall::core::{Board, GameState, Shape};
use blockfall::types::{Color, GameAction, BOARD_HEIGHT, BOARD_WIDTH};

const FULL_ROW: u16 = (1 << BOARD_WIDTH) - 1;

fn board_from_masks(masks: &[u16]) -> Board {
    let mut board = Board::new();
    for (y, mask) in masks.iter().enumerate() {
        for x in 0..BOARD_WIDTH {
            if mask & (1 << x) != 0 {
                board.set(x as i8, y as i8, Some(Color::from_hex(0x808080)));
            }
        }
    }
    board
}

/// Row masks where roughly one row in five is full.
fn row_masks() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(
        prop_oneof![4 => 0..FULL_ROW, 1 => Just(FULL_ROW)],
        BOARD_HEIGHT as usize,
    )
}

fn shapes() -> impl Strategy<Value = Shape> {
    (1u8..=4, 1u8..=4, any::<u16>()).prop_map(|(rows, cols, bits)| {
        let mut shape = Shape::empty(rows, cols);
        for r in 0..rows as usize {
            for c in 0..cols as usize {
                shape.set(r, c, bits & (1 << (r * 4 + c)) != 0);
            }
        }
        shape
    })
}

fn actions() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        Just(GameAction::MoveLeft),
        Just(GameAction::MoveRight),
        Just(GameAction::SoftDrop),
        Just(GameAction::Rotate),
        Just(GameAction::Pause),
    ]
}

fn overlaps(game: &GameState) -> bool {
    game.current_piece()
        .cells()
        .any(|(x, y)| y >= 0 && game.board().is_occupied(x, y))
}

proptest! {
    #[test]
    fn clear_full_rows_removes_exactly_the_full_rows(masks in row_masks()) {
        let mut board = board_from_masks(&masks);
        let full = masks.iter().filter(|&&m| m == FULL_ROW).count();
        let filled_before = board.filled_count();

        let cleared = board.clear_full_rows();

        prop_assert_eq!(cleared, full);
        prop_assert_eq!(board.width(), BOARD_WIDTH);
        prop_assert_eq!(board.height(), BOARD_HEIGHT);
        prop_assert_eq!(board.filled_count(), filled_before - full * BOARD_WIDTH as usize);
        for y in 0..BOARD_HEIGHT as usize {
            prop_assert!(!board.is_row_full(y));
        }
    }

    #[test]
    fn four_rotations_are_identity(shape in shapes()) {
        let back = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        prop_assert_eq!(back, shape);
        prop_assert_eq!(shape.rotate_cw().filled_count(), shape.filled_count());
    }

    #[test]
    fn empty_shape_never_collides(
        masks in row_masks(),
        rows in 1u8..=4,
        cols in 1u8..=4,
        x in -10i8..20,
        y in -10i8..30,
    ) {
        let board = board_from_masks(&masks);
        prop_assert!(!collides(&board, &Shape::empty(rows, cols), x, y));
    }

    #[test]
    fn random_play_keeps_the_piece_clear_of_the_stack(
        seed in any::<u32>(),
        steps in prop::collection::vec((actions(), 0u32..400), 1..200),
    ) {
        let mut game = GameState::new(seed);
        let mut score = game.score();
        let mut lines = game.lines();

        for (action, elapsed) in steps {
            game.apply_action(action);
            game.tick(elapsed);
            game.take_cues();

            if game.running() {
                prop_assert!(!overlaps(&game));
            }
            prop_assert!(game.score() >= score);
            prop_assert!(game.lines() >= lines);
            prop_assert!(game.level() >= 1);
            score = game.score();
            lines = game.lines();
        }
    }
}
