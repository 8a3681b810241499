//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Nominal pixel width of one terminal cell, used to scale pointer distances.
pub const CELL_WIDTH_PX: i32 = 8;
/// Nominal pixel height of one terminal cell.
pub const CELL_HEIGHT_PX: i32 = 16;

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleMute),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Center of a terminal cell in nominal pixels
pub fn cell_to_pixels(column: u16, row: u16) -> (i32, i32) {
    (
        column as i32 * CELL_WIDTH_PX + CELL_WIDTH_PX / 2,
        row as i32 * CELL_HEIGHT_PX + CELL_HEIGHT_PX / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(key(KeyCode::Char('a')), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Char('D')), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Char('l')), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Char('s')), Some(GameAction::SoftDrop));
        assert_eq!(key(KeyCode::Char('J')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(GameAction::Rotate));
        assert_eq!(key(KeyCode::Char(' ')), Some(GameAction::Rotate));
        assert_eq!(key(KeyCode::Char('W')), Some(GameAction::Rotate));
        assert_eq!(key(KeyCode::Char('k')), Some(GameAction::Rotate));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(key(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(key(KeyCode::Char('m')), Some(GameAction::ToggleMute));
        assert_eq!(key(KeyCode::Char('x')), None);
        assert_eq!(key(KeyCode::Enter), None);
    }

    #[test]
    fn test_control_chords_are_not_actions() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_cell_to_pixels_uses_cell_centers() {
        assert_eq!(cell_to_pixels(0, 0), (4, 8));
        assert_eq!(cell_to_pixels(10, 2), (84, 40));
    }
}
