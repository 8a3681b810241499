//! Swipe and tap recognition for pointer drags on the playfield.
//!
//! Positions are in nominal pixels (see [`crate::map::cell_to_pixels`]). A drag that stays
//! within the minimum distance on both axes is a tap; otherwise the dominant axis decides
//! the direction. Upward swipes do nothing.

use crate::types::GameAction;

/// Minimum travel, in pixels, for a drag to count as a swipe
pub const MIN_SWIPE_DISTANCE_PX: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    SwipeLeft,
    SwipeRight,
    SwipeDown,
}

impl Gesture {
    pub fn action(self) -> GameAction {
        match self {
            Gesture::Tap => GameAction::Rotate,
            Gesture::SwipeLeft => GameAction::MoveLeft,
            Gesture::SwipeRight => GameAction::MoveRight,
            Gesture::SwipeDown => GameAction::SoftDrop,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    start: Option<(i32, i32)>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Finish the drag at (`x`, `y`) and classify it.
    ///
    /// Returns `None` when no drag was in progress, for upward swipes, and for drags that
    /// land exactly on the threshold along their dominant axis.
    pub fn end(&mut self, x: i32, y: i32) -> Option<Gesture> {
        let (start_x, start_y) = self.start.take()?;
        classify(x - start_x, y - start_y)
    }
}

/// Classify a drag by its displacement
pub fn classify(dx: i32, dy: i32) -> Option<Gesture> {
    let min = MIN_SWIPE_DISTANCE_PX;
    if dx.abs() < min && dy.abs() < min {
        return Some(Gesture::Tap);
    }

    if dx.abs() > dy.abs() {
        if dx > min {
            Some(Gesture::SwipeRight)
        } else if dx < -min {
            Some(Gesture::SwipeLeft)
        } else {
            None
        }
    } else if dy > min {
        Some(Gesture::SwipeDown)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_drag_is_tap() {
        let mut g = GestureRecognizer::new();
        g.begin(100, 100);
        assert_eq!(g.end(110, 90), Some(Gesture::Tap));
        assert!(!g.is_tracking());
    }

    #[test]
    fn test_dominant_axis_decides() {
        assert_eq!(classify(50, 20), Some(Gesture::SwipeRight));
        assert_eq!(classify(-50, 40), Some(Gesture::SwipeLeft));
        assert_eq!(classify(20, 64), Some(Gesture::SwipeDown));
    }

    #[test]
    fn test_up_swipe_and_threshold_are_ignored() {
        assert_eq!(classify(0, -80), None);
        assert_eq!(classify(30, 0), None);
        assert_eq!(classify(0, 30), None);
        assert_eq!(classify(31, 0), Some(Gesture::SwipeRight));
    }

    #[test]
    fn test_end_without_begin() {
        let mut g = GestureRecognizer::new();
        assert_eq!(g.end(0, 0), None);
        g.begin(0, 0);
        g.cancel();
        assert_eq!(g.end(0, 0), None);
    }

    #[test]
    fn test_gesture_actions() {
        assert_eq!(Gesture::Tap.action(), GameAction::Rotate);
        assert_eq!(Gesture::SwipeLeft.action(), GameAction::MoveLeft);
        assert_eq!(Gesture::SwipeRight.action(), GameAction::MoveRight);
        assert_eq!(Gesture::SwipeDown.action(), GameAction::SoftDrop);
    }
}
