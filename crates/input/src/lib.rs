//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`], turns pointer drags into swipe gestures and provides the
//! press-and-hold auto-repeat used by both the keyboard and the on-screen buttons
//! (including terminals without key-release events).

pub mod gesture;
pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use gesture::{Gesture, GestureRecognizer, MIN_SWIPE_DISTANCE_PX};
pub use handler::{AutoRepeat, HoldSource, RepeatBatch};
pub use map::{cell_to_pixels, handle_key_event, should_quit, CELL_HEIGHT_PX, CELL_WIDTH_PX};
