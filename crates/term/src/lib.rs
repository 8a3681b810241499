//! Terminal renderer for blockfall.
//!
//! Frames are drawn into a plain [`FrameBuffer`] by [`GameView`] and flushed by
//! [`TerminalRenderer`], which only writes the cells that changed. No widget toolkit is
//! involved: a board cell is two columns by one row, so blocks come out roughly square.
//!
//! [`ViewLayout`] is shared between drawing and pointer hit-testing, so a click lands on the
//! button or board cell that was drawn under it.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, Button, GameView, HudInfo, Rect, ViewLayout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
