//! Shared types - constants and plain data used by every crate in the workspace
//!
//! Nothing in here depends on I/O or on other crates, so the core, the input layer,
//! the renderer and the audio layer can all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - Pieces spawn at row 0, horizontally centered: `x = W/2 - shape_cols/2`
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Target frame interval of the binary's loop |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 50 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 50 | Gravity never gets faster than this |
//! | `AUTO_REPEAT_DELAY_MS` | 300 | Hold time before a held input starts repeating |
//! | `AUTO_REPEAT_INTERVAL_MS` | 150 | Interval between repeats of a held input |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, PieceKind, SoundCue, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
//! assert_eq!(SoundCue::LineClear.as_str(), "lineClear");
//! assert_eq!(Color::from_hex(0xff8000).lighten(20), Color::new(255, 148, 20));
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Frame pacing of the terminal loop (milliseconds)
pub const FRAME_MS: u32 = 16;

/// Gravity timing (milliseconds)
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_INTERVAL_STEP_MS: u32 = 50;
pub const DROP_INTERVAL_MIN_MS: u32 = 50;

/// Held-input repeat timing (milliseconds)
pub const AUTO_REPEAT_DELAY_MS: u32 = 300;
pub const AUTO_REPEAT_INTERVAL_MS: u32 = 150;

/// Line clear scoring, indexed by rows cleared at once, multiplied by level
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for each successful player-initiated downward step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter used in the HUD and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// 24-bit color token stored in board cells and carried by pieces.
///
/// The core treats it as opaque; only renderers look inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Add `amount` to every channel, clamped to 0..=255
    pub fn lighten(self, amount: i16) -> Self {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }

    pub fn darken(self, amount: i16) -> Self {
        self.lighten(-amount)
    }
}

/// Cell on the board (None = empty, Some = locked block of that color)
pub type Cell = Option<Color>;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Pause,
    Restart,
    /// Handled by the audio collaborator; the core ignores it.
    ToggleMute,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "togglemute" => Some(GameAction::ToggleMute),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::ToggleMute => "toggleMute",
        }
    }

    /// Whether the action should keep repeating while its input is held
    pub fn repeats_when_held(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
        )
    }
}

/// Named sound requests emitted by the core. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Drop,
    LineClear,
    Tetris,
    LevelUp,
    GameOver,
    Pause,
}

impl SoundCue {
    pub const ALL: [SoundCue; 8] = [
        SoundCue::Move,
        SoundCue::Rotate,
        SoundCue::Drop,
        SoundCue::LineClear,
        SoundCue::Tetris,
        SoundCue::LevelUp,
        SoundCue::GameOver,
        SoundCue::Pause,
    ];

    pub const fn index(self) -> usize {
        match self {
            SoundCue::Move => 0,
            SoundCue::Rotate => 1,
            SoundCue::Drop => 2,
            SoundCue::LineClear => 3,
            SoundCue::Tetris => 4,
            SoundCue::LevelUp => 5,
            SoundCue::GameOver => 6,
            SoundCue::Pause => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Rotate => "rotate",
            SoundCue::Drop => "drop",
            SoundCue::LineClear => "lineClear",
            SoundCue::Tetris => "tetris",
            SoundCue::LevelUp => "levelUp",
            SoundCue::GameOver => "gameOver",
            SoundCue::Pause => "pause",
        }
    }
}
