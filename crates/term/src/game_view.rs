//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. The same [`ViewLayout`] that
//! drives drawing is used to hit-test mouse clicks, so buttons and board cells are always
//! found where they were drawn.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, GameAction, BOARD_HEIGHT, BOARD_WIDTH};

/// Board cell width in terminal columns; 2x1 compensates for the glyph aspect ratio.
const CELL_W: u16 = 2;
const CELL_H: u16 = 1;

/// Bevel highlight and shadow strength
const SHADE: i16 = 20;

const PANEL_GAP: u16 = 2;
const PANEL_MIN_W: u16 = 15;

// Panel rows, relative to the top of the board frame.
const ROW_SCORE: u16 = 0;
const ROW_LEVEL: u16 = 3;
const ROW_LINES: u16 = 6;
const ROW_NEXT: u16 = 9;
const ROW_SOUND: u16 = 14;
const ROW_BUTTONS: u16 = 17;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Extra HUD state that does not live in the game snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudInfo<'a> {
    /// Audio status label, e.g. "ON" or "MUTED"
    pub sound: &'a str,
    pub show_buttons: bool,
}

impl Default for HudInfo<'_> {
    fn default() -> Self {
        Self {
            sound: "OFF",
            show_buttons: true,
        }
    }
}

/// On-screen control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Down,
    Right,
    Rotate,
    Pause,
    Mute,
    Restart,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Left,
        Button::Down,
        Button::Right,
        Button::Rotate,
        Button::Pause,
        Button::Mute,
        Button::Restart,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Button::Left => "[<]",
            Button::Down => "[v]",
            Button::Right => "[>]",
            Button::Rotate => "[^]",
            Button::Pause => "[P]",
            Button::Mute => "[M]",
            Button::Restart => "[R]",
        }
    }

    pub fn action(self) -> GameAction {
        match self {
            Button::Left => GameAction::MoveLeft,
            Button::Down => GameAction::SoftDrop,
            Button::Right => GameAction::MoveRight,
            Button::Rotate => GameAction::Rotate,
            Button::Pause => GameAction::Pause,
            Button::Mute => GameAction::ToggleMute,
            Button::Restart => GameAction::Restart,
        }
    }

    /// Grid slot: row 0 holds the movement pad, row 1 the game controls.
    fn slot(self) -> (u16, u16) {
        match self {
            Button::Left => (0, 0),
            Button::Down => (1, 0),
            Button::Right => (2, 0),
            Button::Rotate => (3, 0),
            Button::Pause => (0, 1),
            Button::Mute => (1, 1),
            Button::Restart => (2, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.w && y - self.y < self.h
    }
}

/// Where everything sits on screen for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    /// Board including its border
    pub frame: Rect,
    /// Playable area inside the border
    pub board: Rect,
    /// Left column of the side panel, if it fits
    pub panel_x: Option<u16>,
    buttons: [Option<Rect>; 7],
}

impl ViewLayout {
    pub fn button_rect(&self, button: Button) -> Option<Rect> {
        Button::ALL
            .iter()
            .position(|&b| b == button)
            .and_then(|i| self.buttons[i])
    }

    /// Button under a terminal cell
    pub fn button_at(&self, x: u16, y: u16) -> Option<Button> {
        Button::ALL
            .iter()
            .zip(self.buttons.iter())
            .find_map(|(&b, r)| r.filter(|r| r.contains(x, y)).map(|_| b))
    }

    pub fn contains_board(&self, x: u16, y: u16) -> bool {
        self.board.contains(x, y)
    }

    /// Board cell (column, row) under a terminal cell
    pub fn board_cell_at(&self, x: u16, y: u16) -> Option<(u8, u8)> {
        if !self.board.contains(x, y) {
            return None;
        }
        Some((
            ((x - self.board.x) / CELL_W) as u8,
            ((y - self.board.y) / CELL_H) as u8,
        ))
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> ViewLayout {
        let board_w = (BOARD_WIDTH as u16) * CELL_W;
        let board_h = (BOARD_HEIGHT as u16) * CELL_H;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        // Center the board and panel together when there is room for both.
        let total_w = frame_w + PANEL_GAP + PANEL_MIN_W;
        let start_x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let panel_x = start_x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        let panel_x = (viewport.width.saturating_sub(panel_x) >= PANEL_MIN_W).then_some(panel_x);

        let mut buttons = [None; 7];
        if let Some(px) = panel_x {
            for (slot, button) in buttons.iter_mut().zip(Button::ALL) {
                let (col, row) = button.slot();
                let rect = Rect {
                    x: px + col * 4,
                    y: start_y + ROW_BUTTONS + row,
                    w: 3,
                    h: 1,
                };
                if rect.y < viewport.height {
                    *slot = Some(rect);
                }
            }
        }

        ViewLayout {
            frame: Rect {
                x: start_x,
                y: start_y,
                w: frame_w,
                h: frame_h,
            },
            board: Rect {
                x: start_x + 1,
                y: start_y + 1,
                w: board_w,
                h: board_h,
            },
            panel_x,
            buttons,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudInfo<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        self.draw_border(fb, layout.frame, border);

        // Locked board cells, with the falling piece on top.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.cell_at(x as usize, y as usize) {
                    Some(color) => self.draw_block(fb, &layout, x, y, color),
                    None => self.draw_empty_cell(fb, &layout, x, y),
                }
            }
        }

        if let Some(px) = layout.panel_x {
            self.draw_side_panel(fb, snap, hud, &layout, px);
        }

        // Overlays.
        if !snap.status.running {
            self.draw_game_over(fb, snap, &layout);
        } else if snap.status.paused {
            self.draw_overlay_lines(fb, &layout, &[OverlayLine::Text("PAUSED")]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudInfo<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
        if r.w < 2 || r.h < 2 {
            return;
        }
        let (x, y, w, h) = (r.x, r.y, r.w, r.h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &ViewLayout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let (px, py) = cell_origin(layout, x, y);
        fb.fill_rect(px, py, CELL_W, CELL_H, '·', style);
    }

    /// A block drawn as two half-block glyphs: lit top-left, shaded bottom-right.
    fn draw_block(&self, fb: &mut FrameBuffer, layout: &ViewLayout, x: u16, y: u16, color: Color) {
        let (px, py) = cell_origin(layout, x, y);
        let base = Rgb::from(color);
        let left = CellStyle::new(Rgb::from(color.lighten(SHADE)), base);
        let right = CellStyle::new(base, Rgb::from(color.darken(SHADE)));
        fb.put_char(px, py, '▀', left);
        fb.put_char(px + 1, py, '▀', right);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudInfo<'_>,
        layout: &ViewLayout,
        panel_x: u16,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let top = layout.frame.y;

        for (row, name, n) in [
            (ROW_SCORE, "SCORE", snap.status.score),
            (ROW_LEVEL, "LEVEL", snap.status.level),
            (ROW_LINES, "LINES", snap.status.lines),
        ] {
            fb.put_str(panel_x, top + row, name, label);
            fb.put_u32(panel_x, top + row + 1, n, value);
        }

        fb.put_str(panel_x, top + ROW_NEXT, "NEXT", label);
        self.draw_preview(fb, &snap.next, panel_x, top + ROW_NEXT + 1);

        fb.put_str(panel_x, top + ROW_SOUND, "SOUND", label);
        fb.put_str(panel_x, top + ROW_SOUND + 1, hud.sound, value);

        if hud.show_buttons {
            let style = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(50, 50, 70)).bold();
            for button in Button::ALL {
                if let Some(r) = layout.button_rect(button) {
                    fb.put_str(r.x, r.y, button.label(), style);
                }
            }
        }
    }

    /// Next piece in its spawn orientation, solid blocks
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: &Piece, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::from(piece.color), SCREEN_BG);
        for (dx, dy) in piece.shape.cells() {
            let px = x + dx as u16 * CELL_W;
            let py = y + dy as u16 * CELL_H;
            fb.fill_rect(px, py, CELL_W, CELL_H, '█', style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &ViewLayout) {
        self.draw_overlay_lines(
            fb,
            layout,
            &[
                OverlayLine::Text("GAME OVER"),
                OverlayLine::Number("SCORE ", snap.status.score),
                OverlayLine::Number("LINES ", snap.status.lines),
                OverlayLine::Text("R to restart"),
            ],
        );
    }

    fn draw_overlay_lines(&self, fb: &mut FrameBuffer, layout: &ViewLayout, lines: &[OverlayLine]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let frame = layout.frame;
        let first_y = frame.y + frame.h / 2 - (lines.len() as u16) / 2;

        for (i, line) in lines.iter().enumerate() {
            let y = first_y + i as u16;
            let w = line.width();
            let x = frame.x + frame.w.saturating_sub(w) / 2;
            match *line {
                OverlayLine::Text(text) => {
                    fb.put_str(x, y, text, style);
                }
                OverlayLine::Number(prefix, n) => {
                    let used = fb.put_str(x, y, prefix, style);
                    fb.put_u32(x + used, y, n, style);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum OverlayLine {
    Text(&'static str),
    Number(&'static str, u32),
}

impl OverlayLine {
    fn width(&self) -> u16 {
        match *self {
            OverlayLine::Text(t) => t.chars().count() as u16,
            OverlayLine::Number(prefix, n) => prefix.len() as u16 + digit_count(n),
        }
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn cell_origin(layout: &ViewLayout, x: u16, y: u16) -> (u16, u16) {
    (layout.board.x + x * CELL_W, layout.board.y + y * CELL_H)
}
