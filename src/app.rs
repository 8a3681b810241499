//! App: one game plus its collaborators, driven by terminal events and frame time.
//!
//! The binary owns the terminal and the clock; everything in here is deterministic given
//! the events and elapsed times fed in, which is what the integration tests rely on.

use std::fs::File;
use std::io::Write;

use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::audio::AudioManager;
use crate::core::{GameSnapshot, GameState};
use crate::input::{cell_to_pixels, handle_key_event, should_quit, AutoRepeat, GestureRecognizer, HoldSource};
use crate::session_log::{now_ms, SessionLog, SessionRecord};
use crate::term::{FrameBuffer, GameView, HudInfo, ViewLayout, Viewport};
use crate::types::GameAction;

/// Viewport assumed for hit-testing until the first frame is rendered
const INITIAL_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

pub struct App<W: Write = File> {
    game: GameState,
    audio: AudioManager,
    log: SessionLog<W>,
    repeat: AutoRepeat,
    gesture: GestureRecognizer,
    /// Action held by an on-screen button, until the pointer goes up.
    pointer_hold: Option<GameAction>,
    view: GameView,
    layout: ViewLayout,
    snapshot: GameSnapshot,
    show_buttons: bool,
    quit: bool,
}

impl<W: Write> App<W> {
    pub fn new(seed: u32, audio: AudioManager, mut log: SessionLog<W>) -> Self {
        log.record(&SessionRecord::SessionStart {
            seed,
            ts_ms: now_ms(),
        });
        let view = GameView::new();
        let layout = view.layout(INITIAL_VIEWPORT);
        Self {
            game: GameState::new(seed),
            audio,
            log,
            repeat: AutoRepeat::new(),
            gesture: GestureRecognizer::new(),
            pointer_hold: None,
            view,
            layout,
            snapshot: GameSnapshot::default(),
            show_buttons: true,
            quit: false,
        }
    }

    /// Hide the on-screen buttons (when the mouse is not captured).
    pub fn with_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    /// Terminals that report key releases do not need the release timeout.
    pub fn set_key_releases_reported(&mut self, reported: bool) {
        let timeout = if reported {
            None
        } else {
            AutoRepeat::new().key_release_timeout_ms()
        };
        self.repeat = self.repeat.clone().with_key_release_timeout_ms(timeout);
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn log(&self) -> &SessionLog<W> {
        &self.log
    }

    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if should_quit(key) {
                    self.quit = true;
                    return;
                }
                if let Some(action) = handle_key_event(key) {
                    if let Some(action) = self.repeat.press(action, HoldSource::Key) {
                        self.dispatch(action);
                    }
                }
            }
            KeyEventKind::Release => {
                if let Some(action) = handle_key_event(key) {
                    self.repeat.release(action);
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(button) = self.layout.button_at(col, row) {
                    let action = button.action();
                    if action.repeats_when_held() {
                        self.pointer_hold = Some(action);
                    }
                    if let Some(action) = self.repeat.press(action, HoldSource::Pointer) {
                        self.dispatch(action);
                    }
                } else if self.layout.contains_board(col, row) {
                    let (x, y) = cell_to_pixels(col, row);
                    self.gesture.begin(x, y);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(action) = self.pointer_hold.take() {
                    self.repeat.release(action);
                }
                let (x, y) = cell_to_pixels(col, row);
                if let Some(gesture) = self.gesture.end(x, y) {
                    self.dispatch(gesture.action());
                }
            }
            _ => {}
        }
    }

    /// Advance the game by one frame of `elapsed_ms`.
    pub fn frame(&mut self, elapsed_ms: u32) {
        for action in self.repeat.update(elapsed_ms, self.game.playable()) {
            self.dispatch(action);
        }
        self.game.tick(elapsed_ms);
        self.flush_events();
    }

    pub fn dispatch(&mut self, action: GameAction) {
        match action {
            GameAction::ToggleMute => {
                self.audio.toggle_mute();
            }
            GameAction::Restart => {
                self.log.record(&SessionRecord::Restart {
                    score: self.game.score(),
                    lines: self.game.lines(),
                });
                self.repeat.cancel();
                self.pointer_hold = None;
                self.game.restart();
            }
            GameAction::Pause => {
                if self.game.toggle_pause() {
                    self.repeat.cancel();
                    self.log.record(&SessionRecord::Pause {
                        paused: self.game.paused(),
                    });
                }
            }
            _ => {
                self.game.apply_action(action);
            }
        }
        self.flush_events();
    }

    /// Forward queued cues to audio and lock results to the log.
    fn flush_events(&mut self) {
        if let Some(event) = self.game.take_last_event() {
            self.log.record(&SessionRecord::lock(&event, &self.game));
            if event.level_up {
                self.log.record(&SessionRecord::LevelUp {
                    level: self.game.level(),
                    drop_interval_ms: self.game.drop_interval_ms(),
                });
            }
            if event.game_over {
                self.log.record(&SessionRecord::game_over(&self.game));
                self.repeat.cancel();
            }
        }

        let cues = self.game.take_cues();
        self.audio.play_all(&cues);
        self.audio.sync_music(self.game.playable());
    }

    /// Render into `fb`, remembering the layout for pointer hit-tests.
    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.layout = self.view.layout(viewport);
        self.game.snapshot_into(&mut self.snapshot);
        let hud = HudInfo {
            sound: self.audio.status().label(),
            show_buttons: self.show_buttons,
        };
        self.view.render_into(&self.snapshot, &hud, viewport, fb);
    }

    /// Deferred audio and log failures, formatted for stderr
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(err) = self.audio.take_error() {
            lines.push(format!("[Audio] {:#}", err));
        }
        if let Some(err) = self.log.take_error() {
            lines.push(format!("[Log] {:#}", err));
        }
        lines
    }
}
