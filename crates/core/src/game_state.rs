//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, collision, rotation
//! and scoring. It handles gravity timing, piece movement, locking, line clears and the
//! game lifecycle (pause, game over, restart).
//!
//! A game always has a current piece and a next piece. Spawning promotes next to current
//! and draws a new next; if the promoted piece does not fit, the game is over and only a
//! restart brings it back.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collision::piece_collides;
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::rotation::try_rotate;
use crate::scoring::{calculate_drop_score, calculate_score};
use crate::snapshot::{GameSnapshot, GameStatus};
use crate::types::{GameAction, PieceKind, SoundCue, BASE_DROP_MS};

/// Capacity of the sound cue queue; cues beyond it are dropped until the queue is drained.
pub const CUE_QUEUE_CAPACITY: usize = 32;

/// Pending sound cues, oldest first
pub type CueQueue = ArrayVec<SoundCue, CUE_QUEUE_CAPACITY>;

/// What happened when the last piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    pub level_up: bool,
    /// The following spawn failed.
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Piece,
    next: Piece,
    generator: PieceGenerator,
    seed: u32,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    /// Time accumulated towards the next gravity step.
    drop_timer_ms: u32,
    paused: bool,
    running: bool,
    cues: CueQueue,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed; the first piece is already falling.
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Start a game on a prepared board.
    ///
    /// If the first piece does not fit, the game is over from the start.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let next = generator.generate();

        let mut state = Self {
            board,
            current: next,
            next,
            generator,
            seed,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            drop_timer_ms: 0,
            paused: false,
            running: true,
            cues: CueQueue::new(),
            last_event: None,
        };
        state.spawn_piece();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The falling piece. After game over this is the piece that failed to spawn.
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        !self.running
    }

    /// Whether moves, rotations and gravity currently have any effect
    pub fn playable(&self) -> bool {
        self.running && !self.paused
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            score: self.score,
            lines: self.lines,
            level: self.level,
            paused: self.paused,
            running: self.running,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.running.then_some(self.current);
        out.next = self.next;
        out.drop_interval_ms = self.drop_interval_ms;
        out.status = self.status();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Pending sound cues without draining them
    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    /// Drain the queued sound cues.
    pub fn take_cues(&mut self) -> CueQueue {
        std::mem::take(&mut self.cues)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn cue(&mut self, cue: SoundCue) {
        // A full queue means nobody is listening; drop the cue.
        let _ = self.cues.try_push(cue);
    }

    /// Promote the next piece and draw a new one; a blocked spawn ends the game.
    fn spawn_piece(&mut self) -> bool {
        self.current = self.next;
        self.next = self.generator.generate();

        if piece_collides(&self.board, &self.current, self.current.x, self.current.y) {
            self.running = false;
            self.cue(SoundCue::GameOver);
            return false;
        }
        true
    }

    /// Try to move the current piece.
    ///
    /// A blocked downward step locks the piece; any other blocked move is ignored.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.playable() {
            return false;
        }

        let x = self.current.x + dx;
        let y = self.current.y + dy;
        if piece_collides(&self.board, &self.current, x, y) {
            if dy > 0 {
                self.lock_piece();
            }
            return false;
        }

        self.current = self.current.at(x, y);
        if dx != 0 {
            self.cue(SoundCue::Move);
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, +1 point if the step succeeded.
    ///
    /// When the piece cannot go further it locks instead.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.score = self.score.saturating_add(calculate_drop_score(1));
        }
        moved
    }

    /// Rotate clockwise with wall kicks
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        match try_rotate(&self.board, &self.current) {
            Some(rotated) => {
                self.current = rotated;
                self.cue(SoundCue::Rotate);
                true
            }
            None => false,
        }
    }

    /// Lock the current piece onto the board and handle line clears
    fn lock_piece(&mut self) {
        let piece = self.current;
        self.board.lock_cells(piece.cells(), piece.color);

        let cleared = self.board.clear_full_rows();
        let result = calculate_score(cleared, self.level, self.lines);
        self.score = self.score.saturating_add(result.points);
        self.lines = self.lines.saturating_add(cleared as u32);

        match cleared {
            0 => {}
            1..=3 => self.cue(SoundCue::LineClear),
            _ => self.cue(SoundCue::Tetris),
        }
        if result.level_up {
            self.level = result.level;
            self.drop_interval_ms = result.drop_interval_ms;
            self.cue(SoundCue::LevelUp);
        }
        self.cue(SoundCue::Drop);

        let spawned = self.spawn_piece();
        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points: result.points,
            level_up: result.level_up,
            game_over: !spawned,
        });
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Returns true when a gravity step was taken. Time past the interval is discarded, so
    /// at most one step happens per call.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;
        self.try_move(0, 1);
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.running || self.paused {
            return false;
        }
        self.paused = true;
        self.cue(SoundCue::Pause);
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.running || !self.paused {
            return false;
        }
        self.paused = false;
        self.cue(SoundCue::Pause);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Start over on an empty board. Works in any state, including game over.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_timer_ms = 0;
        self.paused = false;
        self.running = true;
        self.cues.clear();
        self.last_event = None;
        self.next = self.generator.generate();
        self.spawn_piece();
    }

    /// Apply a game action; returns whether it changed anything.
    ///
    /// Muting is not a game concern and is always ignored here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::ToggleMute => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const GRAY: Color = Color::from_hex(0x808080);

    fn vertical_i() -> Piece {
        let i = Piece::spawn(PieceKind::I);
        Piece {
            shape: i.shape.rotate_cw(),
            ..i
        }
    }

    /// Let gravity pull the current piece down until it locks.
    fn drop_with_gravity(state: &mut GameState) -> LockEvent {
        for _ in 0..64 {
            state.tick(state.drop_interval_ms());
            if let Some(ev) = state.take_last_event() {
                return ev;
            }
        }
        panic!("piece never locked");
    }

    fn state_with(board: Board, piece: Piece) -> GameState {
        let mut state = GameState::with_board(7, board);
        state.current = piece;
        state.take_cues();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(state.running());
        assert!(!state.paused());
        assert!(state.playable());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(*state.current_piece(), Piece::spawn(state.current_piece().kind));
        assert!(state.cues().is_empty());
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..20 {
            assert_eq!(a.current_piece(), b.current_piece());
            assert_eq!(a.next_piece(), b.next_piece());
            a.restart();
            b.restart();
        }
    }

    #[test]
    fn test_next_becomes_current_on_lock() {
        let mut state = GameState::new(12345);
        let next = *state.next_piece();
        drop_with_gravity(&mut state);
        assert_eq!(*state.current_piece(), next);
    }

    #[test]
    fn test_o_piece_lands_on_floor() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::O));

        let ev = drop_with_gravity(&mut state);
        assert_eq!(ev.kind, PieceKind::O);
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);

        let board = state.board();
        assert_eq!(board.filled_count(), 4);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert!(board.is_occupied(x, y), "({}, {})", x, y);
        }
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.cues(), &[SoundCue::Drop]);
    }

    #[test]
    fn test_i_piece_completes_bottom_row() {
        let board = Board::from_ascii(&["###....###"], GRAY);
        let mut state = state_with(board, Piece::spawn(PieceKind::I));

        let ev = drop_with_gravity(&mut state);
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.points, 40);
        assert_eq!(state.score(), 40);
        assert_eq!(state.lines(), 1);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.cues(), &[SoundCue::LineClear, SoundCue::Drop]);
    }

    #[test]
    fn test_tetris_scores_1200_and_cues() {
        let row = "#########.";
        let board = Board::from_ascii(&[row, row, row, row], GRAY);
        let mut state = state_with(board, vertical_i().at(9, 0));

        let ev = drop_with_gravity(&mut state);
        assert_eq!(ev.lines_cleared, 4);
        assert_eq!(state.score(), 1200);
        assert_eq!(state.lines(), 4);
        assert_eq!(state.board().filled_count(), 0);
        assert!(state.cues().contains(&SoundCue::Tetris));
        assert!(!state.cues().contains(&SoundCue::LineClear));
    }

    #[test]
    fn test_tenth_line_levels_up() {
        let board = Board::from_ascii(&["###....###"], GRAY);
        let mut state = state_with(board, Piece::spawn(PieceKind::I));
        state.lines = 9;

        let ev = drop_with_gravity(&mut state);
        assert!(ev.level_up);
        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 2);
        assert_eq!(state.drop_interval_ms(), 950);
        // Points are computed at the level before the clear.
        assert_eq!(state.score(), 40);
        assert_eq!(
            state.cues(),
            &[SoundCue::LineClear, SoundCue::LevelUp, SoundCue::Drop]
        );
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut board = Board::new();
        for y in 0..2 {
            for x in 0..9 {
                board.set(x, y, Some(GRAY));
            }
        }
        let mut state = GameState::with_board(3, board.clone());

        assert!(state.is_game_over());
        assert!(!state.running());
        assert_eq!(state.cues(), &[SoundCue::GameOver]);
        assert!(state.snapshot().current.is_none());

        let before = state.current;
        assert!(!state.tick(10_000));
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.soft_drop());
        assert!(!state.rotate());
        assert!(!state.pause());
        assert_eq!(state.current, before);
        assert_eq!(*state.board(), board);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_lock_into_blocked_spawn_ends_game() {
        let mut state = GameState::new(5);
        // Leave one column open so nothing clears, then stack above it.
        for y in 1..20 {
            for x in 0..9 {
                state.board_mut().set(x, y, Some(GRAY));
            }
        }
        state.current = Piece::spawn(PieceKind::O).at(4, -2);
        let ev = drop_with_gravity(&mut state);
        assert!(ev.game_over);
        assert!(state.is_game_over());
        assert_eq!(state.cues().last(), Some(&SoundCue::GameOver));
    }

    #[test]
    fn test_o_rotation_keeps_occupied_cells() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::O).at(2, 7));
        let before: Vec<_> = state.current_piece().cells().collect();
        assert!(state.rotate());
        let after: Vec<_> = state.current_piece().cells().collect();
        assert_eq!(before, after);
        assert_eq!(state.cues(), &[SoundCue::Rotate]);
    }

    #[test]
    fn test_horizontal_move_blocked_by_wall_is_noop() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::O).at(0, 5));
        assert!(!state.move_left());
        assert_eq!(state.current_piece().x, 0);
        assert!(state.cues().is_empty());
        assert!(state.take_last_event().is_none());

        assert!(state.move_right());
        assert_eq!(state.current_piece().x, 1);
        assert_eq!(state.cues(), &[SoundCue::Move]);
    }

    #[test]
    fn test_soft_drop_scores_only_successful_steps() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::O).at(4, 16));
        assert!(state.soft_drop());
        assert!(state.soft_drop());
        assert_eq!(state.score(), 2);

        // Resting on the floor: the next soft drop locks without points.
        assert!(!state.soft_drop());
        assert_eq!(state.score(), 2);
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.kind, PieceKind::O);
        assert_eq!(state.board().filled_count(), 4);
    }

    #[test]
    fn test_tick_accumulates_and_discards_overshoot() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::T));
        assert!(!state.tick(600));
        assert_eq!(state.current_piece().y, 0);
        assert!(state.tick(900));
        assert_eq!(state.current_piece().y, 1);
        // The 500 ms overshoot was dropped: 999 more is not enough.
        assert!(!state.tick(999));
        assert_eq!(state.current_piece().y, 1);
        assert!(state.tick(1));
        assert_eq!(state.current_piece().y, 2);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::T));
        assert!(state.toggle_pause());
        assert!(state.paused());
        assert!(!state.playable());

        let piece = state.current;
        assert!(!state.tick(5_000));
        assert!(!state.move_left());
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert_eq!(state.current, piece);
        assert!(!state.pause());

        assert!(state.toggle_pause());
        assert!(!state.paused());
        assert_eq!(state.cues(), &[SoundCue::Pause, SoundCue::Pause]);
        assert!(!state.resume());
    }

    #[test]
    fn test_restart_resets_everything() {
        let board = Board::from_ascii(&["###....###", "#.#.#.#.#."], GRAY);
        let mut state = state_with(board, Piece::spawn(PieceKind::I));
        state.lines = 9;
        drop_with_gravity(&mut state);
        state.pause();
        assert!(state.score() > 0);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.status(), GameStatus::default());
        assert_eq!(state.drop_interval_ms(), 1000);
        assert_eq!(state.board().filled_count(), 0);
        assert!(state.cues().is_empty());
        assert!(state.playable());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut board = Board::new();
        for x in 0..9 {
            board.set(x, 0, Some(GRAY));
        }
        let mut state = GameState::with_board(3, board);
        assert!(state.is_game_over());

        state.restart();
        assert!(state.running());
        assert!(state.snapshot().current.is_some());
        assert!(state.move_left() || state.move_right());
    }

    #[test]
    fn test_cue_queue_drops_overflow() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::T).at(4, 5));
        for _ in 0..CUE_QUEUE_CAPACITY + 10 {
            state.rotate();
        }
        assert_eq!(state.cues().len(), CUE_QUEUE_CAPACITY);
        let drained = state.take_cues();
        assert_eq!(drained.len(), CUE_QUEUE_CAPACITY);
        assert!(state.cues().is_empty());
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::T).at(4, 5));
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.current_piece().x, 3);
        assert!(state.apply_action(GameAction::MoveRight));
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.current_piece().y, 6);
        assert!(state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::ToggleMute));
        assert!(state.apply_action(GameAction::Pause));
        assert!(state.paused());
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut state = state_with(Board::new(), Piece::spawn(PieceKind::S).at(2, 3));
        state.board_mut().set(0, 19, Some(GRAY));
        let snap = state.snapshot();
        assert_eq!(snap.board[19][0], Some(GRAY));
        assert_eq!(snap.current, Some(*state.current_piece()));
        assert_eq!(snap.next, *state.next_piece());
        assert_eq!(snap.status, state.status());
        assert_eq!(snap.drop_interval_ms, 1000);
    }
}
