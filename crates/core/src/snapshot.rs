use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Scoreboard and lifecycle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameStatus {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub running: bool,
}

impl GameStatus {
    pub fn playable(&self) -> bool {
        self.running && !self.paused
    }

    pub fn is_game_over(&self) -> bool {
        !self.running
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            paused: false,
            running: true,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// The falling piece; `None` once the game is over.
    pub current: Option<Piece>,
    pub next: Piece,
    pub drop_interval_ms: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.current = None;
        self.next = Piece::spawn(PieceKind::I);
        self.drop_interval_ms = BASE_DROP_MS;
        self.status = GameStatus::default();
    }

    pub fn playable(&self) -> bool {
        self.status.playable()
    }

    /// Cell to draw at (x, y): the falling piece on top of the locked board
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = &self.current {
            let hit = piece
                .cells()
                .any(|(cx, cy)| cx as isize == x as isize && cy as isize == y as isize);
            if hit {
                return Some(piece.color);
            }
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: Piece::spawn(PieceKind::I),
            drop_interval_ms: BASE_DROP_MS,
            status: GameStatus::default(),
        };
        s.clear();
        s
    }
}
