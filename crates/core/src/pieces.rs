//! Pieces module - shape matrices, the tetromino catalog and piece instances
//!
//! Shapes are small row-major boolean matrices (at most 4x4). Rotation is a single
//! geometric transform shared by every kind: there are no per-kind rotation tables, so the
//! O piece rotates onto itself and the I piece alternates between 1x4 and 4x1.

use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// Largest row or column count of any shape
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy matrix of a piece in its local frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Cells outside `rows x cols` are always false.
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a `0`/`1` matrix.
    ///
    /// Panics (at compile time when used in a `const`) if the matrix is larger than 4x4.
    pub const fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0 && R <= MAX_SHAPE_DIM && C <= MAX_SHAPE_DIM);
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut i = 0;
        while i < R {
            let mut j = 0;
            while j < C {
                cells[i][j] = rows[i][j] != 0;
                j += 1;
            }
            i += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    /// A shape of the given size with no occupied cells
    pub fn empty(rows: u8, cols: u8) -> Self {
        assert!(rows as usize <= MAX_SHAPE_DIM && cols as usize <= MAX_SHAPE_DIM);
        Self {
            rows,
            cols,
            cells: [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Mark a cell as occupied or free; out-of-range cells are ignored
    pub fn set(&mut self, row: usize, col: usize, filled: bool) {
        if row < self.rows as usize && col < self.cols as usize {
            self.cells[row][col] = filled;
        }
    }

    /// Occupied cells as `(dx, dy)` offsets from the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |row| {
            (0..self.cols as usize)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }

    /// Rotate 90 degrees clockwise.
    ///
    /// An R x C matrix becomes C x R with `out[j][R - 1 - i] = in[i][j]`.
    pub fn rotate_cw(&self) -> Shape {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut out = Shape::empty(self.cols, self.rows);
        for i in 0..rows {
            for j in 0..cols {
                out.cells[j][rows - 1 - i] = self.cells[i][j];
            }
        }
        out
    }
}

/// Immutable catalog entry for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

/// The seven tetrominoes, indexed by [`PieceKind::index`]
pub const CATALOG: [PieceTemplate; 7] = [
    PieceTemplate {
        kind: PieceKind::I,
        shape: Shape::from_rows([[1, 1, 1, 1]]),
        color: Color::from_hex(0x00f5ff),
    },
    PieceTemplate {
        kind: PieceKind::O,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
        color: Color::from_hex(0xffff00),
    },
    PieceTemplate {
        kind: PieceKind::T,
        shape: Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
        color: Color::from_hex(0xa000f0),
    },
    PieceTemplate {
        kind: PieceKind::S,
        shape: Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
        color: Color::from_hex(0x00ff00),
    },
    PieceTemplate {
        kind: PieceKind::Z,
        shape: Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
        color: Color::from_hex(0xff0000),
    },
    PieceTemplate {
        kind: PieceKind::J,
        shape: Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
        color: Color::from_hex(0x0000ff),
    },
    PieceTemplate {
        kind: PieceKind::L,
        shape: Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
        color: Color::from_hex(0xff8000),
    },
];

/// Look up the template for a kind
pub fn template(kind: PieceKind) -> &'static PieceTemplate {
    &CATALOG[kind.index()]
}

/// Column where a shape of the given width spawns
pub fn spawn_x(shape_cols: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape_cols / 2) as i8
}

/// A piece instance: a shape placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    /// Board column of the shape's top-left cell
    pub x: i8,
    /// Board row of the shape's top-left cell
    pub y: i8,
}

impl Piece {
    /// Instantiate a kind at its spawn position (top row, horizontally centered)
    pub fn spawn(kind: PieceKind) -> Self {
        let t = template(kind);
        Self {
            kind,
            shape: t.shape,
            color: t.color,
            x: spawn_x(t.shape.cols()),
            y: 0,
        }
    }

    /// Same piece moved to another position
    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
