//! Pure game-state transition engine.
//!
//! Every operation takes a `&GameState` and returns a brand-new `GameState`;
//! nothing in here performs I/O or holds mutable state between calls.

pub mod collision;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod sequencer;
pub mod tetromino;
pub mod transition;

use serde::{Deserialize, Serialize};

pub use collision::{
    check_collisions, collides_at, correct_bounds, is_on_ground, is_side_colliding, is_stacking,
    Resolution,
};
pub use grid::Grid;
pub use rng::{hash, scale};
pub use scoring::{clear_full_rows, update_score, LINES_PER_LEVEL, LINE_SCORE};
pub use sequencer::{clock_seed, create_new_state, pick_tetromino, spawn_anchor};
pub use tetromino::{Tetromino, TetrominoKind};
pub use transition::{process_event, rotate, tetromino_landed};

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// 0 is empty, 1..=7 is a piece color.
pub type Cell = u8;
pub const EMPTY: Cell = 0;

// ============================================================================
// Events
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    /// Column delta for horizontal moves.
    pub fn column_delta(self) -> Option<i32> {
        match self {
            Direction::Left => Some(-1),
            Direction::Right => Some(1),
            Direction::Down | Direction::Up => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Event {
    Tick,
    Move(Direction),
}

// ============================================================================
// State
// ============================================================================

/// One immutable snapshot of a game. `(row, col)` anchors the top-left corner
/// of `current_tetromino`'s matrix and may be negative or overhang the grid
/// where the shape itself is empty.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub level: u32,
    pub score: u32,
    /// Lines toward the next level.
    pub lines_cleared: u32,
    pub game_end: bool,
    pub row: i32,
    pub col: i32,
    pub current_tetromino: Tetromino,
    pub next_tetromino: Tetromino,
    pub seed: u64,
}

impl GameState {
    /// Fresh game: empty grid, level 0, first two pieces drawn from `seed`.
    pub fn new(seed: u64) -> Self {
        let current_hash = hash(seed);
        let next_hash = hash(current_hash);
        let current_tetromino = pick_tetromino(current_hash).tetromino();
        let (row, col) = spawn_anchor(&current_tetromino);

        Self {
            grid: Grid::new(),
            level: 0,
            score: 0,
            lines_cleared: 0,
            game_end: false,
            row,
            col,
            current_tetromino,
            next_tetromino: pick_tetromino(next_hash).tetromino(),
            seed: next_hash,
        }
    }

    /// Place `piece` at an explicit anchor over `grid`. Handy for setting up positions.
    pub fn with_grid(grid: Grid, piece: TetrominoKind, row: i32, col: i32) -> Self {
        Self {
            grid,
            row,
            col,
            current_tetromino: piece.tetromino(),
            ..Self::new(1)
        }
    }

    /// Absolute grid positions of the falling piece's occupied cells.
    pub fn piece_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.current_tetromino
            .occupied()
            .map(move |(i, j, cell)| (self.row + i as i32, self.col + j as i32, cell))
    }

    /// The grid with the falling piece overlaid.
    pub fn render_grid(&self) -> Grid {
        let mut visual = self.grid;
        for (row, col, cell) in self.piece_cells() {
            if visual.get(row, col) == Some(EMPTY) {
                visual.set(row, col, cell);
            }
        }
        visual
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_grid() -> Grid {
        Grid::new()
    }

    pub fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..GRID_WIDTH {
            grid.set(row as i32, col as i32, TetrominoKind::T.color());
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, row: usize, gap_col: usize) {
        for col in 0..GRID_WIDTH {
            if col != gap_col {
                grid.set(row as i32, col as i32, TetrominoKind::T.color());
            }
        }
    }
}
