//! Fixed 20x10 playfield. Row 0 is the top.

use serde::{Deserialize, Serialize};

use super::{Cell, EMPTY, GRID_HEIGHT, GRID_WIDTH};

pub type Row = [Cell; GRID_WIDTH];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Grid {
    rows: [Row; GRID_HEIGHT],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            rows: [[EMPTY; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn from_rows(rows: [Row; GRID_HEIGHT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row; GRID_HEIGHT] {
        &self.rows
    }

    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 || row >= GRID_HEIGHT as i32 || col >= GRID_WIDTH as i32 {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Cell at `(row, col)`, or `None` off the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|(r, c)| self.rows[r][c])
    }

    /// Returns false if `(row, col)` is off the grid.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some((r, c)) => {
                self.rows[r][c] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and nonzero. Off-grid positions read as empty.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(cell) if cell != EMPTY)
    }

    pub fn is_row_complete(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.iter().all(|cell| *cell != EMPTY))
    }

    pub fn filled_count_in_row(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .map_or(0, |r| r.iter().filter(|cell| **cell != EMPTY).count())
    }

    /// Topmost full row.
    pub fn first_full_row(&self) -> Option<usize> {
        (0..GRID_HEIGHT).find(|&row| self.is_row_complete(row))
    }

    /// Drop `row`, shift everything above it down one and open an empty row on top.
    pub fn remove_row(&mut self, row: usize) {
        if row >= GRID_HEIGHT {
            return;
        }
        self.rows.copy_within(0..row, 1);
        self.rows[0] = [EMPTY; GRID_WIDTH];
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell != EMPTY)
            .count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
