use serde::{Deserialize, Serialize};

use super::{Cell, EMPTY};

/// Largest bounding matrix in the catalog (the I piece).
pub const MAX_SIZE: usize = 4;

// ============================================================================
// Catalog
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl TetrominoKind {
    /// Catalog order; the sequencer indexes into this.
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::J,
        TetrominoKind::L,
        TetrominoKind::O,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::T,
    ];

    /// Cell value painted by this piece (1..=7).
    pub fn color(self) -> Cell {
        match self {
            TetrominoKind::I => 1,
            TetrominoKind::J => 2,
            TetrominoKind::L => 3,
            TetrominoKind::O => 4,
            TetrominoKind::S => 5,
            TetrominoKind::Z => 6,
            TetrominoKind::T => 7,
        }
    }

    pub fn from_color(cell: Cell) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.color() == cell)
    }

    /// The template matrix in spawn orientation.
    pub fn tetromino(self) -> Tetromino {
        let c = self.color();
        match self {
            TetrominoKind::I => Tetromino::from_rows(&[
                &[0, 0, 0, 0],
                &[c, c, c, c],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            TetrominoKind::J => Tetromino::from_rows(&[&[c, 0, 0], &[c, c, c], &[0, 0, 0]]),
            TetrominoKind::L => Tetromino::from_rows(&[&[0, 0, c], &[c, c, c], &[0, 0, 0]]),
            TetrominoKind::O => Tetromino::from_rows(&[&[c, c], &[c, c]]),
            TetrominoKind::S => Tetromino::from_rows(&[&[0, c, c], &[c, c, 0], &[0, 0, 0]]),
            TetrominoKind::Z => Tetromino::from_rows(&[&[c, c, 0], &[0, c, c], &[0, 0, 0]]),
            TetrominoKind::T => Tetromino::from_rows(&[&[0, c, 0], &[c, c, c], &[0, 0, 0]]),
        }
    }
}

// ============================================================================
// Shape matrix
// ============================================================================

/// A square shape matrix. Cells outside `size x size` are always empty.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tetromino {
    size: usize,
    cells: [[Cell; MAX_SIZE]; MAX_SIZE],
}

impl Tetromino {
    /// Build from square rows. Panics on a non-square or oversized matrix,
    /// which only the catalog above constructs.
    fn from_rows(rows: &[&[Cell]]) -> Self {
        let size = rows.len();
        assert!(size <= MAX_SIZE, "shape larger than {MAX_SIZE}x{MAX_SIZE}");
        let mut cells = [[EMPTY; MAX_SIZE]; MAX_SIZE];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape must be square");
            cells[i][..size].copy_from_slice(row);
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Cell {
        if i < self.size && j < self.size {
            self.cells[i][j]
        } else {
            EMPTY
        }
    }

    /// Rows of the matrix, `size` cells each.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size].iter().map(move |row| &row[..self.size])
    }

    /// Occupied cells as `(i, j, value)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.size).flat_map(move |i| {
            (0..self.size).filter_map(move |j| {
                let cell = self.cells[i][j];
                (cell != EMPTY).then_some((i, j, cell))
            })
        })
    }

    /// Color of this piece, i.e. its nonzero cell value.
    pub fn color(&self) -> Cell {
        self.occupied().map(|(_, _, cell)| cell).next().unwrap_or(EMPTY)
    }

    pub fn kind(&self) -> Option<TetrominoKind> {
        TetrominoKind::from_color(self.color())
    }

    /// First and last matrix rows holding an occupied cell.
    pub fn row_span(&self) -> (usize, usize) {
        span(self.occupied().map(|(i, _, _)| i), self.size)
    }

    /// First and last matrix columns holding an occupied cell.
    pub fn col_span(&self) -> (usize, usize) {
        span(self.occupied().map(|(_, j, _)| j), self.size)
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut cells = [[EMPTY; MAX_SIZE]; MAX_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Self { size: n, cells }
    }
}

fn span(indices: impl Iterator<Item = usize>, size: usize) -> (usize, usize) {
    indices
        .fold(None, |acc: Option<(usize, usize)>, idx| match acc {
            None => Some((idx, idx)),
            Some((lo, hi)) => Some((lo.min(idx), hi.max(idx))),
        })
        .unwrap_or((0, size.saturating_sub(1)))
}
