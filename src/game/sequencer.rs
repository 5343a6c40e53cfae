//! Piece sequencing with one piece of lookahead.

use std::time::{SystemTime, UNIX_EPOCH};

use super::{hash, scale, GameState, Tetromino, TetrominoKind, GRID_WIDTH};

/// Catalog entry for a hash: `floor(scale(hash) * 7)`.
pub fn pick_tetromino(hash: u64) -> TetrominoKind {
    let count = TetrominoKind::ALL.len();
    let index = (scale(hash) * count as f64).floor() as usize;
    TetrominoKind::ALL[index.min(count - 1)]
}

/// Spawn anchor: horizontally centered, first occupied row on row 0.
pub fn spawn_anchor(tetromino: &Tetromino) -> (i32, i32) {
    let (first_row, _) = tetromino.row_span();
    let col = (GRID_WIDTH - tetromino.size()) / 2;
    (-(first_row as i32), col as i32)
}

/// Wall-clock milliseconds, used once to seed a new game.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1)
}

/// `None` starts a fresh game seeded from the clock. `Some(previous)` rolls
/// over to the next piece: `next` becomes `current`, a new `next` is drawn by
/// hashing the stored seed forward once, and grid, score and level carry over.
pub fn create_new_state(previous: Option<&GameState>) -> GameState {
    let Some(previous) = previous else {
        return GameState::new(clock_seed());
    };

    let seed = hash(previous.seed);
    let current_tetromino = previous.next_tetromino;
    let (row, col) = spawn_anchor(&current_tetromino);

    GameState {
        row,
        col,
        current_tetromino,
        next_tetromino: pick_tetromino(seed).tetromino(),
        seed,
        ..previous.clone()
    }
}
