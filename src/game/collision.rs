//! Bounds correction and collision checks for the falling piece.
//!
//! A piece's bounding matrix may hang off the grid, but only where its own
//! shape is empty. Off-grid grid lookups always read as empty; the bounds
//! pass is what keeps occupied cells on the playfield.

use super::{Direction, GameState, EMPTY, GRID_HEIGHT, GRID_WIDTH};

/// Outcome of the composite collision policy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Keep falling from this state.
    Proceed(GameState),
    /// Commit the piece where it is.
    Land(GameState),
}

/// Clamp the anchor so every occupied cell lies on the grid. Empty rows and
/// columns of the shape are allowed to overhang any edge.
pub fn correct_bounds(state: &GameState) -> GameState {
    let (first_row, last_row) = state.current_tetromino.row_span();
    let (first_col, last_col) = state.current_tetromino.col_span();

    let min_col = -(first_col as i32);
    let max_col = GRID_WIDTH as i32 - 1 - last_col as i32;
    let min_row = -(first_row as i32);
    let max_row = GRID_HEIGHT as i32 - 1 - last_row as i32;

    GameState {
        row: state.row.clamp(min_row, max_row),
        col: state.col.clamp(min_col, max_col),
        ..state.clone()
    }
}

/// The piece's lowest occupied row sits on the bottom row of the grid.
pub fn is_on_ground(state: &GameState) -> bool {
    let (_, last_row) = state.current_tetromino.row_span();
    state.row + last_row as i32 >= GRID_HEIGHT as i32 - 1
}

/// Would shape cell `(i, j)`, shifted by `(d_row, d_col)`, hit a landed block?
pub fn collides_at(state: &GameState, i: usize, j: usize, d_row: i32, d_col: i32) -> bool {
    if state.current_tetromino.get(i, j) == EMPTY {
        return false;
    }
    let row = state.row + i as i32 + d_row;
    let col = state.col + j as i32 + d_col;
    state.grid.is_occupied(row, col)
}

fn any_collision(state: &GameState, d_row: i32, d_col: i32) -> bool {
    state
        .current_tetromino
        .occupied()
        .any(|(i, j, _)| collides_at(state, i, j, d_row, d_col))
}

/// Some occupied cell rests directly on a landed block.
pub fn is_stacking(state: &GameState) -> bool {
    !is_on_ground(state) && any_collision(state, 1, 0)
}

/// Shifting the piece `d_col` columns would overlap a landed block. With
/// `d_col == 0` this is a plain overlap test.
pub fn is_side_colliding(state: &GameState, d_col: i32) -> bool {
    any_collision(state, 0, d_col)
}

/// Horizontal directions shift the piece unless blocked and never land it.
/// Without a horizontal direction the piece lands when it is on the ground
/// or stacked on a block, and otherwise passes through unchanged.
pub fn check_collisions(state: &GameState, direction: Option<Direction>) -> Resolution {
    match direction.and_then(Direction::column_delta) {
        Some(d_col) => {
            if is_side_colliding(state, d_col) {
                return Resolution::Proceed(state.clone());
            }
            Resolution::Proceed(correct_bounds(&GameState {
                col: state.col + d_col,
                ..state.clone()
            }))
        }
        None if is_on_ground(state) || is_stacking(state) => Resolution::Land(state.clone()),
        None => Resolution::Proceed(state.clone()),
    }
}
