//! Top-level state machine: folds tick and input events into the state.

use super::{
    check_collisions, correct_bounds, create_new_state, is_side_colliding, is_stacking, Direction,
    Event, GameState, Resolution, EMPTY,
};

/// Apply one event. A finished game is returned unchanged.
pub fn process_event(event: Event, state: &GameState) -> GameState {
    if state.game_end {
        return state.clone();
    }

    let next = match event {
        Event::Tick | Event::Move(Direction::Down) => fall(state),
        Event::Move(Direction::Up) => rotate(state),
        Event::Move(direction @ (Direction::Left | Direction::Right)) => {
            match check_collisions(state, Some(direction)) {
                Resolution::Proceed(next) | Resolution::Land(next) => next,
            }
        }
    };

    correct_bounds(&next)
}

/// Land if resting on the floor or the stack, otherwise drop one row.
fn fall(state: &GameState) -> GameState {
    match check_collisions(state, None) {
        Resolution::Land(landed) => tetromino_landed(&landed),
        Resolution::Proceed(falling) => GameState {
            row: falling.row + 1,
            ..falling
        },
    }
}

/// Clockwise rotation in place. Rejected when the rotated, bounds-corrected
/// piece would overlap a landed block.
pub fn rotate(state: &GameState) -> GameState {
    let rotated = correct_bounds(&GameState {
        current_tetromino: state.current_tetromino.rotated(),
        ..state.clone()
    });

    if is_side_colliding(&rotated, 0) {
        return state.clone();
    }

    match check_collisions(&rotated, None) {
        Resolution::Land(landed) => tetromino_landed(&landed),
        Resolution::Proceed(next) => next,
    }
}

/// Commit the falling piece into the grid and roll over to the next piece.
/// Ends the game when the fresh piece is already blocked.
pub fn tetromino_landed(state: &GameState) -> GameState {
    let mut grid = state.grid;
    for (row, col, cell) in state.piece_cells() {
        // first writer wins
        if grid.get(row, col) == Some(EMPTY) {
            grid.set(row, col, cell);
        }
    }

    let fresh = create_new_state(Some(&GameState {
        grid,
        ..state.clone()
    }));

    if is_side_colliding(&fresh, 0) || is_stacking(&fresh) {
        GameState {
            game_end: true,
            ..fresh
        }
    } else {
        fresh
    }
}
