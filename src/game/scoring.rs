use super::GameState;

/// Points per cleared row.
pub const LINE_SCORE: u32 = 10;
/// Rows to clear before the level goes up.
pub const LINES_PER_LEVEL: u32 = 10;

/// Clear the topmost full row, if any, and award it. One row per call.
pub fn update_score(state: &GameState) -> GameState {
    if state.game_end {
        return state.clone();
    }
    let Some(row) = state.grid.first_full_row() else {
        return state.clone();
    };

    let mut grid = state.grid;
    grid.remove_row(row);

    let mut level = state.level;
    let mut lines_cleared = state.lines_cleared + 1;
    if lines_cleared >= LINES_PER_LEVEL {
        level += 1;
        lines_cleared = 0;
    }

    GameState {
        grid,
        level,
        lines_cleared,
        score: state.score + LINE_SCORE,
        ..state.clone()
    }
}

/// Repeat `update_score` until no full row is left. Every row scores.
pub fn clear_full_rows(state: &GameState) -> GameState {
    let mut current = state.clone();
    loop {
        let next = update_score(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
