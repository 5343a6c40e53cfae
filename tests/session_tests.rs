//! Tests for the host session controller and headless replay

use std::time::Duration;

use blockfall::config::Config;
use blockfall::game::{
    test_helpers::*, Direction, Event, GameState, TetrominoKind, GRID_HEIGHT, GRID_WIDTH,
};
use blockfall::replay::{self, parse_script, ReplayError};
use blockfall::session::{Session, SessionEvent, Status};

const SEED: u64 = 12345678;

fn started(state: GameState) -> Session {
    let mut session = Session::with_state(Config::with_seed(SEED), state);
    session.start();
    session.take_events();
    session
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn idle_session_ignores_events() {
        let mut session = Session::new(Config::with_seed(SEED));
        let before = session.state().clone();

        assert_eq!(session.status(), Status::Idle);
        assert!(!session.handle(Event::Tick));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn start_emits_event() {
        let mut session = Session::new(Config::with_seed(SEED));
        session.start();

        assert_eq!(session.status(), Status::Running);
        assert!(session.is_ongoing());
        assert_eq!(session.take_events(), vec![SessionEvent::Started]);
    }

    #[test]
    fn seeded_session_starts_from_seeded_state() {
        let session = Session::new(Config::with_seed(SEED));
        assert_eq!(session.state(), &GameState::new(SEED));
    }

    #[test]
    fn pause_blocks_and_resume_allows() {
        let mut session = Session::new(Config::with_seed(SEED));
        session.start();
        session.toggle_pause();

        assert_eq!(session.status(), Status::Paused);
        assert!(!session.handle(Event::Tick));

        session.toggle_pause();
        assert!(session.handle(Event::Tick));

        let events = session.take_events();
        assert!(events.contains(&SessionEvent::Paused));
        assert!(events.contains(&SessionEvent::Resumed));
    }

    #[test]
    fn stop_then_start_restarts() {
        let mut session = Session::new(Config::with_seed(SEED));
        session.start();
        for _ in 0..5 {
            session.handle(Event::Tick);
        }
        session.stop();

        assert!(!session.handle(Event::Tick));

        session.start();
        assert_eq!(session.status(), Status::Running);
        assert_eq!(session.state(), &GameState::new(SEED));
        assert!(session.take_events().contains(&SessionEvent::Restarted));
    }

    #[test]
    fn restart_replaces_state() {
        let mut session = Session::new(Config::with_seed(SEED));
        session.start();
        session.handle(Event::Move(Direction::Left));
        session.handle(Event::Tick);

        session.restart();

        assert_eq!(session.state(), &GameState::new(SEED));
        assert!(session.is_ongoing());
    }
}

// ============================================================================
// Play Tests
// ============================================================================

mod play {
    use super::*;

    #[test]
    fn landing_clears_lines_and_reports() {
        let mut grid = empty_grid();
        for col in 0..GRID_WIDTH as i32 {
            if col != 4 && col != 5 {
                grid.set(GRID_HEIGHT as i32 - 1, col, 7);
                grid.set(GRID_HEIGHT as i32 - 2, col, 7);
            }
        }
        let mut session = started(GameState::with_grid(grid, TetrominoKind::O, GRID_HEIGHT as i32 - 2, 4));

        assert!(session.handle(Event::Tick));

        let events = session.take_events();
        assert!(events.contains(&SessionEvent::PieceLanded));
        assert!(events.contains(&SessionEvent::LinesCleared(2)));
        assert_eq!(session.state().score, 20);
        assert_eq!(session.state().grid.total_filled_cells(), 0);
    }

    #[test]
    fn level_up_reported() {
        let mut grid = empty_grid();
        fill_row_with_gap(&mut grid, GRID_HEIGHT - 1, 0);
        let mut state = GameState::with_grid(grid, TetrominoKind::I, 0, -2);
        state.current_tetromino = state.current_tetromino.rotated();
        state.lines_cleared = 9;
        let mut session = started(state);

        while session.state().lines_cleared == 9 && session.handle(Event::Tick) {}

        assert!(session.take_events().contains(&SessionEvent::LevelUp(1)));
        assert_eq!(session.state().level, 1);
    }

    #[test]
    fn game_over_records_high_score() {
        let mut grid = empty_grid();
        for row in 2..GRID_HEIGHT {
            fill_row_with_gap(&mut grid, row, 0);
        }
        let mut state = GameState::with_grid(grid, TetrominoKind::O, 0, 4);
        state.score = 50;
        let mut session = started(state);

        assert!(session.handle(Event::Tick));

        assert!(!session.is_ongoing());
        assert_eq!(session.high_score(), 50);
        let events = session.take_events();
        assert!(events.contains(&SessionEvent::GameOver { score: 50 }));
        assert!(events.contains(&SessionEvent::HighScore(50)));

        assert!(!session.handle(Event::Tick));
        session.restart();
        assert_eq!(session.high_score(), 50);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn dropping_only_in_the_middle_ends_game() {
        let mut session = Session::new(Config::with_seed(SEED));
        session.start();

        let mut ticks = 0;
        while session.handle(Event::Tick) {
            ticks += 1;
            assert!(ticks < 10_000, "game never ended");
        }

        assert!(session.state().game_end);
        assert_eq!(session.state().score, 0);
        let events = session.take_events();
        assert!(events.contains(&SessionEvent::GameOver { score: 0 }));
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::HighScore(_))));
    }

    #[test]
    fn tick_interval_speeds_up_with_level() {
        let mut state = GameState::new(SEED);
        let session = Session::with_state(Config::with_seed(SEED), state.clone());
        assert_eq!(session.tick_interval(), Duration::from_millis(1000));

        state.level = 4;
        let session = Session::with_state(Config::with_seed(SEED), state.clone());
        assert_eq!(session.tick_interval(), Duration::from_millis(700));

        state.level = 50;
        let session = Session::with_state(Config::with_seed(SEED), state);
        assert_eq!(session.tick_interval(), Duration::from_millis(100));
    }
}

// ============================================================================
// Replay Tests
// ============================================================================

mod replays {
    use super::*;

    #[test]
    fn parses_all_commands() {
        let events = parse_script("t L r\nd u").unwrap();
        assert_eq!(
            events,
            vec![
                Event::Tick,
                Event::Move(Direction::Left),
                Event::Move(Direction::Right),
                Event::Move(Direction::Down),
                Event::Move(Direction::Up),
            ]
        );
    }

    #[test]
    fn rejects_unknown_command() {
        assert_eq!(
            parse_script("tt x"),
            Err(ReplayError::UnknownCommand {
                command: 'x',
                position: 3
            })
        );
    }

    #[test]
    fn replay_matches_manual_fold() {
        let script = "t".repeat(GRID_HEIGHT - 1);
        let state = replay::run(&Config::with_seed(SEED), &script).unwrap();

        let o = TetrominoKind::O.color();
        assert_eq!(state.grid.get(GRID_HEIGHT as i32 - 1, 4), Some(o));
        assert_eq!(state.grid.get(GRID_HEIGHT as i32 - 2, 5), Some(o));
        assert_eq!(state.current_tetromino, TetrominoKind::J.tetromino());
    }

    #[test]
    fn replay_is_deterministic_and_serializable() {
        let config = Config::with_seed(SEED);
        let script = "ttllu tttrr uuddd ".repeat(20);

        let a = replay::run(&config, &script).unwrap();
        let b = replay::run(&config, &script).unwrap();
        assert_eq!(a, b);

        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"game_end\""));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
