//! Host-side controller around the pure engine.
//!
//! The engine keeps no state between calls; the session owns the current
//! fold, the in-memory high score and whether play is ongoing, and records
//! what happened as a drainable queue of events.

use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::game::{clear_full_rows, create_new_state, process_event, Event, GameState, LINE_SCORE};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Idle,
    Running,
    Paused,
    Stopped,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SessionEvent {
    Started,
    Restarted,
    Stopped,
    Paused,
    Resumed,
    PieceLanded,
    LinesCleared(u32),
    LevelUp(u32),
    GameOver { score: u32 },
    HighScore(u32),
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Started => write!(f, "Game started"),
            SessionEvent::Restarted => write!(f, "Game restarted"),
            SessionEvent::Stopped => write!(f, "Game stopped"),
            SessionEvent::Paused => write!(f, "Paused"),
            SessionEvent::Resumed => write!(f, "Resumed"),
            SessionEvent::PieceLanded => write!(f, "Piece landed"),
            SessionEvent::LinesCleared(1) => write!(f, "Cleared 1 line"),
            SessionEvent::LinesCleared(n) => write!(f, "Cleared {n} lines"),
            SessionEvent::LevelUp(level) => write!(f, "Level {level}!"),
            SessionEvent::GameOver { score } => write!(f, "Game over with {score} points"),
            SessionEvent::HighScore(score) => write!(f, "New high score: {score}"),
        }
    }
}

pub struct Session {
    config: Config,
    state: GameState,
    status: Status,
    high_score: u32,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let state = fresh_state(&config);
        Self {
            config,
            state,
            status: Status::Idle,
            high_score: 0,
            events: Vec::new(),
        }
    }

    /// Idle session over a prepared state. Restarts still draw from `config`.
    pub fn with_state(config: Config, state: GameState) -> Self {
        Self {
            config,
            state,
            status: Status::Idle,
            high_score: 0,
            events: Vec::new(),
        }
    }

    /// Begin play. Starting a stopped session restarts it.
    pub fn start(&mut self) {
        match self.status {
            Status::Idle => {
                self.status = Status::Running;
                self.events.push(SessionEvent::Started);
            }
            Status::Stopped => self.restart(),
            Status::Running | Status::Paused => {}
        }
    }

    /// Throw the current game away and begin a new one. The high score survives.
    pub fn restart(&mut self) {
        self.state = fresh_state(&self.config);
        self.status = Status::Running;
        self.events.push(SessionEvent::Restarted);
    }

    pub fn stop(&mut self) {
        if self.status != Status::Stopped {
            self.status = Status::Stopped;
            self.events.push(SessionEvent::Stopped);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            Status::Running if !self.state.game_end => {
                self.status = Status::Paused;
                self.events.push(SessionEvent::Paused);
            }
            Status::Paused => {
                self.status = Status::Running;
                self.events.push(SessionEvent::Resumed);
            }
            _ => {
                // Nothing to pause
            }
        }
    }

    /// Fold one event into the game. Returns false when play is not ongoing.
    pub fn handle(&mut self, event: Event) -> bool {
        if !self.is_ongoing() {
            return false;
        }

        let moved = process_event(event, &self.state);
        if moved.seed != self.state.seed {
            self.events.push(SessionEvent::PieceLanded);
        }

        let scored = clear_full_rows(&moved);
        let lines = (scored.score - moved.score) / LINE_SCORE;
        if lines > 0 {
            self.events.push(SessionEvent::LinesCleared(lines));
        }
        if scored.level > self.state.level {
            self.events.push(SessionEvent::LevelUp(scored.level));
        }

        if scored.game_end {
            self.events.push(SessionEvent::GameOver {
                score: scored.score,
            });
            if scored.score > self.high_score {
                self.high_score = scored.score;
                self.events.push(SessionEvent::HighScore(scored.score));
            }
        }

        self.state = scored;
        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == Status::Running && !self.state.game_end
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.state.level)
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

fn fresh_state(config: &Config) -> GameState {
    match config.seed {
        Some(seed) => GameState::new(seed),
        None => create_new_state(None),
    }
}
