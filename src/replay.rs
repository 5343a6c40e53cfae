//! Headless event scripts.

use crate::config::Config;
use crate::game::{Direction, Event, GameState};
use crate::session::Session;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum ReplayError {
    #[error("unknown command {command:?} at position {position}")]
    UnknownCommand { command: char, position: usize },
}

/// `t` tick, `l` left, `r` right, `d` down, `u` rotate. Whitespace is skipped.
pub fn parse_script(script: &str) -> Result<Vec<Event>, ReplayError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, command)| match command.to_ascii_lowercase() {
            't' => Ok(Event::Tick),
            'l' => Ok(Event::Move(Direction::Left)),
            'r' => Ok(Event::Move(Direction::Right)),
            'd' => Ok(Event::Move(Direction::Down)),
            'u' => Ok(Event::Move(Direction::Up)),
            _ => Err(ReplayError::UnknownCommand { command, position }),
        })
        .collect()
}

/// Play `script` through a fresh session and return the final state.
/// Events after game over are ignored.
pub fn run(config: &Config, script: &str) -> Result<GameState, ReplayError> {
    let events = parse_script(script)?;

    let mut session = Session::new(config.clone());
    session.start();
    for event in events {
        if !session.handle(event) {
            break;
        }
    }
    Ok(session.state().clone())
}
