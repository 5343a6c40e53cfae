use std::{
    io::{stdout, Stdout},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use blockfall::config::Config;
use blockfall::game::{Direction, Event};
use blockfall::replay;
use blockfall::session::Session;
use blockfall::ui;

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate().context("invalid configuration")?;

    if let Some(script) = config.replay.as_deref() {
        let state = replay::run(&config, script)?;
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, config);

    // Always try to restore terminal state.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    result
}

// ============================================================================
// Main Loop
// ============================================================================

/// Ticks and key presses are merged into one ordered stream: whichever the
/// poll delivers first is folded first.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: Config) -> Result<()> {
    let mut session = Session::new(config);
    session.start();

    let mut last_tick = Instant::now();
    let mut status_line: Option<String> = None;

    loop {
        if let Some(latest) = session.take_events().last() {
            status_line = Some(latest.to_string());
        }

        terminal.draw(|frame| ui::render(frame, &session, status_line.as_deref()))?;

        let tick_duration = session.tick_interval();
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                            session.stop();
                            break;
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => session.toggle_pause(),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            session.restart();
                            last_tick = Instant::now();
                        }
                        KeyCode::Left => {
                            session.handle(Event::Move(Direction::Left));
                        }
                        KeyCode::Right => {
                            session.handle(Event::Move(Direction::Right));
                        }
                        KeyCode::Down => {
                            session.handle(Event::Move(Direction::Down));
                        }
                        KeyCode::Up => {
                            session.handle(Event::Move(Direction::Up));
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            session.handle(Event::Tick);
            last_tick = Instant::now();
        }
    }

    Ok(())
}
