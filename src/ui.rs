//! Terminal renderer. Reads a session snapshot, never mutates it.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::{Cell, TetrominoKind, EMPTY, GRID_HEIGHT, GRID_WIDTH, LINES_PER_LEVEL};
use crate::session::{Session, Status};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";

// ============================================================================
// Color Mapping
// ============================================================================

pub fn cell_color(cell: Cell) -> Color {
    match TetrominoKind::from_color(cell) {
        Some(TetrominoKind::I) => Color::Cyan,
        Some(TetrominoKind::J) => Color::Blue,
        Some(TetrominoKind::L) => Color::Rgb(255, 165, 0),
        Some(TetrominoKind::O) => Color::Yellow,
        Some(TetrominoKind::S) => Color::Green,
        Some(TetrominoKind::Z) => Color::Red,
        Some(TetrominoKind::T) => Color::Magenta,
        None => Color::Reset,
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    if cell == EMPTY {
        Span::raw(EMPTY_CHAR)
    } else {
        Span::styled(BLOCK_CHAR, Style::default().fg(cell_color(cell)))
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render(frame: &mut Frame, session: &Session, status_line: Option<&str>) {
    let area = frame.size();

    render_game(frame, session, status_line, area);

    if session.state().game_end {
        render_game_over(frame, session, area);
    } else if session.status() == Status::Paused {
        render_paused(frame, area);
    }
}

fn render_game(frame: &mut Frame, session: &Session, status_line: Option<&str>, area: Rect) {
    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;
    let side_width = 14;
    let total_width = grid_display_width + side_width + 2;
    let total_height = grid_display_height + 3;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];

    // [Grid][Next / Info]
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(side_width),
    ])
    .split(game_row);

    let side = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(horizontal[1]);

    render_grid(frame, session, horizontal[0]);
    render_preview(frame, session, side[0]);
    render_info(frame, session, side[1]);

    let footer = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 2,
    };

    if footer.y + 1 < area.height {
        let mut lines = vec![Line::from(
            "←→: Move | ↓: Drop | ↑: Rotate | P: Pause | R: Restart | Q/ESC: Quit",
        )];
        if let Some(status) = status_line {
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }
        let controls = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, footer);
    }
}

fn render_grid(frame: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visual_grid = session.state().render_grid();
    let lines: Vec<Line> = visual_grid
        .rows()
        .iter()
        .map(|row| Line::from(row.iter().map(|&cell| cell_span(cell)).collect::<Vec<_>>()))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_preview(frame: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let next = &session.state().next_tetromino;
    let (first_row, last_row) = next.row_span();

    // Only the occupied rows; the preview box is short.
    let lines: Vec<Line> = next
        .rows()
        .skip(first_row)
        .take(last_row - first_row + 1)
        .map(|row| {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(row.iter().map(|&cell| cell_span(cell)));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = session.state();
    let lines = vec![
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", state.score)),
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", state.level)),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}/{}", state.lines_cleared, LINES_PER_LEVEL)),
        Line::from(""),
        Line::from(Span::styled("Best", Style::default().fg(Color::Magenta))),
        Line::from(format!("{}", session.high_score().max(state.score))),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, session: &Session, area: Rect) {
    let state = session.state();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", state.score)),
        Line::from(format!("Level: {}", state.level)),
        Line::from(format!("Best: {}", session.high_score())),
        Line::from(""),
        Line::from(Span::styled(
            "R to restart, ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(28, 12, area);
    frame.render_widget(paragraph, popup_area);
}

fn render_paused(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("PAUSED", Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            "Press P to continue",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Paused ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(24, 10, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}
