//! Shared layout pieces: outer frame, status bar, info panel and overlays.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the right-hand info panel, borders included.
pub const INFO_PANEL_WIDTH: u16 = 24;
const STATUS_ROWS: u16 = 2;

/// Screen regions for one frame of the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Board, top left. At least `board_rows` tall when the screen allows.
    pub content: Rect,
    /// Phase message and key hints under the board.
    pub status_bar: Rect,
    /// Score and settings, right side.
    pub info_panel: Rect,
}

/// Split the area inside the outer border. The board gets the rows it needs,
/// the status bar sits directly below it and any spare rows go underneath.
pub fn split_game_area(inner: Rect, board_rows: u16) -> GameLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(board_rows),
            Constraint::Length(STATUS_ROWS),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    GameLayout {
        content: rows[0],
        status_bar: rows[1],
        info_panel: columns[1],
    }
}

/// Clear the screen, draw the titled outer border and lay out the game.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    board_rows: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    split_game_area(inner, board_rows)
}

/// One key binding shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

pub const fn hint(key: &'static str, action: &'static str) -> KeyHint {
    KeyHint { key, action }
}

/// What the status bar shows for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub message: &'static str,
    pub color: Color,
    pub hints: &'static [KeyHint],
}

/// Key hints as `[Key] action` pairs separated by two spaces.
pub fn hint_spans(hints: &[KeyHint]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, h) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(h.key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", h.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

/// Message on the first row, hints on the second when there is room.
pub fn render_status_bar(frame: &mut Frame, area: Rect, status: &StatusLine) {
    if area.height == 0 {
        return;
    }

    let message = Paragraph::new(status.message)
        .style(Style::default().fg(status.color))
        .alignment(Alignment::Center);
    frame.render_widget(message, Rect { height: 1, ..area });

    if area.height >= STATUS_ROWS && !status.hints.is_empty() {
        let hints = Paragraph::new(Line::from(hint_spans(status.hints)))
            .alignment(Alignment::Center);
        let row = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        frame.render_widget(hints, row);
    }
}

/// Render the info panel border and return the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A label/value row for the info panel.
pub fn info_line(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(value_color)),
    ])
}

/// Render a single bold line centered on `area`.
pub fn render_center_prompt(frame: &mut Frame, area: Rect, prompt: &str, color: Color) {
    if area.height < 1 || area.width < prompt.len() as u16 {
        return;
    }
    let center_y = area.y + area.height / 2;
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;
    let line = Paragraph::new(Line::from(Span::styled(
        prompt.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, center_y, prompt.len() as u16, 1));
}

/// Render a centered modal box with a colored title and body lines.
pub fn render_modal(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    title_color: Color,
    body: Vec<Line<'static>>,
) {
    let width = 40u16.min(area.width);
    let height = (body.len() as u16 + 4).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let modal = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
