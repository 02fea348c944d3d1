//! Play field rendering.
//!
//! Uses half-block pixel rendering: each game cell maps to a colored pixel,
//! and pairs of vertical pixels are packed into one terminal row using `▀`
//! with fg = top pixel and bg = bottom pixel.

use super::game_common::{
    create_game_layout, hint, info_line, render_center_prompt, render_info_panel_frame,
    render_modal, render_status_bar, KeyHint, StatusLine,
};
use super::theme::{body_color, food_color, palette, Palette};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use slither::core::{GameOutcome, Phase, Snapshot};

const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const IDLE_HINTS: &[KeyHint] = &[
    hint("[Enter]", "Start"),
    hint("[1-4]", "Difficulty"),
    hint("[Q]", "Quit"),
];
const RUNNING_HINTS: &[KeyHint] = &[
    hint("[Arrows/WASD]", "Move"),
    hint("[Space]", "Pause"),
    hint("[R]", "Reset"),
];
const PAUSED_HINTS: &[KeyHint] = &[
    hint("[Space]", "Resume"),
    hint("[R]", "Reset"),
    hint("[Q]", "Quit"),
];
const GAME_OVER_HINTS: &[KeyHint] = &[
    hint("[Enter]", "Restart"),
    hint("[R]", "Reset"),
    hint("[Q]", "Quit"),
];

/// Render the whole game screen from a session snapshot.
pub fn render_game_scene(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let colors = palette(snap.preferences.theme);
    let layout = create_game_layout(frame, area, " Slither ", colors.accent, board_rows(snap));

    render_play_field(frame, layout.content, snap, &colors);

    match snap.phase {
        Phase::Idle => render_center_prompt(
            frame,
            layout.content,
            "[ Press Enter to Start ]",
            Color::White,
        ),
        Phase::Paused => render_center_prompt(frame, layout.content, "[ Paused ]", Color::Yellow),
        Phase::GameOver => render_game_over(frame, layout.content, snap),
        Phase::Running => {}
    }

    let status = status_line(snap.phase, colors.accent);
    render_status_bar(frame, layout.status_bar, &status);
    render_info_panel(frame, layout.info_panel, snap, &colors);
}

/// Build the color of every cell, row-major. `None` is an empty cell.
fn pixel_grid(snap: &Snapshot, colors: &Palette) -> Vec<Vec<Option<Color>>> {
    let size = snap.grid_size.max(0) as usize;
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; size]; size];

    if let Some(food) = snap.food {
        let (fx, fy) = (food.x as usize, food.y as usize);
        if food.x >= 0 && food.y >= 0 && fx < size && fy < size {
            pixels[fy][fx] = Some(food_color(colors, snap.tick_count));
        }
    }

    let len = snap.snake.len();
    // Tail first so the head wins if it overlaps a body cell after a bite
    for (i, seg) in snap.snake.iter().enumerate().rev() {
        if seg.x < 0 || seg.y < 0 {
            continue;
        }
        let (sx, sy) = (seg.x as usize, seg.y as usize);
        if sx < size && sy < size {
            pixels[sy][sx] = Some(if i == 0 {
                colors.head
            } else {
                body_color(colors, i, len)
            });
        }
    }
    pixels
}

fn empty_color(colors: &Palette, grid_visible: bool, x: usize, y: usize) -> Color {
    if grid_visible && (x + y) % 2 == 1 {
        colors.grid
    } else {
        colors.empty
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, snap: &Snapshot, colors: &Palette) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let size = snap.grid_size.max(0) as usize;
    let pixels = pixel_grid(snap, colors);
    let grid_visible = snap.preferences.grid_visible;

    let content_rows = size.div_ceil(2);
    let render_w = ((size + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;
    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let border = Style::default().fg(colors.border);

    // ── Top border with score ───────────────────────────────────
    {
        let score_val = snap.score.to_string();
        let label = "Score: ";
        let full_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + full_len);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_TL.to_string(), border)];
        if pad_before > 0 {
            spans.push(Span::styled(
                std::iter::repeat(BORDER_H).take(pad_before).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(label, border));
        spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        if pad_after > 0 {
            spans.push(Span::styled(
                std::iter::repeat(BORDER_H).take(pad_after).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(BORDER_TR.to_string(), border));
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, y_off, render_w, 1),
        );
    }

    // ── Cells ───────────────────────────────────────────────────
    for term_row in 0..content_rows {
        let top_y = term_row * 2;
        let bot_y = term_row * 2 + 1;

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), border)];
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for x in 0..size.min(inner_w) {
            let fg =
                pixels[top_y][x].unwrap_or_else(|| empty_color(colors, grid_visible, x, top_y));
            let bg = if bot_y < size {
                pixels[bot_y][x].unwrap_or_else(|| empty_color(colors, grid_visible, x, bot_y))
            } else {
                colors.empty
            };

            // Batch consecutive cells with the same style into one span
            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(cur_text, Style::default().fg(cur_fg).bg(cur_bg)));
        }
        spans.push(Span::styled(BORDER_V.to_string(), border));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let mut s = String::new();
        s.push(BORDER_BL);
        s.extend(std::iter::repeat(BORDER_H).take(inner_w));
        s.push(BORDER_BR);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(s, border))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

/// Terminal rows for the bordered board: half-block rows plus top and bottom.
fn board_rows(snap: &Snapshot) -> u16 {
    (snap.grid_size.max(0) as u16).div_ceil(2) + 2
}

fn status_line(phase: Phase, accent: Color) -> StatusLine {
    match phase {
        Phase::Idle => StatusLine {
            message: "Ready",
            color: accent,
            hints: IDLE_HINTS,
        },
        Phase::Running => StatusLine {
            message: "Slither!",
            color: Color::Green,
            hints: RUNNING_HINTS,
        },
        Phase::Paused => StatusLine {
            message: "Paused",
            color: Color::Yellow,
            hints: PAUSED_HINTS,
        },
        Phase::GameOver => StatusLine {
            message: "Game over",
            color: Color::Red,
            hints: GAME_OVER_HINTS,
        },
    }
}

fn on_off(flag: bool) -> String {
    let text = if flag { "on" } else { "off" };
    text.to_string()
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot, colors: &Palette) {
    let inner = render_info_panel_frame(frame, area);
    let prefs = &snap.preferences;

    let lines: Vec<Line> = vec![
        info_line("Difficulty", snap.difficulty.label().to_string(), Color::Cyan),
        info_line("Score", snap.score.to_string(), Color::White),
        info_line("Level", snap.level.to_string(), Color::White),
        info_line("Best", snap.high_score.to_string(), Color::Yellow),
        info_line("Speed", format!("{}ms", snap.speed_ms), Color::White),
        Line::from(""),
        info_line("Theme [T]", prefs.theme.name().to_string(), colors.accent),
        info_line("Grid [G]", on_off(prefs.grid_visible), Color::White),
        info_line("Sound [M]", on_off(prefs.sound_enabled), Color::White),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(colors.head)),
            Span::styled("Head", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {FULL_BLOCK} "),
                Style::default().fg(body_color(colors, 0, 2)),
            ),
            Span::styled("Body", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {FULL_BLOCK} "),
                Style::default().fg(food_color(colors, 0)),
            ),
            Span::styled("Food", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let (title, color, reason) = match snap.outcome {
        Some(GameOutcome::BoardFull) => (
            ":: BOARD CLEARED ::",
            Color::Green,
            "The snake filled the whole board!".to_string(),
        ),
        Some(GameOutcome::Collision(kind)) => (
            "GAME OVER",
            Color::Red,
            format!("The snake {}.", kind.describe()),
        ),
        None => ("GAME OVER", Color::Red, String::new()),
    };

    let body = vec![
        Line::from(Span::styled(reason, Style::default().fg(Color::White))),
        Line::from(""),
        info_line("Final score", snap.score.to_string(), Color::White),
        info_line("High score", snap.high_score.to_string(), Color::Yellow),
        info_line("Level", snap.level.to_string(), Color::Cyan),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] play again",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_modal(frame, area, title, color, body);
}
