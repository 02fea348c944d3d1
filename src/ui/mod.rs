pub mod game_common;
pub mod game_scene;
pub mod theme;

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use slither::core::Snapshot;

/// Smallest terminal that fits the board, its borders and the info panel.
const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 16;

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, snapshot: &Snapshot) {
    let size = frame.size();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let text = vec![
            Line::from("Terminal too small"),
            Line::from(format!(
                "{}x{} needed, have {}x{}",
                MIN_WIDTH, MIN_HEIGHT, size.width, size.height
            )),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
            size,
        );
        return;
    }

    game_scene::render_game_scene(frame, size, snapshot);
}
