//! Color palettes for each theme.

use ratatui::style::Color;
use slither::core::Theme;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub head: Color,
    /// Body gradient endpoints, neck to tail.
    pub body_bright: (f64, f64, f64),
    pub body_dim: (f64, f64, f64),
    /// Food base color; green and blue channels pulse around it.
    pub food: (u8, u8, u8),
    pub empty: Color,
    /// Alternate empty-cell shade when the grid is shown.
    pub grid: Color,
    pub border: Color,
    pub accent: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Default => Palette {
            head: Color::Rgb(100, 255, 100),
            body_bright: (50.0, 220.0, 50.0),
            body_dim: (20.0, 80.0, 20.0),
            food: (255, 80, 40),
            empty: Color::Rgb(12, 12, 18),
            grid: Color::Rgb(22, 22, 30),
            border: Color::Rgb(80, 80, 80),
            accent: Color::LightGreen,
        },
        Theme::Dark => Palette {
            head: Color::Rgb(180, 180, 200),
            body_bright: (130.0, 130.0, 150.0),
            body_dim: (50.0, 50.0, 60.0),
            food: (200, 60, 60),
            empty: Color::Rgb(0, 0, 0),
            grid: Color::Rgb(14, 14, 14),
            border: Color::Rgb(60, 60, 60),
            accent: Color::Gray,
        },
        Theme::Neon => Palette {
            head: Color::Rgb(255, 60, 255),
            body_bright: (0.0, 255.0, 255.0),
            body_dim: (0.0, 90.0, 140.0),
            food: (255, 240, 0),
            empty: Color::Rgb(10, 0, 20),
            grid: Color::Rgb(25, 5, 45),
            border: Color::Rgb(140, 0, 200),
            accent: Color::Magenta,
        },
        Theme::Retro => Palette {
            head: Color::Rgb(15, 56, 15),
            body_bright: (48.0, 98.0, 48.0),
            body_dim: (80.0, 120.0, 40.0),
            food: (139, 40, 15),
            empty: Color::Rgb(155, 188, 15),
            grid: Color::Rgb(139, 172, 15),
            border: Color::Rgb(48, 98, 48),
            accent: Color::Yellow,
        },
    }
}

/// Interpolated body color for segment `index` of a `len` long snake.
pub fn body_color(palette: &Palette, index: usize, len: usize) -> Color {
    let t = index as f64 / (len.saturating_sub(1)).max(1) as f64;
    let (b, d) = (palette.body_bright, palette.body_dim);
    let r = (b.0 * (1.0 - t) + d.0 * t) as u8;
    let g = (b.1 * (1.0 - t) + d.1 * t) as u8;
    let bl = (b.2 * (1.0 - t) + d.2 * t) as u8;
    Color::Rgb(r, g, bl)
}

/// Food color for the current animation tick.
pub fn food_color(palette: &Palette, tick: u64) -> Color {
    let pulse = ((tick % 20) as f64 / 20.0 * std::f64::consts::PI * 2.0).sin();
    let (r, g, b) = palette.food;
    let g = (g as f64 + pulse * 30.0).clamp(0.0, 255.0) as u8;
    let b = (b as f64 + pulse * 20.0).clamp(0.0, 255.0) as u8;
    Color::Rgb(r, g, b)
}
