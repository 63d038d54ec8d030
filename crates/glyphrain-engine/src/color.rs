//! Colour ramp for fading cells.

use ratatui::style::Color;

/// Highest fade level a cell can reach.
pub const MAX_FADE: u8 = 4;

/// Colour of fresh cells, and of every cell when fading is off.
pub const RAIN_GREEN: Color = Color::Green;

/// Map a fade level to its colour, brightest first.
pub fn fade_color(level: u8) -> Color {
    match level {
        0 => RAIN_GREEN,
        1 => Color::LightGreen,
        2 => Color::Rgb(0, 100, 0),
        3 => Color::DarkGray,
        _ => Color::Black,
    }
}
