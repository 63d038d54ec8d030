//! Falling-glyph rain for glyphrain.
//!
//! [`GridState`] holds the cells, [`RainEngine`] advances them one tick at a
//! time and [`draw`] turns them into styled lines for a ratatui frame. None of
//! these touch the terminal or fail; the caller owns timing and I/O.

mod chars;
mod color;
mod engine;
mod grid;
mod render;

pub use chars::{BLANK, GLYPHS};
pub use color::{MAX_FADE, RAIN_GREEN, fade_color};
pub use engine::{RainEngine, TickStats};
pub use grid::GridState;
pub use render::{cell_style, draw};
