//! Core types for the glyphrain terminal rain.
//!
//! Holds the user-adjustable [`Settings`] shared by the animation engine,
//! the renderer and the options menu, together with the field metadata and
//! validation rules the menu and the config loader rely on.

mod error;
mod field;
mod settings;

pub use error::SettingsError;
pub use field::{SettingField, Toggle};
pub use settings::{
    DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_SPEED, MAX_COLUMNS, MAX_ROWS, MAX_SPEED, MIN_COLUMNS,
    MIN_DURATION, MIN_ROWS, MIN_SPEED, Settings,
};
