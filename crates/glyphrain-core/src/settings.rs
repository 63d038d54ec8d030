//! User-adjustable animation settings.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::field::{SettingField, Toggle};

pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 1.0;
pub const DEFAULT_SPEED: f64 = 0.1;
pub(crate) const MIN_PROBABILITY: f64 = 0.0;
pub(crate) const MAX_PROBABILITY: f64 = 1.0;
pub const MIN_COLUMNS: u16 = 20;
pub const MAX_COLUMNS: u16 = 200;
pub const DEFAULT_COLUMNS: u16 = 80;
pub const MIN_ROWS: u16 = 10;
pub const MAX_ROWS: u16 = 100;
pub const DEFAULT_ROWS: u16 = 24;
pub const MIN_DURATION: f64 = 1.0;

const DEFAULT_BOLD_PROBABILITY: f64 = 0.1;
const DEFAULT_FADE_PROBABILITY: f64 = 0.05;

/// Parameters read by the engine and the renderer, edited by the menu.
///
/// Missing keys in a settings file take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid width in cells.
    pub columns: u16,
    /// Grid height in cells.
    pub rows: u16,
    /// Seconds per tick.
    pub speed: f64,
    /// Kept for the settings file and menu; the drop model ignores it.
    pub bold_probability: f64,
    /// Kept for the settings file and menu; the drop model ignores it.
    pub fade_probability: f64,
    /// Stop after this many seconds, run forever when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub bold_enabled: bool,
    pub fade_enabled: bool,
    pub speed_variation_enabled: bool,
    pub random_bold_enabled: bool,
    pub random_fade_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            speed: DEFAULT_SPEED,
            bold_probability: DEFAULT_BOLD_PROBABILITY,
            fade_probability: DEFAULT_FADE_PROBABILITY,
            duration: None,
            bold_enabled: true,
            fade_enabled: true,
            speed_variation_enabled: true,
            random_bold_enabled: true,
            random_fade_enabled: true,
        }
    }
}

impl Settings {
    /// Grid shape as `(rows, columns)`.
    pub fn grid_size(&self) -> (usize, usize) {
        (usize::from(self.rows), usize::from(self.columns))
    }

    /// Current numeric value of a field, `None` for an unset duration.
    pub fn value(&self, field: SettingField) -> Option<f64> {
        match field {
            SettingField::Speed => Some(self.speed),
            SettingField::BoldProbability => Some(self.bold_probability),
            SettingField::FadeProbability => Some(self.fade_probability),
            SettingField::Duration => self.duration,
            SettingField::Columns => Some(f64::from(self.columns)),
            SettingField::Rows => Some(f64::from(self.rows)),
        }
    }

    /// Value formatted for the menu.
    pub fn display_value(&self, field: SettingField) -> String {
        self.value(field)
            .map(|value| value.to_string())
            .unwrap_or_else(|| "infinite".to_string())
    }

    /// Parse `input` for `field` and store it.
    ///
    /// Nothing is modified when the input is rejected.
    pub fn apply(&mut self, field: SettingField, input: &str) -> Result<(), SettingsError> {
        let value = field.parse(input)?;
        match field {
            SettingField::Speed => self.speed = value,
            SettingField::BoldProbability => self.bold_probability = value,
            SettingField::FadeProbability => self.fade_probability = value,
            SettingField::Duration => self.duration = Some(value),
            SettingField::Columns => self.columns = value as u16,
            SettingField::Rows => self.rows = value as u16,
        }
        Ok(())
    }

    pub fn is_enabled(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Bold => self.bold_enabled,
            Toggle::Fade => self.fade_enabled,
            Toggle::SpeedVariation => self.speed_variation_enabled,
            Toggle::RandomBold => self.random_bold_enabled,
            Toggle::RandomFade => self.random_fade_enabled,
        }
    }

    /// Flip a toggle and return its new state.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Bold => &mut self.bold_enabled,
            Toggle::Fade => &mut self.fade_enabled,
            Toggle::SpeedVariation => &mut self.speed_variation_enabled,
            Toggle::RandomBold => &mut self.random_bold_enabled,
            Toggle::RandomFade => &mut self.random_fade_enabled,
        };
        *flag = !*flag;
        *flag
    }

    /// Check every numeric field against its range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        SettingField::ALL.into_iter().try_for_each(|field| {
            self.value(field).map_or(Ok(()), |value| field.check(value))
        })
    }
}
