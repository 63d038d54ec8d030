//! Editable fields and toggles exposed by the options menu.

use std::fmt;

use crate::error::SettingsError;
use crate::settings::{
    MAX_COLUMNS, MAX_PROBABILITY, MAX_ROWS, MAX_SPEED, MIN_COLUMNS, MIN_DURATION,
    MIN_PROBABILITY, MIN_ROWS, MIN_SPEED,
};

/// A numeric setting that is edited through a value prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    Speed,
    BoldProbability,
    FadeProbability,
    Duration,
    Columns,
    Rows,
}

impl SettingField {
    /// All fields in menu order.
    pub const ALL: [SettingField; 6] = [
        SettingField::Speed,
        SettingField::BoldProbability,
        SettingField::FadeProbability,
        SettingField::Duration,
        SettingField::Columns,
        SettingField::Rows,
    ];

    /// Menu key that opens the prompt for this field.
    pub fn key(self) -> char {
        match self {
            SettingField::Speed => 's',
            SettingField::BoldProbability => 'b',
            SettingField::FadeProbability => 'f',
            SettingField::Duration => 'd',
            SettingField::Columns => 'c',
            SettingField::Rows => 'r',
        }
    }

    /// Look up the field bound to a menu key.
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Human readable name used in prompts and messages.
    pub fn label(self) -> &'static str {
        match self {
            SettingField::Speed => "speed",
            SettingField::BoldProbability => "bold probability",
            SettingField::FadeProbability => "fade probability",
            SettingField::Duration => "duration in seconds",
            SettingField::Columns => "number of columns",
            SettingField::Rows => "number of rows",
        }
    }

    /// Inclusive lower bound.
    pub fn min(self) -> f64 {
        match self {
            SettingField::Speed => MIN_SPEED,
            SettingField::BoldProbability | SettingField::FadeProbability => MIN_PROBABILITY,
            SettingField::Duration => MIN_DURATION,
            SettingField::Columns => f64::from(MIN_COLUMNS),
            SettingField::Rows => f64::from(MIN_ROWS),
        }
    }

    /// Inclusive upper bound, `None` when unbounded.
    pub fn max(self) -> Option<f64> {
        match self {
            SettingField::Speed => Some(MAX_SPEED),
            SettingField::BoldProbability | SettingField::FadeProbability => {
                Some(MAX_PROBABILITY)
            }
            SettingField::Duration => None,
            SettingField::Columns => Some(f64::from(MAX_COLUMNS)),
            SettingField::Rows => Some(f64::from(MAX_ROWS)),
        }
    }

    /// Whether the field only accepts whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(self, SettingField::Columns | SettingField::Rows)
    }

    /// Whether changing the field reallocates the grid.
    pub fn resizes_grid(self) -> bool {
        matches!(self, SettingField::Columns | SettingField::Rows)
    }

    /// Range shown in prompts, e.g. `0.01-1` or `1-infinite`.
    pub fn range_label(self) -> String {
        match self.max() {
            Some(max) => format!("{}-{}", self.min(), max),
            None => format!("{}-infinite", self.min()),
        }
    }

    /// Parse raw prompt input into a value within range.
    ///
    /// Real fields accept `digits[.digits]` or `.digits`; integer fields
    /// accept digits only. Signs, exponents and surrounding text are
    /// rejected.
    pub fn parse(self, input: &str) -> Result<f64, SettingsError> {
        let input = input.trim();
        let well_formed = if self.is_integer() {
            is_plain_integer(input)
        } else {
            is_plain_decimal(input)
        };
        let value = well_formed
            .then(|| input.parse::<f64>().ok())
            .flatten()
            .ok_or_else(|| SettingsError::InvalidInput {
                field: self,
                input: input.to_string(),
            })?;
        self.check(value)?;
        Ok(value)
    }

    /// Check an already parsed value against the field's range.
    pub fn check(self, value: f64) -> Result<(), SettingsError> {
        let within = value.is_finite()
            && value >= self.min()
            && self.max().is_none_or(|max| value <= max)
            && (!self.is_integer() || value.fract() == 0.0);
        if within {
            Ok(())
        } else {
            Err(SettingsError::OutOfRange {
                field: self,
                value,
                range: self.range_label(),
            })
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An on/off effect switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Bold,
    Fade,
    SpeedVariation,
    RandomBold,
    RandomFade,
}

impl Toggle {
    /// All toggles in menu order.
    pub const ALL: [Toggle; 5] = [
        Toggle::Bold,
        Toggle::Fade,
        Toggle::SpeedVariation,
        Toggle::RandomBold,
        Toggle::RandomFade,
    ];

    pub fn key(self) -> char {
        match self {
            Toggle::Bold => 't',
            Toggle::Fade => 'g',
            Toggle::SpeedVariation => 'v',
            Toggle::RandomBold => 'n',
            Toggle::RandomFade => 'm',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|toggle| toggle.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Toggle::Bold => "bold effect",
            Toggle::Fade => "fade effect",
            Toggle::SpeedVariation => "speed variation",
            Toggle::RandomBold => "random bold effect",
            Toggle::RandomFade => "random fade effect",
        }
    }
}

fn is_plain_integer(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Matches `\d*\.?\d+`.
fn is_plain_decimal(input: &str) -> bool {
    let (whole, fraction) = input.split_once('.').unwrap_or(("", input));
    whole.bytes().all(|b| b.is_ascii_digit()) && is_plain_integer(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for field in SettingField::ALL {
            assert_eq!(SettingField::from_key(field.key()), Some(field));
        }
        for toggle in Toggle::ALL {
            assert_eq!(Toggle::from_key(toggle.key()), Some(toggle));
        }
        assert_eq!(SettingField::from_key('z'), None);
        assert_eq!(Toggle::from_key('s'), None);
    }

    #[test]
    fn test_decimal_shapes() {
        assert!(is_plain_decimal("5"));
        assert!(is_plain_decimal("0.25"));
        assert!(is_plain_decimal(".5"));
        assert!(!is_plain_decimal("5."));
        assert!(!is_plain_decimal("-1"));
        assert!(!is_plain_decimal("1e3"));
        assert!(!is_plain_decimal("1.2.3"));
        assert!(!is_plain_decimal(""));
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(SettingField::Speed.parse("0.5"), Ok(0.5));
        assert_eq!(SettingField::Speed.parse(" .05 "), Ok(0.05));
        assert!(matches!(
            SettingField::Speed.parse("2"),
            Err(SettingsError::OutOfRange { .. })
        ));
        assert!(matches!(
            SettingField::Speed.parse("fast"),
            Err(SettingsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_integer_fields() {
        assert_eq!(SettingField::Columns.parse("120"), Ok(120.0));
        assert!(matches!(
            SettingField::Columns.parse("12.5"),
            Err(SettingsError::InvalidInput { .. })
        ));
        assert!(matches!(
            SettingField::Rows.parse("9"),
            Err(SettingsError::OutOfRange { .. })
        ));
        assert!(matches!(
            SettingField::Rows.parse("99999999999999999999999"),
            Err(SettingsError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_duration_is_unbounded_above() {
        assert_eq!(SettingField::Duration.max(), None);
        assert_eq!(SettingField::Duration.parse("86400"), Ok(86400.0));
        assert!(SettingField::Duration.parse("0.5").is_err());
        assert_eq!(SettingField::Duration.range_label(), "1-infinite");
    }

    #[test]
    fn test_check_rejects_nan() {
        assert!(SettingField::BoldProbability.check(f64::NAN).is_err());
        assert!(SettingField::BoldProbability.check(1.0).is_ok());
    }
}
