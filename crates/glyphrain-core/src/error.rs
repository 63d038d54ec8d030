//! Validation errors for settings edits.

use crate::field::SettingField;

/// A rejected settings value. The settings object is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// The input is not a plain number of the shape the field expects.
    #[error("invalid input {input:?} for {field}")]
    InvalidInput { field: SettingField, input: String },
    /// The value parsed but lies outside the field's range.
    #[error("{field} must be within {range}, got {value}")]
    OutOfRange {
        field: SettingField,
        value: f64,
        range: String,
    },
}

impl SettingsError {
    /// The field the error refers to.
    pub fn field(&self) -> SettingField {
        match self {
            SettingsError::InvalidInput { field, .. } | SettingsError::OutOfRange { field, .. } => {
                *field
            }
        }
    }
}
