//! A single measured quantity with its formatting metadata.

use crate::format::{plain_number, DisplayUnits, ValueFormatter};
use serde::{Deserialize, Serialize};

/// Text shown for a missing value when no override is requested.
pub const BLANK_TEXT: &str = "blank";

/// One numeric measurement with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Measured value; `None` for blank source cells
    pub value: Option<f64>,
    /// Excel-style format string from the source column
    pub format: String,
    /// Column display name
    pub display_name: String,
    /// Display-unit setting (0 = auto, 1 = none, 1000 = K, ...)
    pub display_units: f64,
}

impl Field {
    /// Create a field with automatic display units.
    #[must_use]
    pub fn new(value: Option<f64>, format: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            value,
            format: format.into(),
            display_name: display_name.into(),
            display_units: 0.0,
        }
    }

    /// A field with no value, format or name.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(None, "", "")
    }

    /// Replace the display-unit setting.
    #[must_use]
    pub fn with_display_units(mut self, display_units: f64) -> Self {
        self.display_units = display_units;
        self
    }

    /// Check whether the value is missing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_none()
    }

    /// Render the value as text.
    ///
    /// A missing value is replaced by `blank_override` when given, otherwise
    /// the result is [`BLANK_TEXT`]. Without formatting or display units the
    /// raw number is returned.
    #[must_use]
    pub fn to_display_string(
        &self,
        with_formatting: bool,
        with_display_units: bool,
        blank_override: Option<f64>,
    ) -> String {
        let Some(value) = self.value.or(blank_override) else {
            return BLANK_TEXT.to_string();
        };

        let units = if with_display_units {
            DisplayUnits::from_setting(self.display_units)
        } else {
            DisplayUnits::None
        };

        match (with_formatting, with_display_units) {
            (true, _) => ValueFormatter::new(&self.format, units).format(value),
            (false, true) => ValueFormatter::new("", units).format(value),
            (false, false) => plain_number(value),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_without_override() {
        let f = Field::new(None, "#,0", "Sales");
        assert_eq!(f.to_display_string(true, true, None), "blank");
        assert!(f.is_blank());
    }

    #[test]
    fn test_blank_with_zero_override() {
        let f = Field::new(None, "0.00", "Sales");
        assert_eq!(f.to_display_string(true, false, Some(0.0)), "0.00");
    }

    #[test]
    fn test_raw_string_without_formatting() {
        let f = Field::new(Some(1234.5), "#,0.00", "Sales").with_display_units(1000.0);
        assert_eq!(f.to_display_string(false, false, None), "1234.5");
        assert_eq!(
            Field::new(Some(80.0), "", "").to_display_string(false, false, None),
            "80"
        );
    }

    #[test]
    fn test_formatting_ignores_units_when_disabled() {
        let f = Field::new(Some(1234.5), "#,0.00", "Sales").with_display_units(1000.0);
        assert_eq!(f.to_display_string(true, false, None), "1,234.50");
        assert_eq!(f.to_display_string(true, true, None), "1.23K");
    }

    #[test]
    fn test_units_without_formatting() {
        let f = Field::new(Some(2_500_000.0), "#,0.00", "Sales").with_display_units(1e6);
        assert_eq!(f.to_display_string(false, true, None), "2.5M");
    }

    #[test]
    fn test_auto_units_default() {
        let f = Field::new(Some(80_000.0), "#,0", "Sales");
        assert_eq!(f.to_display_string(true, true, None), "80K");
        assert_eq!(f.to_display_string(true, false, None), "80,000");
    }

    #[test]
    fn test_value_wins_over_override() {
        let f = Field::new(Some(5.0), "", "");
        assert_eq!(f.to_display_string(false, false, Some(0.0)), "5");
    }
}
