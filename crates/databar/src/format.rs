//! Number formatting: Excel-style format strings plus display units.
//!
//! Supports the subset the visual needs: up to three `;`-separated sections
//! (positive; negative; zero), `0`/`#` digit placeholders, `,` grouping, `.`
//! decimals, `%` scaling, and `\x` / `"..."` literals.
//!
//! # Examples
//!
//! ```
//! use databar::format::{DisplayUnits, ValueFormatter};
//!
//! let f = ValueFormatter::new("#,0.00", DisplayUnits::None);
//! assert_eq!(f.format(1234.5), "1,234.50");
//!
//! let k = ValueFormatter::new("#,0", DisplayUnits::Thousands);
//! assert_eq!(k.format(80_000.0), "80K");
//! ```

use serde::{Deserialize, Serialize};

/// Format used for gap percentages in tooltips.
pub const PERCENT_FORMAT: &str = "0.00 %;-0.00 %;0.00 %";

/// Scaling applied to a value before it is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DisplayUnits {
    /// Pick K / M / bn / T from the magnitude of the value
    Auto,
    /// No scaling
    None,
    /// Thousands (K)
    Thousands,
    /// Millions (M)
    Millions,
    /// Billions (bn)
    Billions,
    /// Trillions (T)
    Trillions,
    /// Any other divisor, no suffix
    Custom(f64),
}

impl DisplayUnits {
    /// Interpret a numeric display-unit setting (0 = auto, 1 = none, 1000 = K, ...).
    #[must_use]
    pub fn from_setting(units: f64) -> Self {
        match units {
            u if u == 0.0 => Self::Auto,
            u if u == 1.0 => Self::None,
            u if u == 1e3 => Self::Thousands,
            u if u == 1e6 => Self::Millions,
            u if u == 1e9 => Self::Billions,
            u if u == 1e12 => Self::Trillions,
            u if u.is_finite() && u > 0.0 => Self::Custom(u),
            _ => Self::None,
        }
    }

    /// Divisor and suffix to use for `value`.
    #[must_use]
    pub fn resolve(self, value: f64) -> (f64, &'static str) {
        match self {
            Self::Auto => {
                let magnitude = value.abs();
                if magnitude >= 1e12 {
                    Self::Trillions.resolve(value)
                } else if magnitude >= 1e9 {
                    Self::Billions.resolve(value)
                } else if magnitude >= 1e6 {
                    Self::Millions.resolve(value)
                } else if magnitude >= 1e3 {
                    Self::Thousands.resolve(value)
                } else {
                    (1.0, "")
                }
            }
            Self::None => (1.0, ""),
            Self::Thousands => (1e3, "K"),
            Self::Millions => (1e6, "M"),
            Self::Billions => (1e9, "bn"),
            Self::Trillions => (1e12, "T"),
            Self::Custom(divisor) => (divisor, ""),
        }
    }
}

/// One parsed section of a format string.
#[derive(Debug, Clone, PartialEq, Default)]
struct NumberPattern {
    prefix: String,
    suffix: String,
    min_int_digits: usize,
    min_decimals: usize,
    max_decimals: usize,
    grouping: bool,
    percent: bool,
}

impl NumberPattern {
    fn parse(section: &str) -> Self {
        let mut pattern = Self::default();
        let mut in_number = false;
        let mut after_number = false;
        let mut in_decimals = false;
        let mut chars = section.chars();

        let literal = |pattern: &mut Self, c: char, after: bool| {
            if after {
                pattern.suffix.push(c);
            } else {
                pattern.prefix.push(c);
            }
        };

        while let Some(c) = chars.next() {
            match c {
                '0' | '#' if !after_number => {
                    in_number = true;
                    if in_decimals {
                        pattern.max_decimals += 1;
                        if c == '0' {
                            pattern.min_decimals += 1;
                        }
                    } else if c == '0' {
                        pattern.min_int_digits += 1;
                    }
                }
                '.' if !after_number && !in_decimals => {
                    in_number = true;
                    in_decimals = true;
                }
                ',' if in_number && !after_number => pattern.grouping = true,
                '%' => {
                    pattern.percent = true;
                    after_number |= in_number;
                    literal(&mut pattern, '%', after_number);
                }
                '\\' => {
                    after_number |= in_number;
                    if let Some(escaped) = chars.next() {
                        literal(&mut pattern, escaped, after_number);
                    }
                }
                '"' => {
                    after_number |= in_number;
                    for quoted in chars.by_ref() {
                        if quoted == '"' {
                            break;
                        }
                        literal(&mut pattern, quoted, after_number);
                    }
                }
                other => {
                    after_number |= in_number;
                    literal(&mut pattern, other, after_number);
                }
            }
        }
        pattern
    }

    /// Format a non-negative magnitude.
    fn apply(&self, magnitude: f64, unit_suffix: &str) -> String {
        let scaled = if self.percent {
            magnitude * 100.0
        } else {
            magnitude
        };
        let fixed = format!("{:.*}", self.max_decimals, scaled);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

        let mut frac = frac_part.to_string();
        while frac.len() > self.min_decimals && frac.ends_with('0') {
            frac.pop();
        }

        let mut int_digits = int_part.trim_start_matches('0').to_string();
        while int_digits.len() < self.min_int_digits {
            int_digits.insert(0, '0');
        }
        if int_digits.is_empty() && frac.is_empty() {
            int_digits.push('0');
        }
        if self.grouping {
            int_digits = group_thousands(&int_digits);
        }

        let mut out = self.prefix.clone();
        out.push_str(&int_digits);
        if !frac.is_empty() {
            out.push('.');
            out.push_str(&frac);
        }
        out.push_str(unit_suffix);
        out.push_str(&self.suffix);
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a number the way a plain numeric-to-string conversion does:
/// integers without a fractional part, everything else at shortest precision.
/// Magnitudes from `1e21` up and below `1e-6` use exponent form (`1e+21`, `1.5e-7`).
#[must_use]
pub fn plain_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&value.abs()) {
        format!("{value}")
    } else {
        exponent_form(value)
    }
}

fn exponent_form(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

/// Formatter for a format string and display-unit choice.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormatter {
    sections: Vec<NumberPattern>,
    units: DisplayUnits,
}

impl ValueFormatter {
    /// Create a formatter. An empty format, `General` or `G` selects general formatting.
    #[must_use]
    pub fn new(format: &str, units: DisplayUnits) -> Self {
        let trimmed = format.trim();
        let general = trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("general")
            || trimmed.eq_ignore_ascii_case("g");
        let sections = if general {
            Vec::new()
        } else {
            trimmed.split(';').take(3).map(NumberPattern::parse).collect()
        };
        Self { sections, units }
    }

    /// Check whether general formatting is in effect.
    #[must_use]
    pub fn is_general(&self) -> bool {
        self.sections.is_empty()
    }

    /// Format a value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return plain_number(value);
        }
        let (divisor, unit_suffix) = self.units.resolve(value);
        // -0.0 takes the positive section without a sign
        let scaled = match value / divisor {
            v if v == 0.0 => 0.0,
            v => v,
        };

        if self.is_general() {
            return general(scaled, unit_suffix);
        }

        let negative = scaled < 0.0;
        match (self.sections.len(), negative, scaled == 0.0) {
            (3, _, true) => self.sections[2].apply(0.0, unit_suffix),
            (n, true, _) if n >= 2 => self.sections[1].apply(scaled.abs(), unit_suffix),
            (_, true, _) => {
                let body = self.sections[0].apply(scaled.abs(), unit_suffix);
                if body.chars().any(|c| c.is_ascii_digit() && c != '0') {
                    format!("-{body}")
                } else {
                    body
                }
            }
            _ => self.sections[0].apply(scaled, unit_suffix),
        }
    }
}

fn general(value: f64, unit_suffix: &str) -> String {
    let decimals = if unit_suffix.is_empty() { 10 } else { 2 };
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    format!("{}{unit_suffix}", plain_number(rounded))
}
