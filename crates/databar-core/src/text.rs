//! Text styling and measurement.
//!
//! Layout needs label extents before anything is painted, so measurement is a
//! separate seam from [`Canvas`](crate::Canvas): a browser host can answer it
//! from real font metrics while headless renders use [`EstimatedTextMeasurer`].
//!
//! # Examples
//!
//! ```
//! use databar_core::{EstimatedTextMeasurer, TextMeasurer, TextStyle};
//!
//! let style = TextStyle::sized(10.0);
//! let size = EstimatedTextMeasurer.measure("12345", &style);
//! assert_eq!(size.width, 30.0);
//! assert_eq!(size.height, 12.0);
//! ```

use crate::{Color, Size};
use serde::{Deserialize, Serialize};

/// Font stack used for every label unless overridden.
pub const DEFAULT_FONT_FAMILY: &str = "'Segoe UI', wf_segoe-ui_normal, helvetica, arial, sans-serif";

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// CSS font family list
    pub family: String,
}

impl TextStyle {
    /// Default style at the given size.
    #[must_use]
    pub fn sized(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Replace the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            color: Color::BLACK,
            family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// Measures the bounding box of a run of text.
pub trait TextMeasurer {
    /// Width and height the text occupies when drawn with `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> Size;
}

/// Font-independent estimate: every glyph is 0.6 em wide, lines are 1.2 em tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    const CHAR_WIDTH_EM: f32 = 0.6;
    const LINE_HEIGHT_EM: f32 = 1.2;
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        let chars = text.chars().count() as f32;
        Size::new(
            chars * style.size * Self::CHAR_WIDTH_EM,
            style.size * Self::LINE_HEIGHT_EM,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 12.0);
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_estimate_counts_chars_not_bytes() {
        let style = TextStyle::sized(10.0);
        let ascii = EstimatedTextMeasurer.measure("abc", &style);
        let accented = EstimatedTextMeasurer.measure("àbç", &style);
        assert_eq!(ascii, accented);
    }

    #[test]
    fn test_estimate_empty_text_has_line_height() {
        let size = EstimatedTextMeasurer.measure("", &TextStyle::sized(20.0));
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 24.0);
    }

    #[test]
    fn test_with_color() {
        let style = TextStyle::sized(9.0).with_color(Color::WHITE);
        assert_eq!(style.color, Color::WHITE);
        assert_eq!(style.size, 9.0);
    }
}
