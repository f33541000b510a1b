//! Draw commands.
//!
//! Every element the visual paints reduces to one of these primitives.

use crate::text::TextStyle;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for lines and outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Dash pattern (empty = solid)
    pub dash: Vec<f32>,
}

impl StrokeStyle {
    /// Solid stroke.
    #[must_use]
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Dashed stroke with the given on/off pattern.
    #[must_use]
    pub fn dashed(color: Color, width: f32, dash: &[f32]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }

    /// Check whether the stroke has a dash pattern.
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Add an outline to the box.
    #[must_use]
    pub fn with_stroke(mut self, style: StrokeStyle) -> Self {
        self.stroke = Some(style);
        self
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a straight line
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Draw text anchored at its baseline start
    Text {
        /// Text content
        content: String,
        /// Baseline start position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Named group of commands
    Group {
        /// Group class name
        class: String,
        /// Child commands
        children: Vec<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a line command.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Line { from, to, style }
    }

    /// Create a text command.
    #[must_use]
    pub fn text(content: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self::Text {
            content: content.into(),
            position,
            style,
        }
    }

    /// Visit this command and, for groups, every descendant (pre-order).
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        if let Self::Group { children, .. } = self {
            for child in children {
                child.visit(f);
            }
        }
    }

    /// Text content, if this is a text command.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}
