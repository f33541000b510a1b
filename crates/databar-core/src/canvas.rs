//! Canvas trait and the recording implementation.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle};
use crate::text::TextStyle;
use crate::{Point, Rect};

/// Drawing surface the visual paints into.
///
/// This is a minimal abstraction over the rendering backend. Groups mirror
/// SVG `<g>` elements: every command issued between `begin_group` and the
/// matching `end_group` belongs to that group.
pub trait Canvas {
    /// Remove everything drawn so far.
    fn clear(&mut self);

    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: Rect, style: &BoxStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Draw text with its baseline starting at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Open a named group.
    fn begin_group(&mut self, class: &str);

    /// Close the innermost open group.
    fn end_group(&mut self);
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (ship commands to another renderer)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    open_groups: Vec<(String, Vec<DrawCommand>)>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded top-level draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.open_groups.is_empty()
    }

    /// Every recorded command, groups flattened in paint order.
    #[must_use]
    pub fn flattened(&self) -> Vec<&DrawCommand> {
        let mut out = Vec::new();
        for cmd in &self.commands {
            cmd.visit(&mut |c| {
                if !matches!(c, DrawCommand::Group { .. }) {
                    out.push(c);
                }
            });
        }
        out
    }

    /// Groups with the given class, at any depth.
    #[must_use]
    pub fn groups(&self, class: &str) -> Vec<&[DrawCommand]> {
        let mut out = Vec::new();
        for cmd in &self.commands {
            cmd.visit(&mut |c| {
                if let DrawCommand::Group {
                    class: name,
                    children,
                } = c
                {
                    if name == class {
                        out.push(children.as_slice());
                    }
                }
            });
        }
        out
    }

    /// Text content of every recorded text command, in paint order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.flattened()
            .into_iter()
            .filter_map(DrawCommand::as_text)
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        match self.open_groups.last_mut() {
            Some((_, children)) => children.push(command),
            None => self.commands.push(command),
        }
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.commands.clear();
        self.open_groups.clear();
    }

    fn draw_rect(&mut self, rect: Rect, style: &BoxStyle) {
        self.push(DrawCommand::Rect {
            bounds: rect,
            style: style.clone(),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.push(DrawCommand::line(from, to, style.clone()));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.push(DrawCommand::text(text, position, style.clone()));
    }

    fn begin_group(&mut self, class: &str) {
        self.open_groups.push((class.to_string(), Vec::new()));
    }

    fn end_group(&mut self) {
        if let Some((class, children)) = self.open_groups.pop() {
            self.push(DrawCommand::Group { class, children });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_recording_canvas_new() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_draw_rect_records_style() {
        let mut canvas = RecordingCanvas::new();
        let style = BoxStyle::fill(Color::WHITE);
        canvas.draw_rect(Rect::new(10.0, 20.0, 100.0, 50.0), &style);

        match &canvas.commands()[0] {
            DrawCommand::Rect { bounds, style } => {
                assert_eq!(bounds.width, 100.0);
                assert_eq!(style.fill, Some(Color::WHITE));
            }
            other => panic!("Expected Rect command, got {other:?}"),
        }
    }

    #[test]
    fn test_groups_nest() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_group("barVisual");
        canvas.draw_text("80", Point::new(3.0, 10.0), &TextStyle::default());
        canvas.begin_group("inner");
        canvas.draw_line(Point::ORIGIN, Point::new(0.0, 5.0), &StrokeStyle::default());
        canvas.end_group();
        canvas.end_group();

        assert_eq!(canvas.commands().len(), 1);
        assert_eq!(canvas.groups("barVisual").len(), 1);
        assert_eq!(canvas.groups("inner")[0].len(), 1);
        assert_eq!(canvas.flattened().len(), 2);
        assert_eq!(canvas.texts(), vec!["80"]);
    }

    #[test]
    fn test_unbalanced_end_group_is_ignored() {
        let mut canvas = RecordingCanvas::new();
        canvas.end_group();
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_clear_drops_open_groups() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_group("g");
        canvas.draw_text("x", Point::ORIGIN, &TextStyle::default());
        canvas.clear();
        assert!(canvas.is_empty());
    }
}
