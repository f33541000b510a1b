//! SVG renderer - serializes canvas calls into a standalone SVG document.

use crate::canvas::Canvas;
use crate::draw::{BoxStyle, StrokeStyle};
use crate::text::TextStyle;
use crate::{Color, Point, Rect, Size};
use std::fmt::Write;

/// Canvas that accumulates SVG markup.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    size: Size,
    body: String,
    depth: usize,
}

impl SvgCanvas {
    /// Create an empty document of the given viewport size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
            depth: 0,
        }
    }

    /// Viewport size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Close any open groups and return the complete document.
    #[must_use]
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.end_group();
        }
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n{}</svg>\n",
            num(self.size.width),
            num(self.size.height),
            num(self.size.width),
            num(self.size.height),
            self.body
        )
    }

    fn indent(&mut self) {
        for _ in 0..=self.depth {
            self.body.push_str("  ");
        }
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self) {
        self.body.clear();
        self.depth = 0;
    }

    fn draw_rect(&mut self, rect: Rect, style: &BoxStyle) {
        self.indent();
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            num(rect.x),
            num(rect.y),
            num(rect.width.max(0.0)),
            num(rect.height.max(0.0))
        );
        match style.fill {
            Some(fill) => paint_attr(&mut self.body, "fill", fill),
            None => self.body.push_str(" fill=\"none\""),
        }
        if let Some(stroke) = &style.stroke {
            stroke_attrs(&mut self.body, stroke);
        }
        self.body.push_str("/>\n");
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.indent();
        let _ = write!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        );
        stroke_attrs(&mut self.body, style);
        self.body.push_str("/>\n");
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.indent();
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}px\" font-family=\"{}\"",
            num(position.x),
            num(position.y),
            num(style.size),
            escape(&style.family)
        );
        paint_attr(&mut self.body, "fill", style.color);
        let _ = writeln!(self.body, ">{}</text>", escape(text));
    }

    fn begin_group(&mut self, class: &str) {
        self.indent();
        let _ = writeln!(self.body, "<g class=\"{}\">", escape(class));
        self.depth += 1;
    }

    fn end_group(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.indent();
        self.body.push_str("</g>\n");
    }
}

/// Format a coordinate without trailing zeros.
fn num(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn paint_attr(out: &mut String, name: &str, color: Color) {
    let _ = write!(out, " {name}=\"{}\"", color.to_hex());
    if !color.is_opaque() {
        let _ = write!(out, " {name}-opacity=\"{}\"", num(color.a));
    }
}

fn stroke_attrs(out: &mut String, stroke: &StrokeStyle) {
    paint_attr(out, "stroke", stroke.color);
    let _ = write!(out, " stroke-width=\"{}\"", num(stroke.width));
    if stroke.is_dashed() {
        let dash: Vec<String> = stroke.dash.iter().map(|d| num(*d)).collect();
        let _ = write!(out, " stroke-dasharray=\"{}\"", dash.join(","));
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let svg = SvgCanvas::new(Size::new(200.0, 100.0)).finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"100\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_rect_with_stroke() {
        let mut canvas = SvgCanvas::new(Size::new(10.0, 10.0));
        let style = BoxStyle::fill(Color::WHITE)
            .with_stroke(StrokeStyle::solid(Color::parse("grey").unwrap(), 1.0));
        canvas.draw_rect(Rect::new(1.5, 2.0, 3.0, 4.0), &style);
        let svg = canvas.finish();
        assert!(svg.contains(
            "<rect x=\"1.5\" y=\"2\" width=\"3\" height=\"4\" fill=\"#ffffff\" stroke=\"#808080\" stroke-width=\"1\"/>"
        ));
    }

    #[test]
    fn test_translucent_fill_emits_opacity() {
        let mut canvas = SvgCanvas::new(Size::new(10.0, 10.0));
        canvas.draw_rect(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            &BoxStyle::fill(Color::BLACK.with_alpha(0.2)),
        );
        assert!(canvas.finish().contains("fill-opacity=\"0.2\""));
    }

    #[test]
    fn test_dashed_line() {
        let mut canvas = SvgCanvas::new(Size::new(10.0, 10.0));
        canvas.draw_line(
            Point::new(5.0, 0.0),
            Point::new(5.0, 10.0),
            &StrokeStyle::dashed(Color::BLACK, 1.0, &[2.0, 2.0]),
        );
        assert!(canvas.finish().contains("stroke-dasharray=\"2,2\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut canvas = SvgCanvas::new(Size::new(10.0, 10.0));
        canvas.draw_text("A & <B>", Point::new(0.0, 10.0), &TextStyle::default());
        let svg = canvas.finish();
        assert!(svg.contains(">A &amp; &lt;B&gt;</text>"));
        assert!(svg.contains("font-family=\"&apos;Segoe UI&apos;"));
    }

    #[test]
    fn test_finish_closes_open_groups() {
        let mut canvas = SvgCanvas::new(Size::new(10.0, 10.0));
        canvas.begin_group("barVisual");
        canvas.begin_group("inner");
        let svg = canvas.finish();
        assert_eq!(svg.matches("</g>").count(), 2);
    }

    #[test]
    fn test_clear_resets_body() {
        let mut canvas = SvgCanvas::new(Size::new(10.0, 10.0));
        canvas.draw_text("x", Point::ORIGIN, &TextStyle::default());
        canvas.clear();
        assert!(!canvas.finish().contains("<text"));
    }

    #[test]
    fn test_num_trims() {
        assert_eq!(num(3.0), "3");
        assert_eq!(num(2.456), "2.46");
        assert_eq!(num(-0.5), "-0.5");
    }
}
