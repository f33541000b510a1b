//! Core types and traits for the databar visual.
//!
//! This crate provides the host-independent drawing layer:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex and CSS-name parsing
//! - Draw commands and the [`Canvas`] trait
//! - Canvases: [`RecordingCanvas`] (tests, serialization) and [`SvgCanvas`]
//! - Text styling and the [`TextMeasurer`] seam

mod canvas;
mod color;
pub mod draw;
mod geometry;
mod svg;
pub mod text;

pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use geometry::{Point, Rect, Size};
pub use svg::SvgCanvas;
pub use text::{EstimatedTextMeasurer, TextMeasurer, TextStyle};

#[cfg(test)]
mod tests {
    use super::*;

    mod color_tests {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn test_color_new_clamps_values() {
            let c = Color::new(1.5, -0.5, 0.5, 2.0);
            assert_eq!(c.r, 1.0);
            assert_eq!(c.g, 0.0);
            assert_eq!(c.b, 0.5);
            assert_eq!(c.a, 1.0);
        }

        #[test]
        fn test_color_from_hex() {
            let c = Color::from_hex("#ff0000").unwrap();
            assert_eq!(c.r, 1.0);
            assert_eq!(c.g, 0.0);

            let c2 = Color::from_hex("4caf50").unwrap();
            assert_eq!(c2.to_hex(), "#4caf50");
        }

        #[test]
        fn test_color_from_hex_with_alpha() {
            let c = Color::from_hex("#ff000080").unwrap();
            assert!((c.a - 0.502).abs() < 0.01);
        }

        #[test]
        fn test_color_from_hex_invalid() {
            assert!(Color::from_hex("invalid").is_err());
            assert!(Color::from_hex("#gg0000").is_err());
            assert!(Color::from_hex("#ff").is_err());
        }

        proptest! {
            #[test]
            fn prop_color_clamps_to_valid_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
                let c = Color::new(r, g, b, a);
                prop_assert!(c.r >= 0.0 && c.r <= 1.0);
                prop_assert!(c.g >= 0.0 && c.g <= 1.0);
                prop_assert!(c.b >= 0.0 && c.b <= 1.0);
                prop_assert!(c.a >= 0.0 && c.a <= 1.0);
            }

            #[test]
            fn prop_hex_roundtrip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
                let hex = format!("#{r:02x}{g:02x}{b:02x}");
                let c = Color::parse(&hex).unwrap();
                prop_assert_eq!(c.to_hex(), hex);
            }
        }
    }

    mod canvas_tests {
        use super::*;

        fn paint(canvas: &mut dyn Canvas) {
            canvas.begin_group("barVisual");
            canvas.draw_rect(
                Rect::new(0.0, 0.0, 100.0, 20.0),
                &BoxStyle::fill(Color::WHITE).with_stroke(StrokeStyle::default()),
            );
            canvas.draw_text("80", Point::new(3.0, 30.0), &TextStyle::default());
            canvas.end_group();
        }

        #[test]
        fn test_same_calls_drive_both_canvases() {
            let mut recording = RecordingCanvas::new();
            paint(&mut recording);
            assert_eq!(recording.flattened().len(), 2);

            let mut svg = SvgCanvas::new(Size::new(100.0, 40.0));
            paint(&mut svg);
            let doc = svg.finish();
            assert!(doc.contains("<g class=\"barVisual\">"));
            assert!(doc.contains(">80</text>"));
        }
    }
}
