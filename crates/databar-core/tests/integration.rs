//! Integration tests for databar-core.
//!
//! These tests drive both canvases through the public API.

use databar_core::{
    BoxStyle, Canvas, Color, DrawCommand, EstimatedTextMeasurer, Point, RecordingCanvas, Rect,
    Size, StrokeStyle, SvgCanvas, TextMeasurer, TextStyle,
};

fn paint_bar(canvas: &mut dyn Canvas) {
    canvas.begin_group("barVisual");
    canvas.draw_rect(
        Rect::new(0.0, 3.0, 200.0, 14.0),
        &BoxStyle::fill(Color::WHITE).with_stroke(StrokeStyle::solid(Color::parse("grey").unwrap(), 1.0)),
    );
    canvas.draw_rect(
        Rect::new(0.0, 3.0, 80.0, 14.0),
        &BoxStyle::fill(Color::parse("#f44336").unwrap().with_alpha(0.2)),
    );
    canvas.draw_line(
        Point::new(100.0, 0.0),
        Point::new(100.0, 20.0),
        &StrokeStyle::dashed(Color::BLACK, 1.0, &[2.0, 2.0]),
    );
    canvas.draw_text("80 & more", Point::new(3.0, 38.0), &TextStyle::sized(12.0));
    canvas.end_group();
}

#[test]
fn test_recording_canvas_groups_commands() {
    let mut canvas = RecordingCanvas::new();
    paint_bar(&mut canvas);

    assert_eq!(canvas.commands().len(), 1);
    let groups = canvas.groups("barVisual");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 4);
    assert_eq!(canvas.texts(), vec!["80 & more"]);
    assert!(matches!(canvas.flattened()[2], DrawCommand::Line { .. }));
}

#[test]
fn test_recording_canvas_clear() {
    let mut canvas = RecordingCanvas::new();
    paint_bar(&mut canvas);
    canvas.clear();
    assert!(canvas.is_empty());
}

#[test]
fn test_svg_canvas_document() {
    let mut canvas = SvgCanvas::new(Size::new(200.0, 40.0));
    paint_bar(&mut canvas);
    let svg = canvas.finish();

    assert!(svg.contains("viewBox=\"0 0 200 40\""));
    assert!(svg.contains("fill-opacity=\"0.2\""));
    assert!(svg.contains("stroke-dasharray=\"2,2\""));
    assert!(svg.contains(">80 &amp; more</text>"));
    assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
}

#[test]
fn test_measurer_scales_with_font_size() {
    let small = EstimatedTextMeasurer.measure("blank", &TextStyle::sized(8.0));
    let large = EstimatedTextMeasurer.measure("blank", &TextStyle::sized(16.0));
    assert!((large.width - small.width * 2.0).abs() < 1e-4);
    assert!((large.height - small.height * 2.0).abs() < 1e-4);
}
