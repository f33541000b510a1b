//! Integration tests for databar.
//!
//! These tests drive the visual end-to-end: JSON data view in, settings from
//! YAML, draw commands and SVG out.

use databar::data_view::{CategoryColumn, Role, ValueColumn};
use databar::{
    visual_transform, BarDataTransform, DataBarVisual, DataView, Field, StatusKind, VisualSettings,
};
use databar_core::{DrawCommand, Point, RecordingCanvas, Size, SvgCanvas};

// =============================================================================
// Fixtures
// =============================================================================

const SALES_VIEW: &str = r##"{
  "categorical": {
    "categories": [
      { "source": { "displayName": "Region" }, "values": ["North", "South", null] }
    ],
    "values": [
      {
        "source": { "displayName": "Sales", "format": "#,0", "roles": { "value": true } },
        "values": [80000, 120000, 45000]
      },
      {
        "source": { "displayName": "Goal", "format": "#,0", "roles": { "target": true } },
        "values": [100000, 100000, null]
      },
      {
        "source": { "displayName": "Cost", "format": "#,0.0", "roles": { "tooltips": true } },
        "values": [12500, 8000, 3000]
      }
    ]
  }
}"##;

const SETTINGS_YAML: &str = r#"
items:
  orientation: horizontal
  padding: 8
text:
  display_units: 1000
color:
  less_than: orange
header:
  show: true
  position: top
  value: Regional sales
"#;

fn single(value: Option<f64>, target: Option<f64>, max: Option<f64>) -> DataView {
    let mut columns = vec![ValueColumn::numeric("Sales", Role::Value, [value])];
    if let Some(t) = target {
        columns.push(ValueColumn::numeric("Goal", Role::Target, [Some(t)]));
    }
    if let Some(m) = max {
        columns.push(ValueColumn::numeric("Cap", Role::Max, [Some(m)]));
    }
    DataView::new(None, columns)
}

fn render(view: &DataView, settings: &VisualSettings) -> (DataBarVisual, RecordingCanvas) {
    let mut visual = DataBarVisual::new();
    let mut canvas = RecordingCanvas::new();
    visual.update(view, settings, Size::new(400.0, 80.0), &mut canvas);
    (visual, canvas)
}

// =============================================================================
// Geometry and status
// =============================================================================

#[test]
fn test_value_against_target_end_to_end() {
    let (visual, _) = render(&single(Some(80.0), Some(100.0), None), &VisualSettings::default());
    let bar = &visual.hit_regions()[0];
    assert_eq!(bar.geometry.fill_percent, 40.0);
    assert_eq!(bar.geometry.line_percent, 50.0);
    assert_eq!(bar.status, StatusKind::LessThan);
    assert_eq!(
        serde_json::to_value(bar.status).unwrap(),
        serde_json::json!("lessThan")
    );
}

#[test]
fn test_no_target_no_max() {
    let (visual, canvas) = render(&single(Some(80.0), None, None), &VisualSettings::default());
    let bar = &visual.hit_regions()[0];
    assert_eq!(bar.geometry.fill_percent, 0.0);
    assert_eq!(bar.geometry.line_percent, 0.0);
    let lines = canvas
        .flattened()
        .into_iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .count();
    assert_eq!(lines, 0);
}

#[test]
fn test_target_and_max() {
    let (visual, _) = render(&single(Some(50.0), Some(150.0), Some(200.0)), &VisualSettings::default());
    let bar = &visual.hit_regions()[0];
    assert_eq!(bar.geometry.fill_percent, 25.0);
    assert_eq!(bar.geometry.line_percent, 75.0);
}

#[test]
fn test_all_blank_record_renders_placeholder() {
    let (visual, canvas) = render(&single(None, None, None), &VisualSettings::default());
    assert_eq!(canvas.texts(), vec!["blank"]);
    assert_eq!(visual.hit_regions()[0].status, StatusKind::NoTarget);
}

#[test]
fn test_target_greater_than_max_is_reported() {
    let view = single(Some(10.0), Some(300.0), Some(200.0));
    match visual_transform(&view) {
        BarDataTransform::Status(message) => {
            assert_eq!(message, "Target (300) is greater than max (200). This is not allowed");
        }
        BarDataTransform::Bars(_) => panic!("expected a status message"),
    }

    let (visual, _) = render(&view, &VisualSettings::default());
    let tooltip = visual.tooltip_at(Point::new(5.0, 5.0)).unwrap();
    assert_eq!(tooltip[0].display_name, "status");
    assert!(tooltip[0].value.starts_with("Target (300)"));
}

#[test]
fn test_raw_field_string() {
    let field = Field::new(Some(80.0), "#,0.00", "Sales").with_display_units(1000.0);
    assert_eq!(field.to_display_string(false, false, None), "80");
}

// =============================================================================
// JSON data view + YAML settings
// =============================================================================

#[test]
fn test_json_view_with_yaml_settings() {
    let view = DataView::from_json(SALES_VIEW).expect("valid data view");
    let settings = VisualSettings::from_yaml(SETTINGS_YAML).expect("valid settings");

    let (visual, canvas) = render(&view, &settings);
    let regions = visual.hit_regions();
    assert_eq!(regions.len(), 3);

    // horizontal tiling below the header
    assert!(regions[0].bounds.x < regions[1].bounds.x);
    assert!(regions[0].bounds.y > 0.0);
    assert!(canvas.texts().contains(&"Regional sales"));
    assert!(canvas.texts().contains(&"(Blank)"));

    assert_eq!(regions[0].status, StatusKind::LessThan);
    assert_eq!(regions[1].status, StatusKind::GreaterThan);
    assert_eq!(regions[2].status, StatusKind::NoTarget);
}

#[test]
fn test_tooltips_from_json_view() {
    let view = DataView::from_json(SALES_VIEW).expect("valid data view");
    let settings = VisualSettings::from_yaml(SETTINGS_YAML).expect("valid settings");
    let (visual, _) = render(&view, &settings);

    let tooltip = &visual.hit_regions()[0].tooltip;
    let names: Vec<&str> = tooltip.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["Sales", "Goal", "Gap - Sales & Goal", "Cost"]);
    assert_eq!(tooltip[0].value, "80K");
    assert_eq!(tooltip[2].value, "-20K(20.00 %)");
    assert_eq!(tooltip[3].value, "12.5K");
}

#[test]
fn test_value_on_target_gap_has_no_sign() {
    let view = DataView::new(
        None,
        vec![
            ValueColumn::numeric("Sales", Role::Value, [Some(100.0)]).with_format("#,0"),
            ValueColumn::numeric("Goal", Role::Target, [Some(100.0)]).with_format("#,0"),
        ],
    );
    let (visual, _) = render(&view, &VisualSettings::default());
    let region = &visual.hit_regions()[0];
    assert_eq!(region.status, StatusKind::EqualTo);
    assert_eq!(region.tooltip[2].display_name, "Gap - Sales & Goal");
    assert_eq!(region.tooltip[2].value, "0(0.00 %)");
}

#[test]
fn test_css_color_names_from_yaml() {
    let settings = VisualSettings::from_yaml("color:\n  less_than: crimson\n").expect("valid settings");
    let mut visual = DataBarVisual::new();
    let mut canvas = SvgCanvas::new(Size::new(200.0, 40.0));
    visual.update(&single(Some(80.0), Some(100.0), None), &settings, canvas.size(), &mut canvas);
    let svg = canvas.finish();

    assert!(svg.contains("fill=\"#dc143c\""));
    assert!(!svg.contains(">blank</text>"));
}

#[test]
fn test_selection_round_trip() {
    let view = DataView::new(
        Some(CategoryColumn::new("Region", ["A", "B"])),
        vec![
            ValueColumn::numeric("Sales", Role::Value, [Some(1.0), Some(2.0)]),
            ValueColumn::numeric("Goal", Role::Target, [Some(2.0), Some(2.0)]),
        ],
    );
    let mut visual = DataBarVisual::new();
    let mut canvas = RecordingCanvas::new();
    visual.update(&view, &VisualSettings::default(), Size::new(300.0, 200.0), &mut canvas);

    let b = visual.hit_regions()[1].bounds.center();
    let selected = visual.click(b, false, &mut canvas);
    assert_eq!(selected[0].key, "B");
    assert_eq!(selected[0].index, 1);

    let again = visual.click(b, false, &mut canvas);
    assert!(again.is_empty());
}

// =============================================================================
// SVG output
// =============================================================================

#[test]
fn test_svg_document() {
    let view = single(Some(80.0), Some(100.0), None);
    let mut visual = DataBarVisual::new();
    let mut canvas = SvgCanvas::new(Size::new(200.0, 40.0));
    visual.update(&view, &VisualSettings::default(), canvas.size(), &mut canvas);
    let svg = canvas.finish();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("class=\"barVisual\""));
    assert!(svg.contains("fill=\"#f44336\""));
    assert!(svg.contains("stroke-dasharray=\"2,2\""));
    assert!(svg.contains(">80</text>"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_invalid_color_renders_error_placeholder() {
    let mut settings = VisualSettings::default();
    settings.color.equal_to = "not-a-color".to_string();
    let (visual, canvas) = render(&single(Some(1.0), Some(1.0), None), &settings);

    assert_eq!(canvas.texts(), vec!["blank"]);
    let tooltip = &visual.hit_regions()[0].tooltip;
    assert_eq!(tooltip.len(), 1);
    assert!(tooltip[0].value.contains("color.equal_to"));
}
