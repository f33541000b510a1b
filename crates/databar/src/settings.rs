//! Visual settings: serde-loadable groups with defaults, plus typed resolution.
//!
//! Documents may be partial; every missing field takes its default.
//!
//! ```
//! use databar::VisualSettings;
//!
//! let settings = VisualSettings::from_yaml("text:\n  font_size: 14\n").unwrap();
//! assert_eq!(settings.text.font_size, 14.0);
//! assert_eq!(settings.items.orientation, "vertical");
//! ```

use crate::error::{RenderError, SettingsError};
use databar_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All settings groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Multi-bar tiling
    pub items: ItemsSettings,
    /// Category labels
    pub section: SectionSettings,
    /// Value and max labels, tooltips
    pub text: TextSettings,
    /// Status colors
    pub color: ColorSettings,
    /// Target marker
    pub target_line: TargetLineSettings,
    /// Outer bar
    pub outer_bar: OuterBarSettings,
    /// Canvas header
    pub header: HeaderSettings,
}

/// Multi-bar tiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsSettings {
    /// `vertical` or `horizontal`
    pub orientation: String,
    /// Gap between cells
    pub padding: f32,
    /// Minimum cell width
    pub min_width: f32,
    /// Extra cell height added to the value label height
    pub min_height: f32,
}

impl Default for ItemsSettings {
    fn default() -> Self {
        Self {
            orientation: "vertical".to_string(),
            padding: 5.0,
            min_width: 20.0,
            min_height: 20.0,
        }
    }
}

/// Category label placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// `left`, `right`, `top` or `bottom`
    pub position: String,
    /// Label font size
    pub font_size: f32,
    /// Label color
    pub font_color: String,
    /// Space between label and bar
    pub margin_between: f32,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            position: "left".to_string(),
            font_size: 8.0,
            font_color: "#000000".to_string(),
            margin_between: 10.0,
        }
    }
}

/// Value / max labels and tooltip formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// `below` or `onbar`
    pub position: String,
    /// Label font size
    pub font_size: f32,
    /// Display units for everything without a specific override
    pub display_units: f64,
    /// Draw the value label
    pub show_value_text: bool,
    /// Display units for the value (0 = use `display_units`)
    pub display_units_for_value: f64,
    /// Draw the max label
    pub show_max_text: bool,
    /// Display units for the max (0 = use `display_units`)
    pub display_units_for_max: f64,
    /// Negate gaps in tooltips
    pub rep_positive_gap_as_negative_number: bool,
    /// Append gap percentages in tooltips
    pub show_percentages_on_gaps: bool,
    /// Format tooltip values without display units
    pub ignore_formatting_for_tooltips: bool,
    /// Format missing values as 0
    pub treat_blanks_as_zeros: bool,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            position: "below".to_string(),
            font_size: 12.0,
            display_units: 0.0,
            show_value_text: true,
            display_units_for_value: 0.0,
            show_max_text: true,
            display_units_for_max: 0.0,
            rep_positive_gap_as_negative_number: true,
            show_percentages_on_gaps: true,
            ignore_formatting_for_tooltips: false,
            treat_blanks_as_zeros: false,
        }
    }
}

impl TextSettings {
    /// Number substituted for missing values when formatting.
    #[must_use]
    pub fn blank_override(&self) -> Option<f64> {
        self.treat_blanks_as_zeros.then_some(0.0)
    }
}

/// Status colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Text color when there is nothing to compare against
    pub default_color_no_target_text: String,
    /// Fill color when there is nothing to compare against
    pub default_color_no_target_fill: String,
    /// Value below the comparison
    pub less_than: String,
    /// Value equal to the comparison
    pub equal_to: String,
    /// Value above the comparison
    pub greater_than: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            default_color_no_target_text: "#000000".to_string(),
            default_color_no_target_fill: "#000000".to_string(),
            less_than: "#f44336".to_string(),
            equal_to: "#4caf50".to_string(),
            greater_than: "#4caf50".to_string(),
        }
    }
}

/// Target marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetLineSettings {
    /// Line color
    pub color: String,
    /// Line width
    pub stroke_width: f32,
    /// `dashed` or `solid`
    pub line_style: String,
}

impl Default for TargetLineSettings {
    fn default() -> Self {
        Self {
            color: "grey".to_string(),
            stroke_width: 1.0,
            line_style: "dashed".to_string(),
        }
    }
}

/// Outer bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OuterBarSettings {
    /// Use the no-target fill when the bar has neither target nor max
    pub fill_when_no_target: bool,
    /// Fill color
    pub fill: String,
    /// Outline color
    pub outline_color: String,
}

impl Default for OuterBarSettings {
    fn default() -> Self {
        Self {
            fill_when_no_target: true,
            fill: "white".to_string(),
            outline_color: "grey".to_string(),
        }
    }
}

/// Canvas header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSettings {
    /// Draw the header
    pub show: bool,
    /// `left`, `right`, `top` or `bottom`
    pub position: String,
    /// Header text
    pub value: String,
    /// Header font size
    pub font_size: f32,
    /// Space between header and bars
    pub margin_between: f32,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            show: false,
            position: "left".to_string(),
            value: String::new(),
            font_size: 18.0,
            margin_between: 5.0,
        }
    }
}

impl VisualSettings {
    /// Parse settings from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse settings from TOML.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let read = || {
            std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&read()?),
            "json" => Self::from_json(&read()?),
            "toml" => Self::from_toml(&read()?),
            other => Err(SettingsError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Check every enumerated option and color.
    pub fn validate(&self) -> Result<(), RenderError> {
        option::<Orientation>("items.orientation", &self.items.orientation)?;
        option::<LabelPosition>("section.position", &self.section.position)?;
        option::<TextPosition>("text.position", &self.text.position)?;
        option::<LineStyle>("target_line.line_style", &self.target_line.line_style)?;
        if self.header.show {
            option::<LabelPosition>("header.position", &self.header.position)?;
        }
        for (setting, value) in self.colors() {
            color(setting, value)?;
        }
        Ok(())
    }

    fn colors(&self) -> [(&'static str, &str); 9] {
        [
            ("section.font_color", &self.section.font_color),
            (
                "color.default_color_no_target_text",
                &self.color.default_color_no_target_text,
            ),
            (
                "color.default_color_no_target_fill",
                &self.color.default_color_no_target_fill,
            ),
            ("color.less_than", &self.color.less_than),
            ("color.equal_to", &self.color.equal_to),
            ("color.greater_than", &self.color.greater_than),
            ("target_line.color", &self.target_line.color),
            ("outer_bar.fill", &self.outer_bar.fill),
            ("outer_bar.outline_color", &self.outer_bar.outline_color),
        ]
    }
}

/// A string setting with a fixed set of values.
trait SettingOption: Sized + Default {
    const EXPECTED: &'static str;

    fn from_value(value: &str) -> Option<Self>;
}

fn option<T: SettingOption>(setting: &'static str, value: &str) -> Result<T, RenderError> {
    T::from_value(value.trim()).ok_or_else(|| RenderError::InvalidOption {
        setting,
        value: value.to_string(),
        expected: T::EXPECTED,
    })
}

fn color(setting: &'static str, value: &str) -> Result<Color, RenderError> {
    Color::parse(value).map_err(|source| RenderError::InvalidColor {
        setting,
        value: value.to_string(),
        source,
    })
}

fn color_or(value: &str, default: &str) -> Color {
    Color::parse(value)
        .or_else(|_| Color::parse(default))
        .unwrap_or(Color::BLACK)
}

/// Direction multiple bars are tiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Stacked top to bottom
    #[default]
    Vertical,
    /// Side by side
    Horizontal,
}

impl SettingOption for Orientation {
    const EXPECTED: &'static str = "vertical, horizontal";

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

/// Side of an area a label is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPosition {
    /// Left edge, vertically centered
    #[default]
    Left,
    /// Right edge, vertically centered
    Right,
    /// Top edge, horizontally centered
    Top,
    /// Bottom edge, horizontally centered
    Bottom,
}

impl SettingOption for LabelPosition {
    const EXPECTED: &'static str = "left, right, top, bottom";

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Where value and max labels go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPosition {
    /// Under the bar, consuming vertical space
    #[default]
    Below,
    /// Centered on the bar, drawn last
    OnBar,
}

impl SettingOption for TextPosition {
    const EXPECTED: &'static str = "below, onbar";

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "below" => Some(Self::Below),
            "onbar" => Some(Self::OnBar),
            _ => None,
        }
    }
}

/// Target line stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// `2,2` dash pattern
    #[default]
    Dashed,
    /// Continuous
    Solid,
}

impl SettingOption for LineStyle {
    const EXPECTED: &'static str = "dashed, solid";

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "dashed" => Some(Self::Dashed),
            "solid" => Some(Self::Solid),
            _ => None,
        }
    }
}

/// Status palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusColors {
    /// Text color with nothing to compare against
    pub no_target_text: Color,
    /// Fill color with nothing to compare against
    pub no_target_fill: Color,
    /// Value below the comparison
    pub less_than: Color,
    /// Value equal to the comparison
    pub equal_to: Color,
    /// Value above the comparison
    pub greater_than: Color,
}

/// Settings with every option and color parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Tiling direction
    pub orientation: Orientation,
    /// Category label side
    pub section_position: LabelPosition,
    /// Category label color
    pub section_color: Color,
    /// Value / max label placement
    pub text_position: TextPosition,
    /// Status palette
    pub colors: StatusColors,
    /// Target line color
    pub target_line_color: Color,
    /// Target line stroke
    pub line_style: LineStyle,
    /// Outer bar fill
    pub outer_fill: Color,
    /// Outer bar outline
    pub outline_color: Color,
    /// Header side
    pub header_position: LabelPosition,
    /// Numeric and boolean settings as given
    pub raw: VisualSettings,
}

impl ResolvedSettings {
    /// Resolve settings, failing on the first invalid option or color.
    pub fn resolve(settings: &VisualSettings) -> Result<Self, RenderError> {
        settings.validate()?;
        Ok(Self::fallback(settings))
    }

    /// Resolve settings, replacing anything invalid with its default.
    #[must_use]
    pub fn fallback(settings: &VisualSettings) -> Self {
        let defaults = VisualSettings::default();
        let color = &settings.color;
        let default_color = &defaults.color;

        Self {
            orientation: lenient_option(&settings.items.orientation),
            section_position: lenient_option(&settings.section.position),
            section_color: color_or(&settings.section.font_color, &defaults.section.font_color),
            text_position: lenient_option(&settings.text.position),
            colors: StatusColors {
                no_target_text: color_or(
                    &color.default_color_no_target_text,
                    &default_color.default_color_no_target_text,
                ),
                no_target_fill: color_or(
                    &color.default_color_no_target_fill,
                    &default_color.default_color_no_target_fill,
                ),
                less_than: color_or(&color.less_than, &default_color.less_than),
                equal_to: color_or(&color.equal_to, &default_color.equal_to),
                greater_than: color_or(&color.greater_than, &default_color.greater_than),
            },
            target_line_color: color_or(&settings.target_line.color, &defaults.target_line.color),
            line_style: lenient_option(&settings.target_line.line_style),
            outer_fill: color_or(&settings.outer_bar.fill, &defaults.outer_bar.fill),
            outline_color: color_or(
                &settings.outer_bar.outline_color,
                &defaults.outer_bar.outline_color,
            ),
            header_position: lenient_option(&settings.header.position),
            raw: settings.clone(),
        }
    }

    /// Text settings.
    #[must_use]
    pub fn text(&self) -> &TextSettings {
        &self.raw.text
    }
}

fn lenient_option<T: SettingOption>(value: &str) -> T {
    T::from_value(value.trim()).unwrap_or_default()
}
