//! Fill / target-line percentages and status classification.

use crate::bar_data::BarData;
use crate::settings::StatusColors;
use databar_core::Color;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Where the fill ends and the target line sits, in percent of the bar width.
///
/// Values are kept raw; only the painted fill is clamped to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarGeometry {
    /// Filled share of the bar
    pub fill_percent: f64,
    /// Target line position
    pub line_percent: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

impl BarGeometry {
    /// Compute percentages. A missing value counts as 0.
    ///
    /// | target | max | fill | line |
    /// |---|---|---|---|
    /// | - | - | 0 | 0 |
    /// | - | m | v/m | 0 |
    /// | t | - | v/2t | 50 |
    /// | t | m | v/m | t/m |
    #[must_use]
    pub fn compute(value: Option<f64>, target: Option<f64>, max: Option<f64>) -> Self {
        let value = value.unwrap_or(0.0);
        match (target, max) {
            (None, None) => Self::default(),
            (None, Some(max)) => Self {
                fill_percent: ratio(value, max),
                line_percent: 0.0,
            },
            (Some(target), None) => Self {
                fill_percent: ratio(value, target * 2.0),
                line_percent: 50.0,
            },
            (Some(target), Some(max)) => Self {
                fill_percent: ratio(value, max),
                line_percent: ratio(target, max),
            },
        }
    }

    /// Percentages for a record.
    #[must_use]
    pub fn for_bar(bar: &BarData) -> Self {
        Self::compute(
            bar.value.value,
            bar.target.as_ref().and_then(|f| f.value),
            bar.max.as_ref().and_then(|f| f.value),
        )
    }

    /// Fill fraction clamped to `0.0..=1.0`.
    #[must_use]
    pub fn fill_fraction(&self) -> f32 {
        (self.fill_percent / 100.0).clamp(0.0, 1.0) as f32
    }

    /// Target line fraction clamped to `0.0..=1.0`.
    #[must_use]
    pub fn line_fraction(&self) -> f32 {
        (self.line_percent / 100.0).clamp(0.0, 1.0) as f32
    }
}

/// Value compared against the target (or max when there is no target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    /// Above the comparison
    GreaterThan,
    /// Below the comparison
    LessThan,
    /// Equal to the comparison
    EqualTo,
    /// No value, or nothing to compare against
    NoTarget,
}

impl StatusKind {
    /// Classify a record.
    #[must_use]
    pub fn derive(bar: &BarData) -> Self {
        let Some(value) = bar.value.value else {
            return Self::NoTarget;
        };
        let reference = match (&bar.target, &bar.max) {
            (Some(target), _) => target.value,
            (None, Some(max)) => max.value,
            (None, None) => return Self::NoTarget,
        };
        match value.partial_cmp(&reference.unwrap_or(0.0)) {
            Some(Ordering::Greater) => Self::GreaterThan,
            Some(Ordering::Less) => Self::LessThan,
            _ => Self::EqualTo,
        }
    }

    /// Bar fill color for this status.
    #[must_use]
    pub fn bar_color(self, colors: &StatusColors) -> Color {
        match self {
            Self::GreaterThan => colors.greater_than,
            Self::LessThan => colors.less_than,
            Self::EqualTo => colors.equal_to,
            Self::NoTarget => colors.no_target_fill,
        }
    }

    /// Label color for this status.
    #[must_use]
    pub fn font_color(self, colors: &StatusColors) -> Color {
        match self {
            Self::NoTarget => colors.no_target_text,
            other => other.bar_color(colors),
        }
    }
}
