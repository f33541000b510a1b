//! Per-category bar records and the transform result.

use crate::field::Field;
use crate::selection::SelectionId;
use serde::{Deserialize, Serialize};

/// One category's measurements for a single bar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarData {
    /// Category label; `None` when the view has no category column
    pub category: Option<String>,
    /// Measured value
    pub value: Field,
    /// Goal, if the target role is bound and the cell is non-null
    pub target: Option<Field>,
    /// Full-scale value, if the max role is bound and the cell is non-null
    pub max: Option<Field>,
    /// Tooltip-role fields in column order
    pub tooltips: Vec<Field>,
    /// Identity used for selection
    pub selection_id: Option<SelectionId>,
    /// Error text shown through the tooltip of a placeholder bar
    pub status_message: Option<String>,
}

impl BarData {
    /// Create an empty record for a category.
    #[must_use]
    pub fn new(category: Option<String>) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Placeholder record carrying a status message.
    #[must_use]
    pub fn with_status(message: impl Into<String>) -> Self {
        Self {
            status_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// The field among value, target and max with the greatest non-null value.
    ///
    /// The value wins ties.
    #[must_use]
    pub fn largest(&self) -> &Field {
        let mut best = &self.value;
        for candidate in [self.target.as_ref(), self.max.as_ref()].into_iter().flatten() {
            let Some(v) = candidate.value else { continue };
            if best.value.map_or(true, |b| b < v) {
                best = candidate;
            }
        }
        best
    }

    /// `target - value` as a field, formatted like the value.
    #[must_use]
    pub fn gap_to_target(&self) -> Option<Field> {
        self.target.as_ref().map(|t| self.gap_to(t))
    }

    /// `max - value` as a field, formatted like the value.
    #[must_use]
    pub fn gap_to_max(&self) -> Option<Field> {
        self.max.as_ref().map(|m| self.gap_to(m))
    }

    fn gap_to(&self, other: &Field) -> Field {
        let gap = match (other.value, self.value.value) {
            (Some(o), Some(v)) => Some(o - v),
            _ => None,
        };
        Field::new(
            gap,
            self.value.format.clone(),
            format!(
                "Gap - {} & {}",
                self.value.display_name, other.display_name
            ),
        )
    }

    /// Check whether value, target and max are all missing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
            && self.target.as_ref().map_or(true, Field::is_blank)
            && self.max.as_ref().map_or(true, Field::is_blank)
    }

    /// Apply the display-unit settings to every field.
    ///
    /// The value uses `for_value` unless it is 0, the max uses `for_max`
    /// unless it is 0; everything else uses `general`.
    pub fn apply_display_units(&mut self, general: f64, for_value: f64, for_max: f64) {
        self.value.display_units = if for_value == 0.0 { general } else { for_value };
        if let Some(target) = &mut self.target {
            target.display_units = general;
        }
        if let Some(max) = &mut self.max {
            max.display_units = if for_max == 0.0 { general } else { for_max };
        }
        for field in &mut self.tooltips {
            field.display_units = general;
        }
    }
}

/// Result of mapping a data view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarDataTransform {
    /// One record per category
    Bars(Vec<BarData>),
    /// The view could not be mapped
    Status(String),
}

impl BarDataTransform {
    /// Records, if the mapping succeeded.
    #[must_use]
    pub fn bars(&self) -> Option<&[BarData]> {
        match self {
            Self::Bars(bars) => Some(bars),
            Self::Status(_) => None,
        }
    }

    /// Status message, if the mapping failed.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Bars(_) => None,
            Self::Status(message) => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(value: Option<f64>, target: Option<f64>, max: Option<f64>) -> BarData {
        BarData {
            value: Field::new(value, "", "Sales"),
            target: target.map(|t| Field::new(Some(t), "", "Goal")),
            max: max.map(|m| Field::new(Some(m), "", "Cap")),
            ..BarData::default()
        }
    }

    #[test]
    fn test_largest_picks_greatest() {
        assert_eq!(bar(Some(5.0), Some(10.0), Some(8.0)).largest().display_name, "Goal");
        assert_eq!(bar(Some(5.0), Some(10.0), Some(12.0)).largest().display_name, "Cap");
    }

    #[test]
    fn test_largest_value_wins_ties() {
        assert_eq!(bar(Some(10.0), Some(10.0), None).largest().display_name, "Sales");
    }

    #[test]
    fn test_largest_null_value_loses() {
        assert_eq!(bar(None, Some(3.0), None).largest().display_name, "Goal");
        assert_eq!(bar(None, None, None).largest().display_name, "Sales");
    }

    #[test]
    fn test_gap_fields() {
        let b = bar(Some(80.0), Some(100.0), Some(150.0));
        let gap = b.gap_to_target().unwrap();
        assert_eq!(gap.value, Some(20.0));
        assert_eq!(gap.display_name, "Gap - Sales & Goal");
        assert_eq!(b.gap_to_max().unwrap().value, Some(70.0));
    }

    #[test]
    fn test_gap_with_null_value() {
        let b = bar(None, Some(100.0), None);
        assert_eq!(b.gap_to_target().unwrap().value, None);
        assert!(b.gap_to_max().is_none());
    }

    #[test]
    fn test_is_blank() {
        assert!(bar(None, None, None).is_blank());
        assert!(!bar(None, Some(1.0), None).is_blank());
        let mut b = bar(None, None, None);
        b.target = Some(Field::blank());
        assert!(b.is_blank());
    }

    #[test]
    fn test_apply_display_units() {
        let mut b = bar(Some(1.0), Some(2.0), Some(3.0));
        b.tooltips.push(Field::new(Some(4.0), "", "Extra"));
        b.apply_display_units(1000.0, 0.0, 1e6);
        assert_eq!(b.value.display_units, 1000.0);
        assert_eq!(b.target.as_ref().unwrap().display_units, 1000.0);
        assert_eq!(b.max.as_ref().unwrap().display_units, 1e6);
        assert_eq!(b.tooltips[0].display_units, 1000.0);
    }

    #[test]
    fn test_transform_accessors() {
        let t = BarDataTransform::Status("bad".into());
        assert_eq!(t.status(), Some("bad"));
        assert!(t.bars().is_none());
    }
}
