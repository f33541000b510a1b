//! Tooltip content for bars and status placeholders.

use crate::bar_data::BarData;
use crate::field::Field;
use crate::format::{DisplayUnits, ValueFormatter, PERCENT_FORMAT};
use crate::settings::TextSettings;
use serde::{Deserialize, Serialize};

/// Display name of the single status tooltip item.
pub const STATUS_NAME: &str = "status";

/// One line of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipItem {
    /// Label
    pub display_name: String,
    /// Formatted value
    pub value: String,
}

impl TooltipItem {
    /// Create a tooltip line.
    #[must_use]
    pub fn new(display_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            value: value.into(),
        }
    }
}

/// Tooltip for a rendered bar.
///
/// Lists value, target and max, then the gaps to target and max, then every
/// tooltip-role field. Display units must already be applied to the record.
#[must_use]
pub fn bar_tooltip(bar: &BarData, text: &TextSettings) -> Vec<TooltipItem> {
    let with_units = !text.ignore_formatting_for_tooltips;
    let blank = text.blank_override();
    let item = |field: &Field| {
        TooltipItem::new(
            field.display_name.clone(),
            field.to_display_string(true, with_units, blank),
        )
    };

    let mut items: Vec<TooltipItem> = std::iter::once(&bar.value)
        .chain(bar.target.as_ref())
        .chain(bar.max.as_ref())
        .map(item)
        .collect();

    let gaps = [
        (bar.gap_to_target(), bar.target.as_ref()),
        (bar.gap_to_max(), bar.max.as_ref()),
    ];
    for (gap, reference) in gaps {
        let (Some(gap), Some(reference)) = (gap, reference) else {
            continue;
        };
        items.push(gap_item(gap, reference, text));
    }

    items.extend(bar.tooltips.iter().map(item));
    items
}

fn gap_item(mut gap: Field, reference: &Field, text: &TextSettings) -> TooltipItem {
    let with_units = !text.ignore_formatting_for_tooltips;
    gap.display_units = if with_units { text.display_units } else { 0.0 };
    if text.rep_positive_gap_as_negative_number {
        gap.value = gap.value.map(|v| -v);
    }

    let mut formatted = gap.to_display_string(true, with_units, text.blank_override());
    if text.show_percentages_on_gaps {
        let share = match (gap.value, reference.value) {
            (Some(g), Some(r)) if r != 0.0 => g.abs() / r,
            _ => 0.0,
        };
        let percent = ValueFormatter::new(PERCENT_FORMAT, DisplayUnits::None).format(share);
        formatted.push('(');
        formatted.push_str(&percent);
        formatted.push(')');
    }
    TooltipItem::new(gap.display_name, formatted)
}

/// Tooltip for a placeholder bar: a single `status` line.
#[must_use]
pub fn status_tooltip(message: &str) -> Vec<TooltipItem> {
    vec![TooltipItem::new(STATUS_NAME, message)]
}
