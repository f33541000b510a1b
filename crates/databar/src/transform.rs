//! Maps a categorical data view into bar records.

use crate::bar_data::{BarData, BarDataTransform};
use crate::data_view::{DataView, Role, ValueColumn};
use crate::field::Field;
use crate::format::plain_number;
use crate::selection::SelectionId;
use tracing::debug;

/// Status reported when no column carries the value role.
pub const MISSING_VALUE_MESSAGE: &str = "The value field must be supplied";

/// Column indices bound to each role.
#[derive(Debug, Default)]
struct RoleBindings {
    value: Option<usize>,
    target: Option<usize>,
    max: Option<usize>,
    tooltips: Vec<usize>,
}

impl RoleBindings {
    fn scan(columns: &[ValueColumn]) -> Self {
        let mut bindings = Self::default();
        for (i, column) in columns.iter().enumerate() {
            let roles = &column.source.roles;
            if roles.has(Role::Value) {
                bindings.value = Some(i);
            }
            if roles.has(Role::Target) {
                bindings.target = Some(i);
            }
            if roles.has(Role::Max) {
                bindings.max = Some(i);
            }
            if roles.has(Role::Tooltips) {
                bindings.tooltips.push(i);
            }
        }
        bindings
    }
}

fn field_at(column: &ValueColumn, row: usize) -> Field {
    Field::new(
        column.number(row),
        column.source.format.clone(),
        column.source.display_name.clone(),
    )
}

fn present_field_at(column: &ValueColumn, row: usize) -> Option<Field> {
    let field = field_at(column, row);
    (!field.is_blank()).then_some(field)
}

/// Map a data view into one record per category.
///
/// Returns [`BarDataTransform::Status`] when the value role is unbound or a
/// row's target exceeds its max.
#[must_use]
pub fn visual_transform(view: &DataView) -> BarDataTransform {
    let columns = &view.categorical.values;
    let bindings = RoleBindings::scan(columns);

    let Some(value_index) = bindings.value else {
        return BarDataTransform::Status(MISSING_VALUE_MESSAGE.to_string());
    };

    let mut bars: Vec<BarData> = match view.categorical.categories.first() {
        Some(category) if !category.values.is_empty() => (0..category.values.len())
            .map(|row| {
                let label = category.label(row);
                let mut bar = BarData::new(Some(label.clone()));
                bar.selection_id = Some(SelectionId::new(
                    category.source.display_name.clone(),
                    row,
                    label,
                ));
                bar
            })
            .collect(),
        _ => vec![BarData::new(None)],
    };

    for (row, bar) in bars.iter_mut().enumerate() {
        bar.value = field_at(&columns[value_index], row);
        bar.target = bindings
            .target
            .and_then(|i| present_field_at(&columns[i], row));
        bar.max = bindings.max.and_then(|i| present_field_at(&columns[i], row));

        if let (Some(target), Some(max)) = (
            bar.target.as_ref().and_then(|f| f.value),
            bar.max.as_ref().and_then(|f| f.value),
        ) {
            if target > max {
                return BarDataTransform::Status(format!(
                    "Target ({}) is greater than max ({}). This is not allowed",
                    plain_number(target),
                    plain_number(max)
                ));
            }
        }

        bar.tooltips = bindings
            .tooltips
            .iter()
            .map(|&i| field_at(&columns[i], row))
            .collect();
    }

    debug!(bars = bars.len(), "mapped data view");
    BarDataTransform::Bars(bars)
}
