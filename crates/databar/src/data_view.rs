//! Categorical data view: role-tagged value columns plus an optional category axis.
//!
//! The serialized shape follows the host's `dataViews[0].categorical` object,
//! so a captured data view can be loaded directly from JSON.
//!
//! # Examples
//!
//! ```
//! use databar::data_view::{DataView, Role, ValueColumn};
//!
//! let view = DataView::new(
//!     None,
//!     vec![
//!         ValueColumn::numeric("Sales", Role::Value, [Some(80.0)]),
//!         ValueColumn::numeric("Goal", Role::Target, [Some(100.0)]),
//!     ],
//! );
//! assert_eq!(view.categorical.values.len(), 2);
//! ```

use crate::format::plain_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for a null category value.
pub const BLANK_CATEGORY: &str = "(Blank)";

/// Root of the data view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataView {
    /// Categorical mapping
    #[serde(default)]
    pub categorical: CategoricalView,
}

impl DataView {
    /// Build a data view from an optional category column and value columns.
    #[must_use]
    pub fn new(categories: Option<CategoryColumn>, values: Vec<ValueColumn>) -> Self {
        Self {
            categorical: CategoricalView {
                categories: categories.into_iter().collect(),
                values,
            },
        }
    }

    /// Parse a data view from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the data view shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Categorical mapping of the data view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoricalView {
    /// Category columns; only the first one is used
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
    /// Measure columns
    #[serde(default)]
    pub values: Vec<ValueColumn>,
}

/// Column roles the visual recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The measured value
    Value,
    /// The goal
    Target,
    /// The bar's full-scale value
    Max,
    /// Extra tooltip measures
    Tooltips,
}

/// Role flags attached to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Roles {
    /// Tagged as value
    pub value: bool,
    /// Tagged as target
    pub target: bool,
    /// Tagged as max
    pub max: bool,
    /// Tagged as tooltip
    pub tooltips: bool,
}

impl Roles {
    /// Flags with exactly one role set.
    #[must_use]
    pub fn only(role: Role) -> Self {
        let mut roles = Self::default();
        roles.set(role);
        roles
    }

    /// Tag with an additional role.
    pub fn set(&mut self, role: Role) {
        match role {
            Role::Value => self.value = true,
            Role::Target => self.target = true,
            Role::Max => self.max = true,
            Role::Tooltips => self.tooltips = true,
        }
    }

    /// Check whether a role is set.
    #[must_use]
    pub const fn has(&self, role: Role) -> bool {
        match role {
            Role::Value => self.value,
            Role::Target => self.target,
            Role::Max => self.max,
            Role::Tooltips => self.tooltips,
        }
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSource {
    /// Display name
    pub display_name: String,
    /// Format string (empty = general)
    #[serde(default)]
    pub format: String,
    /// Role flags
    #[serde(default)]
    pub roles: Roles,
}

/// A raw cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// Numeric cell
    Number(f64),
    /// Boolean cell
    Bool(bool),
    /// Text cell
    Text(String),
}

impl DataValue {
    /// Numeric interpretation: numbers as-is, booleans as 1/0, numeric text parsed.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&plain_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Category axis column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryColumn {
    /// Column metadata
    pub source: ColumnSource,
    /// One entry per row
    #[serde(default)]
    pub values: Vec<Option<DataValue>>,
}

impl CategoryColumn {
    /// Build a category column from non-null labels.
    #[must_use]
    pub fn new<V: Into<DataValue>>(display_name: &str, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            source: ColumnSource {
                display_name: display_name.to_string(),
                ..ColumnSource::default()
            },
            values: values.into_iter().map(|v| Some(v.into())).collect(),
        }
    }

    /// Label for a row.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        match self.values.get(index) {
            Some(Some(value)) => value.to_string(),
            _ => BLANK_CATEGORY.to_string(),
        }
    }
}

/// Measure column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueColumn {
    /// Column metadata
    pub source: ColumnSource,
    /// One entry per row
    #[serde(default)]
    pub values: Vec<Option<DataValue>>,
}

impl ValueColumn {
    /// Build a numeric column tagged with one role.
    #[must_use]
    pub fn numeric(
        display_name: &str,
        role: Role,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        Self {
            source: ColumnSource {
                display_name: display_name.to_string(),
                format: String::new(),
                roles: Roles::only(role),
            },
            values: values.into_iter().map(|v| v.map(DataValue::Number)).collect(),
        }
    }

    /// Set the format string.
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.source.format = format.to_string();
        self
    }

    /// Numeric value of a row; nulls, missing rows and non-numeric text are `None`.
    #[must_use]
    pub fn number(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .and_then(Option::as_ref)
            .and_then(DataValue::to_number)
    }
}
