//! KPI data bar visual.
//!
//! Renders a value against an optional target and maximum with status
//! coloring, tooltips and multi-category layout. The pipeline is:
//!
//! 1. [`visual_transform`] maps a categorical [`DataView`] into [`BarData`]
//!    records (or a status message when the view cannot be mapped).
//! 2. [`DataBarVisual`] lays out one cell per record and paints it onto any
//!    [`databar_core::Canvas`].
//!
//! # Examples
//!
//! ```
//! use databar::data_view::{DataView, Role, ValueColumn};
//! use databar::{DataBarVisual, StatusKind, VisualSettings};
//! use databar_core::{RecordingCanvas, Size};
//!
//! let view = DataView::new(
//!     None,
//!     vec![
//!         ValueColumn::numeric("Sales", Role::Value, [Some(80.0)]),
//!         ValueColumn::numeric("Goal", Role::Target, [Some(100.0)]),
//!     ],
//! );
//!
//! let mut visual = DataBarVisual::new();
//! let mut canvas = RecordingCanvas::new();
//! visual.update(&view, &VisualSettings::default(), Size::new(200.0, 40.0), &mut canvas);
//!
//! let bar = &visual.hit_regions()[0];
//! assert_eq!(bar.geometry.fill_percent, 40.0);
//! assert_eq!(bar.geometry.line_percent, 50.0);
//! assert_eq!(bar.status, StatusKind::LessThan);
//! ```

mod bar_data;
mod bar_geometry;
pub mod data_view;
mod error;
mod field;
pub mod format;
mod layout;
mod selection;
pub mod settings;
mod tooltip;
mod transform;
mod visual;

pub use bar_data::{BarData, BarDataTransform};
pub use bar_geometry::{BarGeometry, StatusKind};
pub use data_view::{DataValue, DataView};
pub use error::{RenderError, SettingsError};
pub use field::{Field, BLANK_TEXT};
pub use format::{DisplayUnits, ValueFormatter};
pub use layout::{tile, Area};
pub use selection::{SelectionId, SelectionManager, ToggleSelectionManager};
pub use settings::{ResolvedSettings, VisualSettings};
pub use tooltip::{bar_tooltip, status_tooltip, TooltipItem, STATUS_NAME};
pub use transform::{visual_transform, MISSING_VALUE_MESSAGE};
pub use visual::{DataBarVisual, HitRegion};
