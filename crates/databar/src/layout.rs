//! Immutable drawing areas and multi-bar tiling.

use crate::settings::Orientation;
use databar_core::Rect;

/// Axis-aligned rectangle given by its edges.
///
/// Splitting never mutates: every operation returns the remaining area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Area {
    /// Left edge
    pub x_min: f32,
    /// Right edge
    pub x_max: f32,
    /// Top edge
    pub y_min: f32,
    /// Bottom edge
    pub y_max: f32,
}

impl Area {
    /// Create an area from its edges.
    #[must_use]
    pub const fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Area covering a viewport anchored at the origin.
    #[must_use]
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y_min + self.height() / 2.0
    }

    /// Horizontal midpoint.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x_min + self.width() / 2.0
    }

    /// The remaining area after removing `amount` from the left.
    #[must_use]
    pub fn take_left(&self, amount: f32) -> Self {
        Self {
            x_min: self.x_min + amount,
            ..*self
        }
    }

    /// The remaining area after removing `amount` from the right.
    #[must_use]
    pub fn take_right(&self, amount: f32) -> Self {
        Self {
            x_max: self.x_max - amount,
            ..*self
        }
    }

    /// The remaining area after removing `amount` from the top.
    #[must_use]
    pub fn take_top(&self, amount: f32) -> Self {
        Self {
            y_min: self.y_min + amount,
            ..*self
        }
    }

    /// The remaining area after removing `amount` from the bottom.
    #[must_use]
    pub fn take_bottom(&self, amount: f32) -> Self {
        Self {
            y_max: self.y_max - amount,
            ..*self
        }
    }

    /// Inset top and bottom by `fraction` of the height each.
    #[must_use]
    pub fn shrink_vertical(&self, fraction: f32) -> Self {
        let margin = self.height() * fraction;
        self.take_top(margin).take_bottom(margin)
    }

    /// Convert to a position/size rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.width(), self.height())
    }
}

/// Split `area` into `count` equal cells along `orientation`.
///
/// Each cell is at least `min_cell` long along the tiling axis (and across
/// it); when the minimum does not fit, the cells overflow `area` instead of
/// shrinking.
#[must_use]
pub fn tile(
    area: &Area,
    count: usize,
    min_cell_width: f32,
    min_cell_height: f32,
    padding: f32,
    orientation: Orientation,
) -> Vec<Area> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f32;
    let padding_total = padding * (n - 1.0);

    let (min_height, min_width) = match orientation {
        Orientation::Vertical => (min_cell_height * n + padding_total, min_cell_width),
        Orientation::Horizontal => (min_cell_height, min_cell_width * n + padding_total),
    };
    let total_height = area.height().max(min_height);
    let total_width = area.width().max(min_width);

    let (cell_width, cell_height) = match orientation {
        Orientation::Vertical => (total_width, (total_height - padding_total) / n),
        Orientation::Horizontal => ((total_width - padding_total) / n, total_height),
    };

    (0..count)
        .map(|i| {
            let i = i as f32;
            let (x_min, y_min) = match orientation {
                Orientation::Vertical => (area.x_min, area.y_min + (padding + cell_height) * i),
                Orientation::Horizontal => (area.x_min + (padding + cell_width) * i, area.y_min),
            };
            Area::new(x_min, x_min + cell_width, y_min, y_min + cell_height)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dimensions() {
        let a = Area::new(10.0, 110.0, 5.0, 45.0);
        assert_eq!(a.width(), 100.0);
        assert_eq!(a.height(), 40.0);
        assert_eq!(a.center_x(), 60.0);
        assert_eq!(a.center_y(), 25.0);
    }

    #[test]
    fn test_take_returns_new_area() {
        let a = Area::sized(100.0, 50.0);
        let left = a.take_left(20.0);
        assert_eq!(left.x_min, 20.0);
        assert_eq!(a.x_min, 0.0);
        assert_eq!(a.take_right(30.0).x_max, 70.0);
        assert_eq!(a.take_top(10.0).y_min, 10.0);
        assert_eq!(a.take_bottom(10.0).y_max, 40.0);
    }

    #[test]
    fn test_shrink_vertical() {
        let a = Area::sized(100.0, 20.0).shrink_vertical(0.15);
        assert!((a.y_min - 3.0).abs() < 1e-5);
        assert!((a.y_max - 17.0).abs() < 1e-5);
        assert_eq!(a.width(), 100.0);
    }

    #[test]
    fn test_to_rect() {
        let a = Area::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(a.to_rect(), Rect::new(10.0, 30.0, 10.0, 20.0));
    }

    #[test]
    fn test_tile_vertical_fits() {
        let cells = tile(&Area::sized(200.0, 100.0), 2, 50.0, 30.0, 10.0, Orientation::Vertical);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], Area::new(0.0, 200.0, 0.0, 45.0));
        assert_eq!(cells[1], Area::new(0.0, 200.0, 55.0, 100.0));
    }

    #[test]
    fn test_tile_horizontal_overflows() {
        let cells = tile(&Area::sized(100.0, 40.0), 3, 60.0, 30.0, 5.0, Orientation::Horizontal);
        assert_eq!(cells[0].width(), 60.0);
        assert_eq!(cells[2].x_min, 130.0);
        assert_eq!(cells[2].x_max, 190.0);
    }

    #[test]
    fn test_tile_offsets_from_area_origin() {
        let cells = tile(
            &Area::new(20.0, 120.0, 10.0, 110.0),
            2,
            10.0,
            10.0,
            0.0,
            Orientation::Vertical,
        );
        assert_eq!(cells[0].y_min, 10.0);
        assert_eq!(cells[1].y_min, 60.0);
        assert_eq!(cells[1].x_min, 20.0);
    }

    #[test]
    fn test_tile_empty() {
        assert!(tile(&Area::sized(10.0, 10.0), 0, 1.0, 1.0, 0.0, Orientation::Vertical).is_empty());
    }

    proptest! {
        #[test]
        fn prop_tiles_never_shrink_below_minimum(
            count in 1usize..20,
            width in 1.0f32..500.0,
            height in 1.0f32..500.0,
            min_h in 1.0f32..50.0,
            padding in 0.0f32..10.0,
        ) {
            let cells = tile(&Area::sized(width, height), count, 10.0, min_h, padding, Orientation::Vertical);
            prop_assert_eq!(cells.len(), count);
            for cell in &cells {
                prop_assert!(cell.height() >= min_h - 1e-3);
            }
        }
    }
}
