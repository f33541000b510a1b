//! The data bar renderer.
//!
//! Each [`DataBarVisual::update`] clears the canvas, maps the data view,
//! lays out one cell per category and paints every bar. Any failure during
//! the pass replaces the output with a single placeholder bar whose tooltip
//! carries the message.

use crate::bar_data::{BarData, BarDataTransform};
use crate::bar_geometry::{BarGeometry, StatusKind};
use crate::data_view::DataView;
use crate::error::RenderError;
use crate::field::{Field, BLANK_TEXT};
use crate::layout::{tile, Area};
use crate::selection::{SelectionId, SelectionManager, ToggleSelectionManager};
use crate::settings::{LabelPosition, LineStyle, ResolvedSettings, TextPosition, VisualSettings};
use crate::tooltip::{bar_tooltip, status_tooltip, TooltipItem};
use crate::transform::visual_transform;
use databar_core::{
    BoxStyle, Canvas, Color, EstimatedTextMeasurer, Point, Rect, Size, StrokeStyle,
    TextMeasurer, TextStyle,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Space between a bar and the labels below it.
const TEXT_MARGIN: f32 = 2.0;
/// Horizontal offset of the value label from the bar's left edge.
const VALUE_TEXT_INSET: f32 = 3.0;
/// Fraction of the target-line area cut from the bar's top and bottom.
const BAR_INSET: f32 = 0.15;
/// Extra room around the widest category label in multi-bar layouts.
const CATEGORY_PADDING: f32 = 5.0;
/// Gap between the bottom header and the canvas edge.
const HEADER_BOTTOM_PADDING: f32 = 5.0;
/// Opacity of fill bars that are not part of an active selection.
const DIMMED_OPACITY: f32 = 0.2;
/// Target line dash pattern.
const DASH: [f32; 2] = [2.0, 2.0];

/// A painted bar's bounds with what a host needs for hover and click.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitRegion {
    /// Cell bounds
    pub bounds: Rect,
    /// Tooltip lines
    pub tooltip: Vec<TooltipItem>,
    /// Selection identity, if the bar belongs to a category
    pub selection_id: Option<SelectionId>,
    /// Status classification
    pub status: StatusKind,
    /// Fill and target line percentages
    pub geometry: BarGeometry,
}

/// Renders data bars onto a [`Canvas`].
pub struct DataBarVisual {
    measurer: Box<dyn TextMeasurer>,
    selection: Box<dyn SelectionManager>,
    settings: VisualSettings,
    last_update: Option<(DataView, Size)>,
    hit_regions: Vec<HitRegion>,
}

impl std::fmt::Debug for DataBarVisual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataBarVisual")
            .field("settings", &self.settings)
            .field("hit_regions", &self.hit_regions.len())
            .finish_non_exhaustive()
    }
}

impl Default for DataBarVisual {
    fn default() -> Self {
        Self::new()
    }
}

impl DataBarVisual {
    /// Create a renderer with estimated text metrics and toggle selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            measurer: Box::new(EstimatedTextMeasurer),
            selection: Box::new(ToggleSelectionManager::new()),
            settings: VisualSettings::default(),
            last_update: None,
            hit_regions: Vec::new(),
        }
    }

    /// Replace the text measurer.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    /// Replace the selection manager.
    #[must_use]
    pub fn with_selection_manager(mut self, manager: impl SelectionManager + 'static) -> Self {
        self.selection = Box::new(manager);
        self
    }

    /// Settings from the last update.
    #[must_use]
    pub fn settings(&self) -> &VisualSettings {
        &self.settings
    }

    /// Regions painted by the last update.
    #[must_use]
    pub fn hit_regions(&self) -> &[HitRegion] {
        &self.hit_regions
    }

    /// Currently selected ids.
    #[must_use]
    pub fn selected(&self) -> &[SelectionId] {
        self.selection.selected()
    }

    /// Render `view` into a `viewport`-sized area of `canvas`.
    pub fn update(
        &mut self,
        view: &DataView,
        settings: &VisualSettings,
        viewport: Size,
        canvas: &mut dyn Canvas,
    ) {
        self.settings = settings.clone();
        self.last_update = Some((view.clone(), viewport));
        self.repaint(view, viewport, canvas);
    }

    /// Tooltip of the bar under `point`.
    #[must_use]
    pub fn tooltip_at(&self, point: Point) -> Option<&[TooltipItem]> {
        self.region_at(point).map(|r| r.tooltip.as_slice())
    }

    /// Handle a click: select the bar under `point`, or clear the selection
    /// when the click misses every bar. The last update is repainted so the
    /// dimming reflects the new selection.
    pub fn click(&mut self, point: Point, multi_select: bool, canvas: &mut dyn Canvas) -> Vec<SelectionId> {
        let target = self
            .region_at(point)
            .and_then(|r| r.selection_id.clone());
        let selected = match target {
            Some(id) => self.selection.select(&id, multi_select),
            None => {
                self.selection.clear();
                Vec::new()
            }
        };
        debug!(selected = selected.len(), "selection changed");

        if let Some((view, viewport)) = self.last_update.take() {
            self.repaint(&view, viewport, canvas);
            self.last_update = Some((view, viewport));
        }
        selected
    }

    fn region_at(&self, point: Point) -> Option<&HitRegion> {
        self.hit_regions
            .iter()
            .find(|r| r.bounds.contains_point(&point))
    }

    fn repaint(&mut self, view: &DataView, viewport: Size, canvas: &mut dyn Canvas) {
        canvas.clear();
        let full = Area::sized(viewport.width, viewport.height);

        let regions = match ResolvedSettings::resolve(&self.settings) {
            Ok(resolved) => {
                let mut frame = Frame::new(&*self.measurer, &*self.selection, &resolved, canvas);
                frame.render(view, full);
                Ok(frame.regions)
            }
            Err(err) => Err(err),
        };

        self.hit_regions = regions.unwrap_or_else(|err| self.error_path(&err, full, canvas));
    }

    fn error_path(&self, err: &RenderError, full: Area, canvas: &mut dyn Canvas) -> Vec<HitRegion> {
        warn!(error = %err, "render failed, drawing placeholder");
        canvas.clear();
        let fallback = ResolvedSettings::fallback(&self.settings);
        let mut frame = Frame::new(&*self.measurer, &*self.selection, &fallback, canvas);
        frame.placeholder(full, &err.to_string());
        frame.regions
    }
}

/// Outcome of painting one bar.
struct Painted {
    status: StatusKind,
    geometry: BarGeometry,
}

/// One render pass.
struct Frame<'a> {
    measurer: &'a dyn TextMeasurer,
    selection: &'a dyn SelectionManager,
    settings: &'a ResolvedSettings,
    canvas: &'a mut dyn Canvas,
    regions: Vec<HitRegion>,
}

impl<'a> Frame<'a> {
    fn new(
        measurer: &'a dyn TextMeasurer,
        selection: &'a dyn SelectionManager,
        settings: &'a ResolvedSettings,
        canvas: &'a mut dyn Canvas,
    ) -> Self {
        Self {
            measurer,
            selection,
            settings,
            canvas,
            regions: Vec::new(),
        }
    }

    fn measure(&self, text: &str, size: f32) -> Size {
        self.measurer.measure(text, &TextStyle::sized(size))
    }

    fn label(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let style = TextStyle::sized(size).with_color(color);
        self.canvas.draw_text(text, Point::new(x, y), &style);
    }

    fn render(&mut self, view: &DataView, full: Area) {
        let area = self.header(full);

        let mut bars = match visual_transform(view) {
            BarDataTransform::Bars(bars) => bars,
            BarDataTransform::Status(message) => {
                debug!(%message, "data view not renderable");
                self.placeholder(area, &message);
                return;
            }
        };

        let text = self.settings.text();
        for bar in &mut bars {
            bar.apply_display_units(
                text.display_units,
                text.display_units_for_value,
                text.display_units_for_max,
            );
        }
        debug!(bars = bars.len(), width = area.width(), height = area.height(), "rendering");

        if bars.len() > 1 {
            self.render_multi(&bars, area);
        } else if let Some(bar) = bars.first() {
            self.render_single(bar, area);
        }
    }

    fn header(&mut self, area: Area) -> Area {
        let settings = self.settings;
        let header = &settings.raw.header;
        if !header.show {
            return area;
        }
        let size = self.measure(&header.value, header.font_size);
        let (w, h) = (size.width, size.height);
        let margin = header.margin_between;

        self.canvas.begin_group("headerTextG");
        let remaining = match settings.header_position {
            LabelPosition::Left => {
                self.label(&header.value, area.x_min, area.center_y() + h / 4.0, header.font_size, Color::BLACK);
                area.take_left(w + margin)
            }
            LabelPosition::Top => {
                self.label(&header.value, area.center_x() - w / 2.0, area.y_min + h, header.font_size, Color::BLACK);
                area.take_top(h + margin)
            }
            LabelPosition::Right => {
                self.label(&header.value, area.x_max - w, area.center_y() + h / 4.0, header.font_size, Color::BLACK);
                area.take_right(w + margin)
            }
            LabelPosition::Bottom => {
                self.label(
                    &header.value,
                    area.center_x() - w / 2.0,
                    area.y_max - HEADER_BOTTOM_PADDING,
                    header.font_size,
                    Color::BLACK,
                );
                area.take_bottom(h + margin)
            }
        };
        self.canvas.end_group();
        remaining
    }

    fn render_single(&mut self, bar: &BarData, area: Area) {
        self.canvas.begin_group("barVisual");
        let square = match &bar.category {
            Some(category) => {
                let size = self.measure(category, self.settings.raw.section.font_size);
                self.place_category(category, area, size)
            }
            None => area,
        };
        self.finish_bar(bar, area, square);
        self.canvas.end_group();
    }

    fn render_multi(&mut self, bars: &[BarData], area: Area) {
        let settings = self.settings;
        let text = settings.text();
        let section = &settings.raw.section;
        let items = &settings.raw.items;

        let widest = widest_field(bars)
            .map(|f| f.to_display_string(true, true, text.blank_override()))
            .unwrap_or_default();
        let value_size = self.measure(&widest, text.font_size);

        let category_size = bars
            .iter()
            .filter_map(|b| b.category.as_deref())
            .max_by_key(|c| c.chars().count())
            .map(|c| {
                let s = self.measure(c, section.font_size);
                Size::new(s.width + CATEGORY_PADDING, s.height + CATEGORY_PADDING)
            });

        let mut cell_width = (value_size.width * 2.0).max(items.min_width);
        let mut cell_height = value_size.height + items.min_height;
        if let Some(cat) = category_size {
            match settings.section_position {
                LabelPosition::Left | LabelPosition::Right => {
                    cell_width += cat.width + section.margin_between;
                }
                LabelPosition::Top | LabelPosition::Bottom => {
                    cell_height += cat.height + section.margin_between;
                    cell_width = cell_width.max(cat.width);
                }
            }
        }

        let cells = tile(
            &area,
            bars.len(),
            cell_width,
            cell_height,
            items.padding,
            settings.orientation,
        );
        for (bar, cell) in bars.iter().zip(cells) {
            self.canvas.begin_group("barVisual");
            let square = match (&bar.category, category_size) {
                (Some(category), Some(size)) => self.place_category(category, cell, size),
                _ => cell,
            };
            self.finish_bar(bar, cell, square);
            self.canvas.end_group();
        }
    }

    /// Draw a category label sized `extent` on the configured side of `cell`
    /// and return what is left for the bar.
    fn place_category(&mut self, category: &str, cell: Area, extent: Size) -> Area {
        let settings = self.settings;
        let section = &settings.raw.section;
        let (size, margin, color) = (section.font_size, section.margin_between, settings.section_color);
        let (w, h) = (extent.width, extent.height);

        match settings.section_position {
            LabelPosition::Left => {
                self.label(category, cell.x_min, cell.center_y() + h / 4.0, size, color);
                cell.take_left(w + margin)
            }
            LabelPosition::Right => {
                self.label(category, cell.x_max - w, cell.center_y() + h / 4.0, size, color);
                cell.take_right(w + margin)
            }
            LabelPosition::Top => {
                self.label(category, cell.center_x() - w / 2.0, cell.y_min + h, size, color);
                cell.take_top(h + margin)
            }
            LabelPosition::Bottom => {
                self.label(category, cell.center_x() - w / 2.0, cell.y_max, size, color);
                cell.take_bottom(h + margin)
            }
        }
    }

    fn finish_bar(&mut self, bar: &BarData, cell: Area, square: Area) {
        let painted = self.paint_bar(bar, square);
        let tooltip = match &bar.status_message {
            Some(message) => status_tooltip(message),
            None => bar_tooltip(bar, self.settings.text()),
        };
        self.regions.push(HitRegion {
            bounds: cell.to_rect(),
            tooltip,
            selection_id: bar.selection_id.clone(),
            status: painted.status,
            geometry: painted.geometry,
        });
    }

    /// A blank bar over `area` whose tooltip carries `message`.
    fn placeholder(&mut self, area: Area, message: &str) {
        self.canvas.begin_group("barVisual");
        self.finish_bar(&BarData::with_status(message), area, area);
        self.canvas.end_group();
    }

    fn paint_bar(&mut self, bar: &BarData, area: Area) -> Painted {
        if bar.is_blank() {
            self.paint_blank(area);
            return Painted {
                status: StatusKind::NoTarget,
                geometry: BarGeometry::default(),
            };
        }

        let settings = self.settings;
        let text = settings.text();
        let blank = text.blank_override();
        let geometry = BarGeometry::for_bar(bar);
        let status = StatusKind::derive(bar);
        let bar_color = status.bar_color(&settings.colors);

        let value_text = text
            .show_value_text
            .then(|| bar.value.to_display_string(true, true, blank));
        let max_text = bar
            .max
            .as_ref()
            .filter(|_| text.show_max_text)
            .map(|m| m.to_display_string(true, true, blank));
        let value_size = value_text.as_deref().map(|t| self.measure(t, text.font_size));
        let max_size = max_text.as_deref().map(|t| self.measure(t, text.font_size));

        let mut area = area;
        if settings.text_position == TextPosition::Below {
            let y = area.y_max - TEXT_MARGIN;
            if let Some(t) = &value_text {
                self.label(t, area.x_min + VALUE_TEXT_INSET, y, text.font_size, bar_color);
            }
            if let (Some(t), Some(size)) = (&max_text, max_size) {
                self.label(t, area.x_max - size.width, y, text.font_size, Color::BLACK);
            }
            let tallest = value_size
                .map_or(0.0, |s| s.height)
                .max(max_size.map_or(0.0, |s| s.height));
            area = area.take_bottom(TEXT_MARGIN + tallest);
        }

        let line_area = area;
        let bar_area = area.shrink_vertical(BAR_INSET);
        let has_reference = bar.target.is_some() || bar.max.is_some();

        let outer_fill = if !has_reference && settings.raw.outer_bar.fill_when_no_target {
            settings.colors.no_target_fill
        } else {
            settings.outer_fill
        };
        self.canvas.draw_rect(
            bar_area.to_rect(),
            &BoxStyle::fill(outer_fill).with_stroke(StrokeStyle::solid(settings.outline_color, 1.0)),
        );

        if has_reference {
            let dimmed = self.selection.has_selection()
                && !bar
                    .selection_id
                    .as_ref()
                    .is_some_and(|id| self.selection.is_selected(id));
            let fill = if dimmed {
                bar_color.with_alpha(DIMMED_OPACITY)
            } else {
                bar_color
            };
            let width = bar_area.width() * geometry.fill_fraction();
            self.canvas.draw_rect(
                Rect::new(bar_area.x_min, bar_area.y_min, width, bar_area.height()),
                &BoxStyle::fill(fill),
            );
        }

        if bar.target.is_some() {
            let x = bar_area.x_min + bar_area.width() * geometry.line_fraction();
            let line = &settings.raw.target_line;
            let stroke = match settings.line_style {
                LineStyle::Dashed => {
                    StrokeStyle::dashed(settings.target_line_color, line.stroke_width, &DASH)
                }
                LineStyle::Solid => StrokeStyle::solid(settings.target_line_color, line.stroke_width),
            };
            self.canvas.draw_line(
                Point::new(x, line_area.y_min),
                Point::new(x, line_area.y_max),
                &stroke,
            );
        }

        if settings.text_position == TextPosition::OnBar {
            let center = bar_area.center_y();
            if let (Some(t), Some(size)) = (&value_text, value_size) {
                self.label(t, bar_area.x_min + VALUE_TEXT_INSET, center + size.height / 4.0, text.font_size, Color::BLACK);
            }
            if let (Some(t), Some(size)) = (&max_text, max_size) {
                self.label(t, bar_area.x_max - size.width, center + size.height / 4.0, text.font_size, Color::BLACK);
            }
        }

        debug!(?status, fill = geometry.fill_percent, line = geometry.line_percent, "painted bar");
        Painted { status, geometry }
    }

    fn paint_blank(&mut self, area: Area) {
        let settings = self.settings;
        let font_size = settings.text().font_size;
        let size = self.measure(BLANK_TEXT, font_size);
        let color = StatusKind::NoTarget.font_color(&settings.colors);
        self.label(BLANK_TEXT, area.x_min + VALUE_TEXT_INSET, area.y_max, font_size, color);

        let bar_area = area.take_bottom(TEXT_MARGIN + size.height);
        self.canvas.draw_rect(
            bar_area.to_rect(),
            &BoxStyle::fill(settings.colors.no_target_fill)
                .with_stroke(StrokeStyle::solid(settings.outline_color, 1.0)),
        );
    }
}

/// The field with the greatest value across every bar's largest field.
fn widest_field(bars: &[BarData]) -> Option<&Field> {
    bars.iter()
        .map(BarData::largest)
        .reduce(|best, candidate| match (best.value, candidate.value) {
            (Some(b), Some(v)) if b < v => candidate,
            (None, Some(_)) => candidate,
            _ => best,
        })
}
