use serde::{Deserialize, Serialize};

use crate::core::projection::Orientation;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Axis-aligned pixel rectangle, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        self.y + self.height / 2.0
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Gap between stacked text strips.
const STRIP_GAP_PX: f64 = 4.0;

/// Sizing inputs resolved by the chart assembly before layout runs.
///
/// Widths for the label gutters are pre-measured by the caller (widest
/// formatted tick, widest time label) so layout itself stays free of font
/// metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub orientation: Orientation,
    pub font_size_px: f64,
    pub title_font_size_px: f64,
    pub show_top_title: bool,
    pub show_bottom_title: bool,
    pub top_legend_rows: usize,
    pub bottom_legend_rows: usize,
    pub value_label_width_px: f64,
    pub unit_label_width_px: f64,
    pub tick_length_px: f64,
    pub border_width_px: f64,
    pub margin_px: f64,
}

impl LayoutSpec {
    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.font_size_px, "font_size_px"),
            (self.title_font_size_px, "title_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.value_label_width_px, "value_label_width_px"),
            (self.unit_label_width_px, "unit_label_width_px"),
            (self.tick_length_px, "tick_length_px"),
            (self.border_width_px, "border_width_px"),
            (self.margin_px, "margin_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    fn line_height_px(self) -> f64 {
        self.font_size_px + STRIP_GAP_PX
    }
}

/// Resolved split of the raster into plot interior, gutters, and strips.
///
/// Every reservation is subtracted from the requested image dimensions; the
/// plot rectangle is whatever remains inside the border stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub image: Rect,
    pub plot: Rect,
    pub top_title: Option<Rect>,
    pub bottom_title: Option<Rect>,
    pub top_legend: Option<Rect>,
    pub bottom_legend: Option<Rect>,
    /// Gutter holding value-axis tick labels (left when vertical, bottom
    /// when horizontal).
    pub value_gutter: Rect,
    /// Gutter holding unit-axis labels (bottom when vertical, left when
    /// horizontal).
    pub unit_gutter: Rect,
}

impl ChartLayout {
    pub fn compute(viewport: Viewport, spec: &LayoutSpec) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let spec = spec.validate()?;

        let image = Rect::new(0.0, 0.0, f64::from(viewport.width), f64::from(viewport.height));
        let line_height = spec.line_height_px();
        let title_height = spec.title_font_size_px + STRIP_GAP_PX;

        let mut top = spec.margin_px;
        let mut bottom = image.height - spec.margin_px;
        let left = spec.margin_px;
        let right = image.width - spec.margin_px;
        let inner_width = right - left;

        let top_title = spec.show_top_title.then(|| {
            let rect = Rect::new(left, top, inner_width, title_height);
            top += title_height;
            rect
        });

        let top_legend = (spec.top_legend_rows > 0).then(|| {
            let height = spec.top_legend_rows as f64 * line_height + STRIP_GAP_PX;
            let rect = Rect::new(left, top, inner_width, height);
            top += height;
            rect
        });

        let bottom_title = spec.show_bottom_title.then(|| {
            bottom -= title_height;
            Rect::new(left, bottom, inner_width, title_height)
        });

        let bottom_legend = (spec.bottom_legend_rows > 0).then(|| {
            let height = spec.bottom_legend_rows as f64 * line_height + STRIP_GAP_PX;
            bottom -= height;
            Rect::new(left, bottom, inner_width, height)
        });

        // Axis label gutters depend on which axis runs along which edge.
        let (left_gutter_width, bottom_gutter_height) = match spec.orientation {
            // Value ticks on the left, potentially two-line time labels at
            // the bottom.
            Orientation::Vertical => (
                spec.value_label_width_px + spec.tick_length_px,
                2.0 * line_height + spec.tick_length_px,
            ),
            // Time labels on the left, single-line value ticks at the bottom.
            Orientation::Horizontal => (
                spec.unit_label_width_px + spec.tick_length_px,
                line_height + spec.tick_length_px,
            ),
        };

        let plot = Rect::new(
            left + left_gutter_width + spec.border_width_px,
            top + spec.border_width_px,
            right - (left + left_gutter_width) - 2.0 * spec.border_width_px,
            (bottom - bottom_gutter_height) - top - 2.0 * spec.border_width_px,
        );
        if plot.is_degenerate() {
            return Err(ChartError::InvalidData(format!(
                "layout leaves no plottable interior ({}x{} after reservations)",
                plot.width, plot.height
            )));
        }

        let left_gutter = Rect::new(left, plot.y, left_gutter_width, plot.height);
        let bottom_gutter = Rect::new(plot.x, plot.bottom(), plot.width, bottom_gutter_height);
        let (value_gutter, unit_gutter) = match spec.orientation {
            Orientation::Vertical => (left_gutter, bottom_gutter),
            Orientation::Horizontal => (bottom_gutter, left_gutter),
        };

        Ok(Self {
            image,
            plot,
            top_title,
            bottom_title,
            top_legend,
            bottom_legend,
            value_gutter,
            unit_gutter,
        })
    }
}

/// Statistic marker label (peak/average/low/baseline) with its resolved
/// bounding box. `x`/`y` anchor the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl MarkerLabel {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width_px, self.height_px)
    }
}

/// Collision avoidance for statistic marker labels.
///
/// Labels are checked in emission order; a label whose box intersects any
/// earlier label's box is shifted left by its own width plus one character
/// width. One shift per conflicting pair, no second pass.
pub fn resolve_marker_label_collisions(labels: &mut [MarkerLabel], char_width_px: f64) {
    for current in 1..labels.len() {
        for earlier in 0..current {
            if labels[current].bounds().intersects(labels[earlier].bounds()) {
                labels[current].x -= labels[current].width_px + char_width_px;
            }
        }
    }
}
