use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::layout::Rect;
use crate::core::range::RangeMarks;
use crate::error::{ChartError, ChartResult};

/// Orientation of the value axis on the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Pixel projection for one layout pass.
///
/// Values map proportionally onto the value axis; position indices map onto
/// evenly spaced slots along the unit axis, inset by a configurable margin.
/// The projection is a plain `Copy` value so geometry builders can consume
/// it without borrowing the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartProjection {
    plot: Rect,
    orientation: Orientation,
    floor: f64,
    ceiling: f64,
    positions: usize,
    inset_px: f64,
}

impl ChartProjection {
    pub fn new(
        plot: Rect,
        orientation: Orientation,
        marks: &RangeMarks,
        positions: usize,
        inset_px: f64,
    ) -> ChartResult<Self> {
        if plot.is_degenerate() {
            return Err(ChartError::InvalidData(
                "projection requires a non-degenerate plot rectangle".to_owned(),
            ));
        }
        if !marks.has_data() || marks.ticks().len() < 2 {
            return Err(ChartError::InvalidData(
                "projection requires computed range marks".to_owned(),
            ));
        }
        let floor = marks.floor();
        let ceiling = marks.ceiling();
        if !(ceiling > floor) {
            return Err(ChartError::InvalidData(
                "projection requires ceiling > floor".to_owned(),
            ));
        }
        if positions == 0 {
            return Err(ChartError::InvalidData(
                "projection requires at least one unit-axis position".to_owned(),
            ));
        }
        if !inset_px.is_finite() || inset_px < 0.0 {
            return Err(ChartError::InvalidData(
                "unit-axis inset must be finite and >= 0".to_owned(),
            ));
        }

        let projection = Self {
            plot,
            orientation,
            floor,
            ceiling,
            positions,
            inset_px,
        };
        if projection.spacing_px() <= 0.0 {
            return Err(ChartError::InvalidData(
                "unit-axis inset leaves no room for positions".to_owned(),
            ));
        }
        Ok(projection)
    }

    #[must_use]
    pub fn plot(self) -> Rect {
        self.plot
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn floor(self) -> f64 {
        self.floor
    }

    #[must_use]
    pub fn ceiling(self) -> f64 {
        self.ceiling
    }

    #[must_use]
    pub fn positions(self) -> usize {
        self.positions
    }

    #[must_use]
    pub fn value_axis_px(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.height,
            Orientation::Horizontal => self.plot.width,
        }
    }

    #[must_use]
    pub fn unit_axis_px(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.width,
            Orientation::Horizontal => self.plot.height,
        }
    }

    /// Pixels per value unit.
    #[must_use]
    pub fn scale(self) -> f64 {
        self.value_axis_px() / (self.ceiling - self.floor)
    }

    /// Pixel coordinate of the value-axis base line (the floor).
    #[must_use]
    pub fn base_px(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.bottom(),
            Orientation::Horizontal => self.plot.x,
        }
    }

    /// Slot width along the unit axis.
    #[must_use]
    pub fn spacing_px(self) -> f64 {
        (self.unit_axis_px() - 2.0 * self.inset_px) / self.positions as f64
    }

    /// Leading edge of a position slot along the unit axis.
    #[must_use]
    pub fn position_px(self, index: usize) -> f64 {
        let start = match self.orientation {
            Orientation::Vertical => self.plot.x,
            Orientation::Horizontal => self.plot.y,
        };
        start + self.inset_px + index as f64 * self.spacing_px()
    }

    /// Center of a position slot along the unit axis.
    #[must_use]
    pub fn position_center_px(self, index: usize) -> f64 {
        self.position_px(index) + self.spacing_px() / 2.0
    }

    /// Value-axis pixel coordinate for one value.
    ///
    /// Values outside the resolved floor/ceiling clamp to the boundary and
    /// emit a data-error event instead of failing the pass. A result
    /// landing exactly on the axis base line is nudged one pixel inward so
    /// the border stroke does not clip it.
    #[must_use]
    pub fn value_px(self, value: f64) -> f64 {
        let clamped = self.clamp_value(value);
        let offset = ((clamped - self.floor) * self.scale()).round();
        match self.orientation {
            Orientation::Vertical => {
                let y = self.base_px() - offset;
                if y >= self.base_px() { self.base_px() - 1.0 } else { y }
            }
            Orientation::Horizontal => {
                let x = self.base_px() + offset;
                if x <= self.base_px() { self.base_px() + 1.0 } else { x }
            }
        }
    }

    /// Full (x, y) for a value plotted at a position slot center.
    #[must_use]
    pub fn point_at(self, index: usize, value: f64) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (self.position_center_px(index), self.value_px(value)),
            Orientation::Horizontal => (self.value_px(value), self.position_center_px(index)),
        }
    }

    /// Bar rectangle from the axis base line up to `value`.
    ///
    /// `thickness_ratio` is the fraction of the slot the bar occupies,
    /// centered in the slot. A value at the floor still yields a one-pixel
    /// bar thanks to the edge nudge.
    #[must_use]
    pub fn span_to_base(self, index: usize, value: f64, thickness_ratio: f64) -> Rect {
        let (unit_start, thickness) = self.slot_span(index, thickness_ratio);
        let value_edge = self.value_px(value);
        let base = self.base_px();
        match self.orientation {
            Orientation::Vertical => {
                Rect::new(unit_start, value_edge, thickness, base - value_edge)
            }
            Orientation::Horizontal => {
                Rect::new(base, unit_start, value_edge - base, thickness)
            }
        }
    }

    /// Bar rectangle between two values, at least one pixel thick along the
    /// value axis.
    #[must_use]
    pub fn value_span_rect(
        self,
        index: usize,
        value_from: f64,
        value_to: f64,
        thickness_ratio: f64,
    ) -> Rect {
        let (unit_start, thickness) = self.slot_span(index, thickness_ratio);
        let a = self.value_px(value_from);
        let b = self.value_px(value_to);
        let near = a.min(b);
        let extent = (a - b).abs().max(1.0);
        match self.orientation {
            Orientation::Vertical => Rect::new(unit_start, near, thickness, extent),
            Orientation::Horizontal => Rect::new(near, unit_start, extent, thickness),
        }
    }

    fn slot_span(self, index: usize, thickness_ratio: f64) -> (f64, f64) {
        let spacing = self.spacing_px();
        let thickness = (spacing * thickness_ratio.clamp(0.0, 1.0)).max(1.0);
        let start = self.position_px(index) + (spacing - thickness) / 2.0;
        (start, thickness)
    }

    fn clamp_value(self, value: f64) -> f64 {
        if value.is_nan() {
            // Builders skip NaN before projecting; treat a stray NaN as floor.
            warn!(
                floor = self.floor,
                ceiling = self.ceiling,
                "NaN reached value projection; substituting floor"
            );
            return self.floor;
        }
        if value < self.floor {
            warn!(
                value,
                floor = self.floor,
                ceiling = self.ceiling,
                "value below axis floor; clamped"
            );
            self.floor
        } else if value > self.ceiling {
            warn!(
                value,
                floor = self.floor,
                ceiling = self.ceiling,
                "value above axis ceiling; clamped"
            );
            self.ceiling
        } else {
            value
        }
    }
}
