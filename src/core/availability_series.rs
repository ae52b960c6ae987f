use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::layout::Rect;
use crate::core::projection::{ChartProjection, Orientation};
use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Color band assigned to an availability ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityBand {
    Up,
    Degraded,
    Down,
}

impl AvailabilityBand {
    /// Ratio is expected in `[0, 1]` (the fixed availability domain).
    #[must_use]
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= 0.999 {
            Self::Up
        } else if ratio <= 0.001 {
            Self::Down
        } else {
            Self::Degraded
        }
    }
}

/// Full-height availability cell for one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySegment {
    pub position: usize,
    pub ratio: f64,
    pub band: AvailabilityBand,
    pub rect: Rect,
}

/// Projects availability ratios into full-height colored cells.
///
/// The caller builds the projection over the fixed `[0, 1]` domain. Ratios
/// outside that domain clamp to the boundary and log a data error, in line
/// with the value-projection clamping rule.
pub fn project_availability(
    points: &[DataPoint],
    projection: ChartProjection,
    thickness_ratio: f64,
) -> ChartResult<Vec<AvailabilitySegment>> {
    if !thickness_ratio.is_finite() || thickness_ratio <= 0.0 || thickness_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "cell thickness ratio must be finite and in (0, 1]".to_owned(),
        ));
    }

    let mut out = Vec::with_capacity(points.len());
    for (position, point) in points.iter().enumerate() {
        if point.value.is_missing() {
            continue;
        }

        let raw = point.value.effective();
        let ratio = if (0.0..=1.0).contains(&raw) {
            raw
        } else {
            warn!(ratio = raw, "availability ratio outside [0, 1]; clamped");
            raw.clamp(0.0, 1.0)
        };

        out.push(AvailabilitySegment {
            position,
            ratio,
            band: AvailabilityBand::for_ratio(ratio),
            rect: full_height_cell(projection, position, thickness_ratio),
        });
    }
    Ok(out)
}

/// Cell covering the whole value axis, unaffected by the base-line nudge.
fn full_height_cell(projection: ChartProjection, position: usize, thickness_ratio: f64) -> Rect {
    let plot = projection.plot();
    let spacing = projection.spacing_px();
    let thickness = (spacing * thickness_ratio).max(1.0);
    let start = projection.position_px(position) + (spacing - thickness) / 2.0;
    match projection.orientation() {
        Orientation::Vertical => Rect::new(start, plot.y, thickness, plot.height),
        Orientation::Horizontal => Rect::new(plot.x, start, plot.width, thickness),
    }
}
