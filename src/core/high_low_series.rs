use serde::{Deserialize, Serialize};

use crate::core::layout::Rect;
use crate::core::line_series::LineSegment;
use crate::core::projection::{ChartProjection, Orientation};
use crate::core::types::{DataPoint, SampleValue};
use crate::error::{ChartError, ChartResult};

/// Projected high/low bar with its close-value tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighLowGeometry {
    pub position: usize,
    pub bar: Rect,
    pub close_tick: LineSegment,
}

/// Projects a series of bounded samples into high/low bars.
///
/// Plain scalars degenerate to a one-pixel bar at the value. A NaN bound
/// falls back to the sample value so a partially observed window still
/// renders.
pub fn project_high_low(
    points: &[DataPoint],
    projection: ChartProjection,
    thickness_ratio: f64,
) -> ChartResult<Vec<HighLowGeometry>> {
    if !thickness_ratio.is_finite() || thickness_ratio <= 0.0 || thickness_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "bar thickness ratio must be finite and in (0, 1]".to_owned(),
        ));
    }

    let mut out = Vec::with_capacity(points.len());
    for (position, point) in points.iter().enumerate() {
        if point.value.is_missing() {
            continue;
        }

        let value = point.value.effective();
        let (high, low) = match &point.value {
            SampleValue::HighLow { high, low, .. } => (
                if high.is_nan() { value } else { *high },
                if low.is_nan() { value } else { *low },
            ),
            _ => (value, value),
        };

        let bar = projection.value_span_rect(position, low, high, thickness_ratio);
        let close = projection.value_px(value);
        let close_tick = match projection.orientation() {
            Orientation::Vertical => LineSegment {
                x1: bar.x,
                y1: close,
                x2: bar.right(),
                y2: close,
            },
            Orientation::Horizontal => LineSegment {
                x1: close,
                y1: bar.y,
                x2: close,
                y2: bar.bottom(),
            },
        };

        out.push(HighLowGeometry {
            position,
            bar,
            close_tick,
        });
    }
    Ok(out)
}
