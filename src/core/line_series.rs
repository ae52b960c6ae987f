use serde::{Deserialize, Serialize};

use crate::core::projection::ChartProjection;
use crate::core::types::DataPoint;

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects a series into adjacent line segments.
///
/// NaN samples break the polyline: no segment is emitted into or out of a
/// missing position. The function is deterministic and side-effect free so
/// both rendering and tests consume the exact same geometry.
#[must_use]
pub fn project_polyline(points: &[DataPoint], projection: ChartProjection) -> Vec<LineSegment> {
    let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
    let mut previous: Option<(f64, f64)> = None;

    for (index, point) in points.iter().enumerate() {
        if point.value.is_missing() {
            previous = None;
            continue;
        }

        let current = projection.point_at(index, point.value.effective());
        if let Some((x1, y1)) = previous {
            segments.push(LineSegment {
                x1,
                y1,
                x2: current.0,
                y2: current.1,
            });
        }
        previous = Some(current);
    }

    segments
}
