use serde::{Deserialize, Serialize};

use crate::core::layout::Rect;
use crate::core::projection::ChartProjection;
use crate::core::types::{DataPoint, SampleValue};
use crate::error::{ChartError, ChartResult};

/// One painted slice of a stacked column.
///
/// `segment` is the index within the point's original segment order so
/// colors stay stable across render passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedSlice {
    pub position: usize,
    pub segment: usize,
    pub value: f64,
    pub rect: Rect,
}

/// Projects stacked samples into baseline-anchored slices in painter order.
///
/// Slices of one stack are emitted largest-first so smaller segments paint
/// on top and every segment stays visible; the stack's visual top therefore
/// equals the point's effective value (its largest segment). Non-stacked
/// samples project as a single slice.
pub fn project_stacked(
    points: &[DataPoint],
    projection: ChartProjection,
    thickness_ratio: f64,
) -> ChartResult<Vec<StackedSlice>> {
    if !thickness_ratio.is_finite() || thickness_ratio <= 0.0 || thickness_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "stack thickness ratio must be finite and in (0, 1]".to_owned(),
        ));
    }

    let mut out = Vec::new();
    for (position, point) in points.iter().enumerate() {
        if point.value.is_missing() {
            continue;
        }

        let mut slices: Vec<(usize, f64)> = match &point.value {
            SampleValue::Stacked(segments) => segments
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, value)| !value.is_nan())
                .collect(),
            other => vec![(0, other.effective())],
        };
        // Painter order: largest first, original order as the tie-breaker.
        slices.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        for (segment, value) in slices {
            out.push(StackedSlice {
                position,
                segment,
                value,
                rect: projection.span_to_base(position, value, thickness_ratio),
            });
        }
    }
    Ok(out)
}
