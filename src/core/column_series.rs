use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::layout::Rect;
use crate::core::projection::{ChartProjection, Orientation};
use crate::core::types::DataPointCollection;
use crate::error::{ChartError, ChartResult};

/// Projected column in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    pub series: usize,
    pub position: usize,
    pub rect: Rect,
}

/// Projects clustered columns for one or more series.
///
/// Each unit-axis slot holds one cluster; the cluster occupies
/// `cluster_fill_ratio` of the slot and is divided evenly between series.
/// Missing samples leave a hole in the cluster. Bars rise from the axis
/// base line, so a value at the floor still produces a one-pixel bar.
pub fn project_columns(
    collections: &[&DataPointCollection],
    projection: ChartProjection,
    cluster_fill_ratio: f64,
) -> ChartResult<Vec<ColumnGeometry>> {
    if !cluster_fill_ratio.is_finite() || cluster_fill_ratio <= 0.0 || cluster_fill_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "cluster fill ratio must be finite and in (0, 1]".to_owned(),
        ));
    }
    if collections.is_empty() {
        return Ok(Vec::new());
    }

    // Wide multi-series datasets fan out per position; the optional
    // parallel path keeps output byte-identical to the sequential one.
    #[cfg(feature = "parallel-projection")]
    {
        let clusters: Vec<Vec<ColumnGeometry>> = (0..projection.positions())
            .into_par_iter()
            .map(|position| cluster_at(position, collections, projection, cluster_fill_ratio))
            .collect();
        Ok(clusters.into_iter().flatten().collect())
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        let mut out = Vec::new();
        for position in 0..projection.positions() {
            out.extend(cluster_at(
                position,
                collections,
                projection,
                cluster_fill_ratio,
            ));
        }
        Ok(out)
    }
}

fn cluster_at(
    position: usize,
    collections: &[&DataPointCollection],
    projection: ChartProjection,
    cluster_fill_ratio: f64,
) -> Vec<ColumnGeometry> {
    let spacing = projection.spacing_px();
    let cluster_width = spacing * cluster_fill_ratio;
    let bar_width = (cluster_width / collections.len() as f64).max(1.0);
    let cluster_start = projection.position_px(position) + (spacing - cluster_width) / 2.0;

    let mut bars = Vec::new();
    for (series, collection) in collections.iter().enumerate() {
        let Some(point) = collection.points.get(position) else {
            continue;
        };
        if point.value.is_missing() {
            continue;
        }

        let unit_start = cluster_start + series as f64 * bar_width;
        let value_edge = projection.value_px(point.value.effective());
        let base = projection.base_px();
        let rect = match projection.orientation() {
            Orientation::Vertical => {
                Rect::new(unit_start, value_edge, bar_width, base - value_edge)
            }
            Orientation::Horizontal => {
                Rect::new(base, unit_start, value_edge - base, bar_width)
            }
        };
        bars.push(ColumnGeometry {
            series,
            position,
            rect,
        });
    }
    bars
}
