use serde::{Deserialize, Serialize};

use crate::core::projection::{ChartProjection, Orientation};
use crate::core::types::DataPoint;

/// Filled polygon for one gap-free run of samples, closed down to the axis
/// base line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaPolygon {
    pub vertices: Vec<(f64, f64)>,
}

/// Projects a series into one fill polygon per NaN-free run.
///
/// Each polygon walks the base line under the first sample, up across every
/// plotted point, and back down to the base line under the last sample of
/// the run.
#[must_use]
pub fn project_area(points: &[DataPoint], projection: ChartProjection) -> Vec<AreaPolygon> {
    let mut polygons = Vec::new();
    let mut run: Vec<(usize, (f64, f64))> = Vec::new();

    for (index, point) in points.iter().enumerate() {
        if point.value.is_missing() {
            flush_run(&mut polygons, &mut run, projection);
            continue;
        }
        run.push((index, projection.point_at(index, point.value.effective())));
    }
    flush_run(&mut polygons, &mut run, projection);

    polygons
}

fn flush_run(
    polygons: &mut Vec<AreaPolygon>,
    run: &mut Vec<(usize, (f64, f64))>,
    projection: ChartProjection,
) {
    if run.is_empty() {
        return;
    }

    let first_index = run[0].0;
    let last_index = run[run.len() - 1].0;
    let mut vertices = Vec::with_capacity(run.len() + 2);
    vertices.push(base_vertex(projection, first_index));
    vertices.extend(run.iter().map(|(_, point)| *point));
    vertices.push(base_vertex(projection, last_index));

    polygons.push(AreaPolygon { vertices });
    run.clear();
}

fn base_vertex(projection: ChartProjection, index: usize) -> (f64, f64) {
    match projection.orientation() {
        Orientation::Vertical => (projection.position_center_px(index), projection.base_px()),
        Orientation::Horizontal => (projection.base_px(), projection.position_center_px(index)),
    }
}
