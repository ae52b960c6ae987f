use metric_charts::core::{
    ChartProjection, DataPoint, Orientation, RangeMarks, Rect, project_area, project_polyline,
};

fn projection(positions: usize) -> ChartProjection {
    ChartProjection::new(
        Rect::new(0.0, 0.0, 400.0, 200.0),
        Orientation::Vertical,
        &RangeMarks::fixed(0.0, 100.0, 11).expect("marks"),
        positions,
        0.0,
    )
    .expect("projection")
}

fn scalars(values: &[f64]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| DataPoint::scalar(index as f64 * 60.0, *value))
        .collect()
}

#[test]
fn polyline_connects_adjacent_samples() {
    let points = scalars(&[10.0, 20.0, 30.0]);
    let segments = project_polyline(&points, projection(3));

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].x2, segments[1].x1);
    assert_eq!(segments[0].y2, segments[1].y1);
    // Rising values move up the inverted y axis.
    assert!(segments[0].y2 < segments[0].y1);
}

#[test]
fn nan_sample_breaks_the_polyline() {
    let points = scalars(&[10.0, f64::NAN, 30.0, 40.0]);
    let segments = project_polyline(&points, projection(4));

    // Only the 30->40 link survives.
    assert_eq!(segments.len(), 1);
}

#[test]
fn fewer_than_two_samples_yield_no_segments() {
    let points = scalars(&[10.0]);
    assert!(project_polyline(&points, projection(1)).is_empty());
}

#[test]
fn area_polygon_closes_down_to_the_base_line() {
    let points = scalars(&[10.0, 20.0, 30.0]);
    let polygons = project_area(&points, projection(3));

    assert_eq!(polygons.len(), 1);
    let vertices = &polygons[0].vertices;
    assert_eq!(vertices.len(), 5);
    // First and last vertices sit on the base line under the run's ends.
    assert_eq!(vertices[0].1, 200.0);
    assert_eq!(vertices[4].1, 200.0);
    assert_eq!(vertices[0].0, vertices[1].0);
    assert_eq!(vertices[4].0, vertices[3].0);
}

#[test]
fn nan_gap_splits_the_area_into_two_polygons() {
    let points = scalars(&[10.0, 20.0, f64::NAN, 30.0, 40.0]);
    let polygons = project_area(&points, projection(5));

    assert_eq!(polygons.len(), 2);
    assert_eq!(polygons[0].vertices.len(), 4);
    assert_eq!(polygons[1].vertices.len(), 4);
}
