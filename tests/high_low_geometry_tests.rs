use metric_charts::core::{
    ChartProjection, DataPoint, Orientation, RangeMarks, Rect, project_high_low,
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

#[test]
fn bar_spans_low_to_high_with_close_tick_at_value() {
    let point = DataPoint::high_low(0.0, 50.0, 80.0, 20.0).expect("point");
    let geometry = project_high_low(&[point], projection(1), 0.5).expect("high/low");

    assert_eq!(geometry.len(), 1);
    let bar = geometry[0].bar;
    // scale = 2 px per unit on the inverted axis.
    assert_eq!(bar.y, 40.0);
    assert_eq!(bar.bottom(), 160.0);

    let tick = geometry[0].close_tick;
    assert_eq!(tick.y1, 100.0);
    assert_eq!(tick.y1, tick.y2);
    assert_eq!(tick.x1, bar.x);
    assert_eq!(tick.x2, bar.right());
}

#[test]
fn plain_scalars_degenerate_to_a_one_pixel_bar() {
    let point = DataPoint::scalar(0.0, 50.0);
    let geometry = project_high_low(&[point], projection(1), 0.5).expect("high/low");

    assert_eq!(geometry[0].bar.height, 1.0);
}

#[test]
fn nan_bound_falls_back_to_the_sample_value() {
    let point = DataPoint::high_low(0.0, 50.0, f64::NAN, 20.0).expect("point");
    let geometry = project_high_low(&[point], projection(1), 0.5).expect("high/low");

    // High collapses to value: bar spans 20..50.
    assert_eq!(geometry[0].bar.y, 100.0);
    assert_eq!(geometry[0].bar.bottom(), 160.0);
}

#[test]
fn missing_samples_are_skipped() {
    let points = vec![
        DataPoint::scalar(0.0, f64::NAN),
        DataPoint::high_low(60.0, 40.0, 60.0, 30.0).expect("point"),
    ];
    let geometry = project_high_low(&points, projection(2), 0.5).expect("high/low");

    assert_eq!(geometry.len(), 1);
    assert_eq!(geometry[0].position, 1);
}

#[test]
fn inverted_bounds_are_rejected_at_construction() {
    assert!(DataPoint::high_low(0.0, 50.0, 20.0, 80.0).is_err());
    assert!(DataPoint::high_low(0.0, 90.0, 80.0, 20.0).is_err());
}
