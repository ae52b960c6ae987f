use metric_charts::core::{
    ChartProjection, DataPoint, Orientation, RangeMarks, Rect, project_stacked,
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
fn slices_are_emitted_largest_first_for_painter_order() {
    let point = DataPoint::stacked(0.0, [10.0, 50.0, 30.0]);
    let slices = project_stacked(&[point], projection(1), 0.5).expect("stacked");

    assert_eq!(slices.len(), 3);
    assert_eq!(slices[0].segment, 1);
    assert_eq!(slices[1].segment, 2);
    assert_eq!(slices[2].segment, 0);
    assert!(slices[0].value >= slices[1].value && slices[1].value >= slices[2].value);
}

#[test]
fn every_slice_rises_from_the_base_line() {
    let point = DataPoint::stacked(0.0, [10.0, 50.0, 30.0]);
    let slices = project_stacked(&[point], projection(1), 0.5).expect("stacked");

    for slice in &slices {
        assert_eq!(slice.rect.bottom(), 200.0);
    }
    // The tallest slice tops out at the point's effective value.
    assert_eq!(slices[0].rect.y, 100.0);
}

#[test]
fn equal_segments_keep_original_order() {
    let point = DataPoint::stacked(0.0, [20.0, 20.0]);
    let slices = project_stacked(&[point], projection(1), 0.5).expect("stacked");

    assert_eq!(slices[0].segment, 0);
    assert_eq!(slices[1].segment, 1);
}

#[test]
fn nan_segments_are_dropped_from_the_stack() {
    let point = DataPoint::stacked(0.0, [10.0, f64::NAN, 30.0]);
    let slices = project_stacked(&[point], projection(1), 0.5).expect("stacked");

    assert_eq!(slices.len(), 2);
    assert!(slices.iter().all(|slice| slice.segment != 1));
}

#[test]
fn scalar_points_project_as_a_single_slice() {
    let point = DataPoint::scalar(0.0, 40.0);
    let slices = project_stacked(&[point], projection(1), 0.5).expect("stacked");

    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].segment, 0);
}

#[test]
fn all_nan_stack_is_skipped_entirely() {
    let point = DataPoint::stacked(0.0, [f64::NAN, f64::NAN]);
    let slices = project_stacked(&[point], projection(1), 0.5).expect("stacked");

    assert!(slices.is_empty());
}
