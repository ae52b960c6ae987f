use metric_charts::core::{ChartProjection, Orientation, RangeMarks, Rect};

fn fixed_marks(floor: f64, ceiling: f64) -> RangeMarks {
    RangeMarks::fixed(floor, ceiling, 11).expect("fixed marks")
}

fn vertical_projection() -> ChartProjection {
    ChartProjection::new(
        Rect::new(0.0, 0.0, 500.0, 300.0),
        Orientation::Vertical,
        &fixed_marks(0.0, 100.0),
        10,
        0.0,
    )
    .expect("projection")
}

#[test]
fn value_at_floor_maps_to_base_pixel_with_one_pixel_nudge() {
    let projection = vertical_projection();
    assert_eq!(projection.base_px(), 300.0);
    assert_eq!(projection.value_px(0.0), 299.0);
}

#[test]
fn value_at_ceiling_maps_to_plot_top() {
    let projection = vertical_projection();
    assert_eq!(projection.value_px(100.0), 0.0);
}

#[test]
fn scale_is_axis_pixels_over_tick_span() {
    let projection = vertical_projection();
    assert_eq!(projection.scale(), 3.0);
    assert_eq!(projection.value_px(50.0), 150.0);
}

#[test]
fn out_of_range_values_clamp_to_the_boundary() {
    let projection = vertical_projection();
    assert_eq!(projection.value_px(-50.0), projection.value_px(0.0));
    assert_eq!(projection.value_px(150.0), projection.value_px(100.0));
}

#[test]
fn horizontal_orientation_nudges_off_the_left_axis_line() {
    let projection = ChartProjection::new(
        Rect::new(0.0, 0.0, 400.0, 200.0),
        Orientation::Horizontal,
        &fixed_marks(0.0, 100.0),
        5,
        0.0,
    )
    .expect("projection");

    assert_eq!(projection.base_px(), 0.0);
    assert_eq!(projection.value_px(0.0), 1.0);
    assert_eq!(projection.value_px(100.0), 400.0);
}

#[test]
fn positions_divide_the_unit_axis_evenly() {
    let projection = vertical_projection();
    assert_eq!(projection.spacing_px(), 50.0);
    assert_eq!(projection.position_px(0), 0.0);
    assert_eq!(projection.position_px(3), 150.0);
    assert_eq!(projection.position_center_px(0), 25.0);
}

#[test]
fn unit_inset_shrinks_the_usable_axis() {
    let projection = ChartProjection::new(
        Rect::new(0.0, 0.0, 500.0, 300.0),
        Orientation::Vertical,
        &fixed_marks(0.0, 100.0),
        10,
        10.0,
    )
    .expect("projection");

    assert_eq!(projection.spacing_px(), 48.0);
    assert_eq!(projection.position_px(0), 10.0);
}

#[test]
fn point_at_combines_slot_center_and_value_pixel() {
    let projection = vertical_projection();
    let (x, y) = projection.point_at(2, 50.0);
    assert_eq!(x, 125.0);
    assert_eq!(y, 150.0);
}

#[test]
fn span_to_base_keeps_a_one_pixel_bar_for_floor_values() {
    let projection = vertical_projection();
    let bar = projection.span_to_base(0, 0.0, 0.8);
    assert_eq!(bar.height, 1.0);
    assert_eq!(bar.bottom(), 300.0);
}

#[test]
fn value_span_rect_is_at_least_one_pixel_thick() {
    let projection = vertical_projection();
    let rect = projection.value_span_rect(1, 40.0, 40.0, 0.5);
    assert_eq!(rect.height, 1.0);
}

#[test]
fn projection_rejects_empty_marks_and_zero_positions() {
    let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
    let marks = fixed_marks(0.0, 1.0);
    assert!(ChartProjection::new(plot, Orientation::Vertical, &marks, 0, 0.0).is_err());

    let empty = metric_charts::core::RangeMarks::compute(
        [&metric_charts::core::DataPointCollection::new("empty")],
        metric_charts::core::RangePolicy::default(),
    )
    .expect("empty marks");
    assert!(ChartProjection::new(plot, Orientation::Vertical, &empty, 5, 0.0).is_err());
}
