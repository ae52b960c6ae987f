use metric_charts::core::{
    ChartLayout, LayoutSpec, MarkerLabel, Orientation, Viewport, resolve_marker_label_collisions,
};

fn base_spec() -> LayoutSpec {
    LayoutSpec {
        orientation: Orientation::Vertical,
        font_size_px: 11.0,
        title_font_size_px: 14.0,
        show_top_title: false,
        show_bottom_title: false,
        top_legend_rows: 0,
        bottom_legend_rows: 0,
        value_label_width_px: 40.0,
        unit_label_width_px: 40.0,
        tick_length_px: 4.0,
        border_width_px: 1.0,
        margin_px: 10.0,
    }
}

#[test]
fn vertical_layout_reserves_left_gutter_and_bottom_strip() {
    let layout = ChartLayout::compute(Viewport::new(600, 400), &base_spec()).expect("layout");

    // Left: margin + labels + ticks + border.
    assert_eq!(layout.plot.x, 10.0 + 40.0 + 4.0 + 1.0);
    // Top: margin + border only.
    assert_eq!(layout.plot.y, 11.0);
    assert!(layout.plot.width > 0.0 && layout.plot.height > 0.0);
    assert_eq!(layout.value_gutter.x, 10.0);
    assert!(layout.unit_gutter.y >= layout.plot.bottom());
    assert!(layout.top_title.is_none());
    assert!(layout.bottom_legend.is_none());
}

#[test]
fn horizontal_layout_swaps_the_gutters() {
    let spec = LayoutSpec {
        orientation: Orientation::Horizontal,
        ..base_spec()
    };
    let layout = ChartLayout::compute(Viewport::new(600, 400), &spec).expect("layout");

    // Value ticks live along the bottom, unit labels along the left.
    assert!(layout.value_gutter.y >= layout.plot.bottom());
    assert_eq!(layout.unit_gutter.x, 10.0);
}

#[test]
fn title_and_legend_strips_shrink_the_plot() {
    let bare = ChartLayout::compute(Viewport::new(600, 400), &base_spec()).expect("layout");

    let spec = LayoutSpec {
        show_top_title: true,
        show_bottom_title: true,
        top_legend_rows: 1,
        bottom_legend_rows: 2,
        ..base_spec()
    };
    let dressed = ChartLayout::compute(Viewport::new(600, 400), &spec).expect("layout");

    assert!(dressed.plot.height < bare.plot.height);
    assert!(dressed.top_title.is_some());
    assert!(dressed.bottom_title.is_some());
    let top_legend = dressed.top_legend.expect("top legend strip");
    let bottom_legend = dressed.bottom_legend.expect("bottom legend strip");
    assert!(bottom_legend.height > top_legend.height);
    assert!(dressed.plot.y > top_legend.bottom());
}

#[test]
fn layout_with_no_remaining_interior_is_rejected() {
    let result = ChartLayout::compute(Viewport::new(60, 30), &base_spec());
    assert!(result.is_err());
}

#[test]
fn invalid_viewport_is_rejected() {
    assert!(ChartLayout::compute(Viewport::new(0, 400), &base_spec()).is_err());
}

fn label(text: &str, x: f64, y: f64) -> MarkerLabel {
    MarkerLabel {
        text: text.to_owned(),
        x,
        y,
        width_px: 40.0,
        height_px: 12.0,
    }
}

#[test]
fn intersecting_marker_label_shifts_left_by_width_plus_one_char() {
    let mut labels = vec![label("Peak 31", 100.0, 50.0), label("Avg 20", 110.0, 55.0)];
    resolve_marker_label_collisions(&mut labels, 7.0);

    assert_eq!(labels[0].x, 100.0);
    assert_eq!(labels[1].x, 110.0 - (40.0 + 7.0));
}

#[test]
fn disjoint_marker_labels_stay_put() {
    let mut labels = vec![label("Peak 31", 100.0, 50.0), label("Low 9", 100.0, 200.0)];
    resolve_marker_label_collisions(&mut labels, 7.0);

    assert_eq!(labels[1].x, 100.0);
}
