use metric_charts::core::{ChartProjection, Orientation, RangeMarks, Rect};
use proptest::prelude::*;

proptest! {
    #[test]
    fn in_domain_values_land_inside_the_plot(
        floor in -1_000.0f64..1_000.0,
        span in 1.0f64..10_000.0,
        fraction in 0.0f64..1.0
    ) {
        let ceiling = floor + span;
        let marks = RangeMarks::fixed(floor, ceiling, 11).expect("marks");
        let plot = Rect::new(0.0, 0.0, 500.0, 300.0);
        let projection =
            ChartProjection::new(plot, Orientation::Vertical, &marks, 10, 0.0).expect("projection");

        let value = floor + fraction * span;
        let y = projection.value_px(value);
        prop_assert!(y >= plot.y);
        prop_assert!(y <= plot.bottom());
    }

    #[test]
    fn projection_is_monotonic_on_the_inverted_axis(
        floor in -1_000.0f64..1_000.0,
        span in 1.0f64..10_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let ceiling = floor + span;
        let marks = RangeMarks::fixed(floor, ceiling, 11).expect("marks");
        let plot = Rect::new(0.0, 0.0, 500.0, 300.0);
        let projection =
            ChartProjection::new(plot, Orientation::Vertical, &marks, 10, 0.0).expect("projection");

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let y_lo = projection.value_px(floor + lo * span);
        let y_hi = projection.value_px(floor + hi * span);
        prop_assert!(y_hi <= y_lo);
    }

    #[test]
    fn out_of_domain_values_clamp_to_the_boundary_pixels(
        floor in -1_000.0f64..1_000.0,
        span in 1.0f64..10_000.0,
        overshoot in 1.0f64..1_000.0
    ) {
        let ceiling = floor + span;
        let marks = RangeMarks::fixed(floor, ceiling, 11).expect("marks");
        let plot = Rect::new(0.0, 0.0, 500.0, 300.0);
        let projection =
            ChartProjection::new(plot, Orientation::Vertical, &marks, 10, 0.0).expect("projection");

        prop_assert_eq!(
            projection.value_px(floor - overshoot),
            projection.value_px(floor)
        );
        prop_assert_eq!(
            projection.value_px(ceiling + overshoot),
            projection.value_px(ceiling)
        );
    }

    #[test]
    fn slot_centers_stay_inside_the_unit_axis(
        positions in 1usize..128,
        index_fraction in 0.0f64..1.0
    ) {
        let marks = RangeMarks::fixed(0.0, 1.0, 2).expect("marks");
        let plot = Rect::new(0.0, 0.0, 640.0, 200.0);
        let projection =
            ChartProjection::new(plot, Orientation::Vertical, &marks, positions, 4.0)
                .expect("projection");

        let index = ((positions - 1) as f64 * index_fraction) as usize;
        let center = projection.position_center_px(index);
        prop_assert!(center >= plot.x);
        prop_assert!(center <= plot.right());
    }
}
