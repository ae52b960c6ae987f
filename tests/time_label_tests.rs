use metric_charts::core::{TimeLabelCadence, TimeLabelMaker};

// 2024-01-15 10:20:30 UTC.
const BASE: f64 = 1_705_314_030.0;

#[test]
fn cadence_selection_follows_interval_magnitude() {
    assert_eq!(
        TimeLabelCadence::for_interval_seconds(60.0),
        TimeLabelCadence::TimeOfDay
    );
    assert_eq!(
        TimeLabelCadence::for_interval_seconds(599.0),
        TimeLabelCadence::TimeOfDay
    );
    assert_eq!(
        TimeLabelCadence::for_interval_seconds(600.0),
        TimeLabelCadence::Hourly
    );
    assert_eq!(
        TimeLabelCadence::for_interval_seconds(7_199.0),
        TimeLabelCadence::Hourly
    );
    assert_eq!(
        TimeLabelCadence::for_interval_seconds(7_200.0),
        TimeLabelCadence::Daily
    );
}

#[test]
fn label_step_widens_with_coarser_cadence() {
    assert_eq!(TimeLabelCadence::TimeOfDay.label_step(), 1);
    assert_eq!(TimeLabelCadence::Hourly.label_step(), 2);
    assert_eq!(TimeLabelCadence::Daily.label_step(), 3);
}

#[test]
fn first_label_is_always_full_format() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::TimeOfDay);
    let label = maker.label_for(BASE).expect("label");
    assert_eq!(label, "10:20:30");
}

#[test]
fn same_hour_collapses_to_abbreviated_format() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::TimeOfDay);
    maker.label_for(BASE).expect("first");
    let label = maker.label_for(BASE + 60.0).expect("second");
    assert_eq!(label, "10:21");
}

#[test]
fn hour_change_forces_full_format_again() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::TimeOfDay);
    maker.label_for(BASE).expect("first");
    maker.label_for(BASE + 60.0).expect("second");
    let label = maker.label_for(BASE + 3_600.0).expect("third");
    assert_eq!(label, "11:20:30");
}

#[test]
fn hourly_cadence_uses_two_line_full_format() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::Hourly);
    let full = maker.label_for(BASE).expect("full");
    assert_eq!(full, "Jan 15\n10:20");

    let abbreviated = maker.label_for(BASE + 600.0).expect("abbreviated");
    assert_eq!(abbreviated, "10:30");
}

#[test]
fn daily_cadence_switches_on_day_boundaries_only() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::Daily);
    let full = maker.label_for(BASE).expect("full");
    assert_eq!(full, "Jan 15\n2024");

    // Ten hours later, same day: abbreviated.
    let same_day = maker.label_for(BASE + 10.0 * 3_600.0).expect("same day");
    assert_eq!(same_day, "Jan 15");

    // Next day: full again.
    let next_day = maker.label_for(BASE + 24.0 * 3_600.0).expect("next day");
    assert_eq!(next_day, "Jan 16\n2024");
}

#[test]
fn reset_forgets_the_previous_coarse_unit() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::TimeOfDay);
    maker.label_for(BASE).expect("first");
    maker.reset();
    let label = maker.label_for(BASE + 60.0).expect("after reset");
    assert_eq!(label, "10:21:30");
}

#[test]
fn non_finite_timestamp_is_rejected() {
    let mut maker = TimeLabelMaker::new(TimeLabelCadence::Daily);
    assert!(maker.label_for(f64::NAN).is_err());
    assert!(maker.label_for(f64::INFINITY).is_err());
}
