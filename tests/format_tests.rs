use metric_charts::core::{UnitFamily, format_value};

#[test]
fn raw_precision_follows_magnitude() {
    assert_eq!(format_value(1234.6, UnitFamily::Raw), "1235");
    assert_eq!(format_value(42.26, UnitFamily::Raw), "42.3");
    assert_eq!(format_value(3.14159, UnitFamily::Raw), "3.14");
    assert_eq!(format_value(0.0, UnitFamily::Raw), "0.00");
}

#[test]
fn percentage_keeps_one_decimal() {
    assert_eq!(format_value(99.95, UnitFamily::Percentage), "99.9%");
    assert_eq!(format_value(0.0, UnitFamily::Percentage), "0.0%");
}

#[test]
fn bytes_climb_the_binary_ladder() {
    assert_eq!(format_value(512.0, UnitFamily::Bytes), "512B");
    assert_eq!(format_value(2048.0, UnitFamily::Bytes), "2.00KB");
    assert_eq!(format_value(3.0 * 1024.0 * 1024.0, UnitFamily::Bytes), "3.00MB");
    assert_eq!(
        format_value(5.0 * 1024.0 * 1024.0 * 1024.0, UnitFamily::Bytes),
        "5.00GB"
    );
}

#[test]
fn durations_climb_from_millis_to_hours() {
    assert_eq!(format_value(250.0, UnitFamily::DurationMillis), "250ms");
    assert_eq!(format_value(1_500.0, UnitFamily::DurationMillis), "1.50s");
    assert_eq!(format_value(90_000.0, UnitFamily::DurationMillis), "1.50m");
    assert_eq!(format_value(7_200_000.0, UnitFamily::DurationMillis), "2.00h");
}

#[test]
fn non_finite_values_format_as_dash() {
    assert_eq!(format_value(f64::NAN, UnitFamily::Raw), "-");
    assert_eq!(format_value(f64::INFINITY, UnitFamily::Bytes), "-");
}

#[test]
fn duration_family_is_the_only_duration() {
    assert!(UnitFamily::DurationMillis.is_duration());
    assert!(!UnitFamily::Raw.is_duration());
    assert!(!UnitFamily::Bytes.is_duration());
    assert!(!UnitFamily::Percentage.is_duration());
}
