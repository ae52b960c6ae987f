use serde::{Deserialize, Serialize};

/// Measurement unit family attached to the value axis.
///
/// The family drives tick/marker label formatting and the synthetic range
/// fabricated for degenerate all-equal datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnitFamily {
    #[default]
    Raw,
    Percentage,
    Bytes,
    DurationMillis,
}

impl UnitFamily {
    #[must_use]
    pub fn is_duration(self) -> bool {
        matches!(self, Self::DurationMillis)
    }
}

/// Formats one axis value for tick and statistic-marker labels.
///
/// Non-finite values format as a dash so callers never have to special-case
/// missing statistics.
#[must_use]
pub fn format_value(value: f64, unit: UnitFamily) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }

    match unit {
        UnitFamily::Raw => format_raw(value),
        UnitFamily::Percentage => format!("{value:.1}%"),
        UnitFamily::Bytes => format_bytes(value),
        UnitFamily::DurationMillis => format_duration_millis(value),
    }
}

/// Magnitude-dependent precision: large values read as integers, small
/// values keep enough digits to stay distinguishable between ticks.
fn format_raw(value: f64) -> String {
    let magnitude = value.abs();
    let precision = if magnitude >= 100.0 {
        0
    } else if magnitude >= 10.0 {
        1
    } else {
        2
    };
    format!("{value:.precision$}")
}

fn format_bytes(value: f64) -> String {
    const LADDER: [(f64, &str); 4] = [
        (1024.0 * 1024.0 * 1024.0 * 1024.0, "TB"),
        (1024.0 * 1024.0 * 1024.0, "GB"),
        (1024.0 * 1024.0, "MB"),
        (1024.0, "KB"),
    ];

    let magnitude = value.abs();
    for (scale, suffix) in LADDER {
        if magnitude >= scale {
            return format!("{}{suffix}", format_raw(value / scale));
        }
    }
    format!("{}B", format_raw(value))
}

fn format_duration_millis(value: f64) -> String {
    const HOUR_MS: f64 = 3_600_000.0;
    const MINUTE_MS: f64 = 60_000.0;
    const SECOND_MS: f64 = 1_000.0;

    let magnitude = value.abs();
    if magnitude >= HOUR_MS {
        format!("{}h", format_raw(value / HOUR_MS))
    } else if magnitude >= MINUTE_MS {
        format!("{}m", format_raw(value / MINUTE_MS))
    } else if magnitude >= SECOND_MS {
        format!("{}s", format_raw(value / SECOND_MS))
    } else {
        format!("{value:.0}ms")
    }
}
