use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Unit-axis label cadence selected from the sampling interval magnitude.
///
/// Each cadence pairs a full format with an abbreviated one and decides how
/// many ticks sit between labeled positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLabelCadence {
    /// Sampling interval under ten minutes: time-of-day labels on every tick.
    TimeOfDay,
    /// Sampling interval under two hours: hour-granular labels every 2nd tick.
    Hourly,
    /// Anything coarser: day-granular labels every 3rd tick.
    Daily,
}

impl TimeLabelCadence {
    #[must_use]
    pub fn for_interval_seconds(interval_seconds: f64) -> Self {
        if interval_seconds < 600.0 {
            Self::TimeOfDay
        } else if interval_seconds < 7_200.0 {
            Self::Hourly
        } else {
            Self::Daily
        }
    }

    /// Every Nth tick receives a label.
    #[must_use]
    pub fn label_step(self) -> usize {
        match self {
            Self::TimeOfDay => 1,
            Self::Hourly => 2,
            Self::Daily => 3,
        }
    }

    /// Epoch bucket of the coarse unit whose change forces the full format.
    fn coarse_bucket(self, unix_seconds: i64) -> i64 {
        match self {
            Self::TimeOfDay | Self::Hourly => unix_seconds.div_euclid(SECONDS_PER_HOUR),
            Self::Daily => unix_seconds.div_euclid(SECONDS_PER_DAY),
        }
    }

    fn full_format(self, time: DateTime<Utc>) -> String {
        match self {
            Self::TimeOfDay => time.format("%H:%M:%S").to_string(),
            Self::Hourly => time.format("%b %-d\n%H:%M").to_string(),
            Self::Daily => time.format("%b %-d\n%Y").to_string(),
        }
    }

    fn abbreviated_format(self, time: DateTime<Utc>) -> String {
        match self {
            Self::TimeOfDay | Self::Hourly => time.format("%H:%M").to_string(),
            Self::Daily => time.format("%b %-d").to_string(),
        }
    }
}

/// Run-length compacting label maker for consecutive unit-axis ticks.
///
/// The full format is emitted whenever the coarse unit (hour or day,
/// depending on cadence) changed since the previous call; repeated coarse
/// units collapse to the abbreviated format.
#[derive(Debug, Clone)]
pub struct TimeLabelMaker {
    cadence: TimeLabelCadence,
    last_bucket: Option<i64>,
}

impl TimeLabelMaker {
    #[must_use]
    pub fn new(cadence: TimeLabelCadence) -> Self {
        Self {
            cadence,
            last_bucket: None,
        }
    }

    #[must_use]
    pub fn cadence(&self) -> TimeLabelCadence {
        self.cadence
    }

    /// Forgets the previous coarse unit so the next label is full-format.
    pub fn reset(&mut self) {
        self.last_bucket = None;
    }

    /// Formats the label for the next consecutive tick.
    pub fn label_for(&mut self, unix_seconds: f64) -> ChartResult<String> {
        if !unix_seconds.is_finite() {
            return Err(ChartError::InvalidData(
                "label timestamp must be finite".to_owned(),
            ));
        }
        let whole_seconds = unix_seconds.floor() as i64;
        let time = DateTime::<Utc>::from_timestamp(whole_seconds, 0).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "label timestamp {unix_seconds} is outside the representable range"
            ))
        })?;

        let bucket = self.cadence.coarse_bucket(whole_seconds);
        let changed = self.last_bucket != Some(bucket);
        self.last_bucket = Some(bucket);

        if changed {
            Ok(self.cadence.full_format(time))
        } else {
            Ok(self.cadence.abbreviated_format(time))
        }
    }
}
