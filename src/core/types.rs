use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Measured magnitude carried by one data point.
///
/// A missing sample is expressed as a NaN scalar; range computation and
/// geometry builders skip it instead of failing the whole pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    Scalar(f64),
    /// Scalar with explicit high/low bounds observed over the sample window.
    HighLow { value: f64, high: f64, low: f64 },
    /// Stacked segments; the effective value is the largest segment.
    Stacked(SmallVec<[f64; 8]>),
}

impl SampleValue {
    /// Effective scalar magnitude used for range tracking and geometry.
    ///
    /// Returns NaN when the sample carries no usable value.
    #[must_use]
    pub fn effective(&self) -> f64 {
        match self {
            Self::Scalar(value) => *value,
            Self::HighLow { value, .. } => *value,
            Self::Stacked(segments) => segments
                .iter()
                .copied()
                .filter(|segment| !segment.is_nan())
                .fold(f64::NAN, f64::max),
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.effective().is_nan()
    }
}

/// One sample plotted on a chart: unix-seconds timestamp, optional caption,
/// and the measured value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub time: f64,
    pub label: Option<String>,
    pub value: SampleValue,
}

impl DataPoint {
    #[must_use]
    pub fn scalar(time: f64, value: f64) -> Self {
        Self {
            time,
            label: None,
            value: SampleValue::Scalar(value),
        }
    }

    /// Builds a validated high/low point.
    ///
    /// Invariants (checked only over finite inputs so missing samples pass
    /// through):
    /// - `low <= high`
    /// - `value` is within `[low, high]`
    pub fn high_low(time: f64, value: f64, high: f64, low: f64) -> ChartResult<Self> {
        if low.is_finite() && high.is_finite() && low > high {
            return Err(ChartError::InvalidData(
                "high/low point requires low <= high".to_owned(),
            ));
        }
        if value.is_finite()
            && low.is_finite()
            && high.is_finite()
            && (value < low || value > high)
        {
            return Err(ChartError::InvalidData(
                "high/low point value must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            time,
            label: None,
            value: SampleValue::HighLow { value, high, low },
        })
    }

    #[must_use]
    pub fn stacked(time: f64, segments: impl IntoIterator<Item = f64>) -> Self {
        Self {
            time,
            label: None,
            value: SampleValue::Stacked(segments.into_iter().collect()),
        }
    }

    /// Converts strongly-typed temporal/decimal input into a scalar point.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::scalar(
            datetime_to_unix_seconds(time),
            decimal_to_f64(value, "value")?,
        ))
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered sequence of samples for one named series.
///
/// Collections are owned by a chart, mutated by the caller between render
/// passes, and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPointCollection {
    pub name: String,
    pub points: Vec<DataPoint>,
}

impl DataPointCollection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Discrete annotated event overlaid on a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPoint {
    pub id: String,
    pub time: f64,
}

impl EventPoint {
    #[must_use]
    pub fn new(id: impl Into<String>, time: f64) -> Self {
        Self {
            id: id.into(),
            time,
        }
    }

    pub fn from_datetime(id: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self::new(id, datetime_to_unix_seconds(time))
    }
}
