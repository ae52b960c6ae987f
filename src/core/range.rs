use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::format::UnitFamily;
use crate::core::types::{DataPointCollection, SampleValue};
use crate::error::{ChartError, ChartResult};

/// Tuning inputs for value-axis range computation.
///
/// `floor == ceiling` means no explicit override is set and the range is
/// derived from the data; any other pair is used verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePolicy {
    pub value_lines: usize,
    pub floor: f64,
    pub ceiling: f64,
    pub unit: UnitFamily,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self {
            value_lines: 11,
            floor: 0.0,
            ceiling: 0.0,
            unit: UnitFamily::Raw,
        }
    }
}

impl RangePolicy {
    #[must_use]
    pub fn is_auto_range(self) -> bool {
        self.floor == self.ceiling
    }

    fn validate(self) -> ChartResult<Self> {
        if self.value_lines < 2 {
            return Err(ChartError::InvalidConfig(
                "range policy requires at least 2 value lines".to_owned(),
            ));
        }
        if !self.floor.is_finite() || !self.ceiling.is_finite() {
            return Err(ChartError::InvalidConfig(
                "range floor/ceiling must be finite".to_owned(),
            ));
        }
        if !self.is_auto_range() && self.floor > self.ceiling {
            return Err(ChartError::InvalidConfig(
                "explicit range requires floor < ceiling".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Computed value-axis marks plus the per-pass statistics shown as marker
/// lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeMarks {
    ticks: Vec<f64>,
    average: f64,
    peak: f64,
    low: f64,
    sample_count: usize,
    has_data: bool,
}

impl RangeMarks {
    /// Computes axis marks over every collection in one pass.
    ///
    /// Each point is visited exactly once. NaN samples are skipped. Every
    /// non-NaN scalar, including each stacked sub-value, feeds the average;
    /// min/max track effective values and fold in explicit high/low bounds.
    pub fn compute<'a, I>(collections: I, policy: RangePolicy) -> ChartResult<Self>
    where
        I: IntoIterator<Item = &'a DataPointCollection>,
    {
        let policy = policy.validate()?;

        let mut sum = 0.0;
        let mut count = 0usize;
        let mut low = f64::INFINITY;
        let mut peak = f64::NEG_INFINITY;

        for collection in collections {
            for point in &collection.points {
                let effective = point.value.effective();
                if effective.is_nan() {
                    continue;
                }

                match &point.value {
                    SampleValue::Scalar(value) => {
                        sum += value;
                        count += 1;
                    }
                    SampleValue::HighLow {
                        value,
                        high,
                        low: low_bound,
                    } => {
                        sum += value;
                        count += 1;
                        if high.is_finite() {
                            peak = peak.max(*high);
                        }
                        if low_bound.is_finite() {
                            low = low.min(*low_bound);
                        }
                    }
                    SampleValue::Stacked(segments) => {
                        for segment in segments.iter().copied().filter(|s| !s.is_nan()) {
                            sum += segment;
                            count += 1;
                        }
                    }
                }

                low = low.min(effective);
                peak = peak.max(effective);
            }
        }

        if count == 0 {
            debug!("range computation found no plottable samples");
            return Ok(Self {
                ticks: Vec::new(),
                average: 0.0,
                peak: 0.0,
                low: 0.0,
                sample_count: 0,
                has_data: false,
            });
        }

        let (floor, ceiling) = if policy.is_auto_range() {
            auto_range(low, peak, policy)
        } else {
            (policy.floor, policy.ceiling)
        };

        Ok(Self {
            ticks: even_ticks(floor, ceiling, policy.value_lines),
            average: sum / count as f64,
            peak,
            low,
            sample_count: count,
            has_data: true,
        })
    }

    #[must_use]
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// First tick (the resolved floor). Zero when no data was seen.
    #[must_use]
    pub fn floor(&self) -> f64 {
        self.ticks.first().copied().unwrap_or(0.0)
    }

    /// Last tick (the resolved ceiling). Zero when no data was seen.
    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.ticks.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        self.average
    }

    #[must_use]
    pub fn peak(&self) -> f64 {
        self.peak
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Builds fixed marks over an explicit domain, bypassing data statistics.
    ///
    /// Used for charts whose value domain is inherent to the kind (for
    /// example availability ratios over `[0, 1]`).
    pub fn fixed(floor: f64, ceiling: f64, value_lines: usize) -> ChartResult<Self> {
        let policy = RangePolicy {
            value_lines,
            floor,
            ceiling,
            unit: UnitFamily::Raw,
        }
        .validate()?;
        if policy.is_auto_range() {
            return Err(ChartError::InvalidConfig(
                "fixed marks require floor < ceiling".to_owned(),
            ));
        }

        Ok(Self {
            ticks: even_ticks(floor, ceiling, value_lines),
            average: 0.0,
            peak: ceiling,
            low: floor,
            sample_count: 0,
            has_data: true,
        })
    }
}

/// Derives floor/ceiling from observed low/peak.
///
/// The total buffer is 10% of the range split evenly between top and
/// bottom. The bottom buffer is withheld entirely when it would push the
/// floor below zero; a negative low keeps `floor = low` for the same
/// reason.
fn auto_range(low: f64, peak: f64, policy: RangePolicy) -> (f64, f64) {
    if peak == low {
        return synthetic_range(peak, policy);
    }

    let buffer = (peak - low) * 0.10 / 2.0;
    let ceiling = peak + buffer;
    let floor = if low - buffer < 0.0 { low } else { low - buffer };
    (floor, ceiling)
}

/// Fabricates a range for an all-equal dataset so grid lines stay distinct.
fn synthetic_range(value: f64, policy: RangePolicy) -> (f64, f64) {
    if value == 0.0 {
        let unit_scale = if policy.unit.is_duration() { 1000.0 } else { 1.0 };
        (0.0, (policy.value_lines - 1) as f64 * unit_scale)
    } else if value > 0.0 {
        (0.0, value * 2.0)
    } else {
        (value * 2.0, 0.0)
    }
}

/// Exactly `value_lines` ascending ticks in `value_lines - 1` equal steps.
fn even_ticks(floor: f64, ceiling: f64, value_lines: usize) -> Vec<f64> {
    let step = (ceiling - floor) / (value_lines - 1) as f64;
    let mut ticks: Vec<f64> = (0..value_lines)
        .map(|index| floor + step * index as f64)
        .collect();
    // Pin the endpoints so float drift never shrinks the advertised span.
    ticks[0] = floor;
    ticks[value_lines - 1] = ceiling;
    ticks
}
