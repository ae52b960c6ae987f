use serde::{Deserialize, Serialize};

use crate::core::{Orientation, RangePolicy, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Visual encoding drawn on top of the shared layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Column,
    Line,
    Area,
    HighLow,
    Availability,
    Performance,
    StackedPerformance,
}

impl ChartKind {
    /// Kinds that plot a line and accept event-point overlays.
    #[must_use]
    pub fn supports_events(self) -> bool {
        matches!(self, Self::Line | Self::Performance)
    }

    /// Kinds whose value domain is inherent rather than data-derived.
    #[must_use]
    pub fn fixed_domain(self) -> Option<(f64, f64)> {
        match self {
            Self::Availability => Some((0.0, 1.0)),
            _ => None,
        }
    }
}

/// Placement of the series legend strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendPosition {
    Hidden,
    Top,
    #[default]
    Bottom,
}

/// Colors, font metrics, and spacing knobs for one chart.
///
/// Font metrics are estimates used for layout reservation and collision
/// boxes; the raster backend does its own exact text measurement when
/// drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub background: Color,
    pub border_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub series_colors: Vec<Color>,
    pub average_color: Color,
    pub peak_color: Color,
    pub low_color: Color,
    pub baseline_color: Color,
    pub up_color: Color,
    pub degraded_color: Color,
    pub down_color: Color,
    pub event_color: Color,
    pub font_size_px: f64,
    pub title_font_size_px: f64,
    pub char_width_px: f64,
    pub tick_length_px: f64,
    pub border_width_px: f64,
    pub margin_px: f64,
    pub unit_inset_px: f64,
    pub column_fill_ratio: f64,
    pub line_width_px: f64,
    pub area_fill_alpha: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            border_color: Color::rgb(0.40, 0.40, 0.40),
            grid_color: Color::rgb(0.85, 0.85, 0.85),
            text_color: Color::rgb(0.15, 0.15, 0.15),
            series_colors: vec![
                Color::rgb(0.27, 0.45, 0.77),
                Color::rgb(0.93, 0.49, 0.19),
                Color::rgb(0.44, 0.68, 0.28),
                Color::rgb(0.60, 0.36, 0.71),
                Color::rgb(0.36, 0.61, 0.84),
                Color::rgb(0.65, 0.65, 0.65),
            ],
            average_color: Color::rgb(0.20, 0.47, 0.20),
            peak_color: Color::rgb(0.75, 0.22, 0.17),
            low_color: Color::rgb(0.25, 0.32, 0.71),
            baseline_color: Color::rgb(0.55, 0.42, 0.13),
            up_color: Color::rgb(0.44, 0.68, 0.28),
            degraded_color: Color::rgb(0.95, 0.77, 0.06),
            down_color: Color::rgb(0.75, 0.22, 0.17),
            event_color: Color::rgb(0.30, 0.30, 0.30),
            font_size_px: 11.0,
            title_font_size_px: 14.0,
            char_width_px: 7.0,
            tick_length_px: 4.0,
            border_width_px: 1.0,
            margin_px: 10.0,
            unit_inset_px: 6.0,
            column_fill_ratio: 0.7,
            line_width_px: 2.0,
            area_fill_alpha: 0.25,
        }
    }
}

impl ChartStyle {
    fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background,
            self.border_color,
            self.grid_color,
            self.text_color,
            self.average_color,
            self.peak_color,
            self.low_color,
            self.baseline_color,
            self.up_color,
            self.degraded_color,
            self.down_color,
            self.event_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        if self.series_colors.is_empty() {
            return Err(ChartError::InvalidConfig(
                "style requires at least one series color".to_owned(),
            ));
        }
        for color in &self.series_colors {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }

        for (value, name) in [
            (self.font_size_px, "font_size_px"),
            (self.title_font_size_px, "title_font_size_px"),
            (self.char_width_px, "char_width_px"),
            (self.line_width_px, "line_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.tick_length_px, "tick_length_px"),
            (self.border_width_px, "border_width_px"),
            (self.margin_px, "margin_px"),
            (self.unit_inset_px, "unit_inset_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.column_fill_ratio.is_finite()
            || self.column_fill_ratio <= 0.0
            || self.column_fill_ratio > 1.0
        {
            return Err(ChartError::InvalidConfig(
                "style `column_fill_ratio` must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.area_fill_alpha.is_finite() || !(0.0..=1.0).contains(&self.area_fill_alpha) {
            return Err(ChartError::InvalidConfig(
                "style `area_fill_alpha` must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        self.series_colors[index % self.series_colors.len()]
    }
}

/// Immutable chart configuration, validated once at construction.
///
/// The type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    pub kind: ChartKind,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub range: RangePolicy,
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: f64,
    #[serde(default = "default_true")]
    pub show_average: bool,
    #[serde(default = "default_true")]
    pub show_peak: bool,
    #[serde(default = "default_true")]
    pub show_low: bool,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub top_title: Option<String>,
    #[serde(default)]
    pub bottom_title: Option<String>,
    #[serde(default)]
    pub legend: LegendPosition,
    #[serde(default)]
    pub style: ChartStyle,
}

impl ChartConfig {
    /// Creates a config with default range policy, statistics markers on,
    /// and a bottom legend.
    #[must_use]
    pub fn new(viewport: Viewport, kind: ChartKind) -> Self {
        Self {
            viewport,
            kind,
            orientation: Orientation::default(),
            range: RangePolicy::default(),
            interval_seconds: default_interval_seconds(),
            show_average: true,
            show_peak: true,
            show_low: true,
            baseline: None,
            top_title: None,
            bottom_title: None,
            legend: LegendPosition::default(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: RangePolicy) -> Self {
        self.range = range;
        self
    }

    /// Sets the sampling interval driving unit-axis label density.
    #[must_use]
    pub fn with_interval_seconds(mut self, interval_seconds: f64) -> Self {
        self.interval_seconds = interval_seconds;
        self
    }

    #[must_use]
    pub fn with_statistics(mut self, average: bool, peak: bool, low: bool) -> Self {
        self.show_average = average;
        self.show_peak = peak;
        self.show_low = low;
        self
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    #[must_use]
    pub fn with_top_title(mut self, title: impl Into<String>) -> Self {
        self.top_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_bottom_title(mut self, title: impl Into<String>) -> Self {
        self.bottom_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.range.value_lines < 2 {
            return Err(ChartError::InvalidConfig(
                "config requires at least 2 value lines".to_owned(),
            ));
        }
        if !self.range.floor.is_finite() || !self.range.ceiling.is_finite() {
            return Err(ChartError::InvalidConfig(
                "range floor/ceiling must be finite".to_owned(),
            ));
        }
        if !self.range.is_auto_range() && self.range.floor > self.range.ceiling {
            return Err(ChartError::InvalidConfig(
                "explicit range requires floor < ceiling".to_owned(),
            ));
        }
        if !self.interval_seconds.is_finite() || self.interval_seconds <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "sampling interval must be finite and > 0".to_owned(),
            ));
        }
        if let Some(baseline) = self.baseline {
            if !baseline.is_finite() {
                return Err(ChartError::InvalidConfig(
                    "baseline must be finite".to_owned(),
                ));
            }
        }
        self.style.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_interval_seconds() -> f64 {
    60.0
}

fn default_true() -> bool {
    true
}
