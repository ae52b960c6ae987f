mod chart;
mod chart_config;
mod frame_builder;

pub use chart::Chart;
pub use chart_config::{ChartConfig, ChartKind, ChartStyle, LegendPosition};
