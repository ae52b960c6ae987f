pub mod area_series;
pub mod availability_series;
pub mod column_series;
pub mod format;
pub mod high_low_series;
pub mod layout;
pub mod line_series;
pub mod primitives;
pub mod projection;
pub mod range;
pub mod stacked_series;
pub mod time_labels;
pub mod types;

pub use area_series::{AreaPolygon, project_area};
pub use availability_series::{AvailabilityBand, AvailabilitySegment, project_availability};
pub use column_series::{ColumnGeometry, project_columns};
pub use format::{UnitFamily, format_value};
pub use high_low_series::{HighLowGeometry, project_high_low};
pub use layout::{ChartLayout, LayoutSpec, MarkerLabel, Rect, resolve_marker_label_collisions};
pub use line_series::{LineSegment, project_polyline};
pub use projection::{ChartProjection, Orientation};
pub use range::{RangeMarks, RangePolicy};
pub use stacked_series::{StackedSlice, project_stacked};
pub use time_labels::{TimeLabelCadence, TimeLabelMaker};
pub use types::{DataPoint, DataPointCollection, EventPoint, SampleValue, Viewport};
