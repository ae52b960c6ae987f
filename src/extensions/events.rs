use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::projection::{ChartProjection, Orientation};
use crate::core::types::{DataPoint, EventPoint};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventPlacementConfig {
    pub glyph_size_px: f64,
    pub lane_gap_px: f64,
    pub min_horizontal_gap_px: f64,
    pub anchor_offset_px: f64,
}

impl Default for EventPlacementConfig {
    fn default() -> Self {
        Self {
            glyph_size_px: 8.0,
            lane_gap_px: 4.0,
            min_horizontal_gap_px: 2.0,
            anchor_offset_px: 6.0,
        }
    }
}

impl EventPlacementConfig {
    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.glyph_size_px, "glyph_size_px"),
            (self.lane_gap_px, "lane_gap_px"),
            (self.min_horizontal_gap_px, "min_horizontal_gap_px"),
            (self.anchor_offset_px, "anchor_offset_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "event placement `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Event glyph resolved to pixel coordinates and a collision lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEvent {
    pub id: String,
    pub time: f64,
    pub position: usize,
    pub lane: usize,
    pub x: f64,
    pub y: f64,
}

/// Places event annotations over a plotted line series.
///
/// Each event anchors to the plotted sample nearest in time and floats just
/// off the line on the value-axis side away from the base line. Glyphs
/// whose unit-axis spans would collide stack into further lanes.
/// Placement order is stable by time, then id.
pub fn place_events_on_line(
    events: &[EventPoint],
    points: &[DataPoint],
    projection: ChartProjection,
    config: EventPlacementConfig,
) -> ChartResult<Vec<PlacedEvent>> {
    let config = config.validate()?;
    if events.is_empty() {
        return Ok(Vec::new());
    }
    if points.iter().all(|point| point.value.is_missing()) {
        return Err(ChartError::InvalidData(
            "event overlay requires at least one plotted sample".to_owned(),
        ));
    }

    let mut ordered: Vec<&EventPoint> = events.iter().collect();
    ordered.sort_by(|a, b| {
        OrderedFloat(a.time)
            .cmp(&OrderedFloat(b.time))
            .then_with(|| a.id.cmp(&b.id))
    });

    let half = config.glyph_size_px / 2.0;
    let lane_step = config.glyph_size_px + config.lane_gap_px;
    let mut lane_last_edge = Vec::<f64>::new();
    let mut placed = Vec::with_capacity(ordered.len());

    for event in ordered {
        if !event.time.is_finite() {
            return Err(ChartError::InvalidData(
                "event time must be finite".to_owned(),
            ));
        }

        let position = nearest_plotted_position(points, event.time).ok_or_else(|| {
            ChartError::InvalidData("event overlay requires at least one plotted sample".to_owned())
        })?;
        let anchor_value = points[position].value.effective();

        let unit = projection.position_center_px(position);
        let lane = allocate_lane(
            &mut lane_last_edge,
            unit - half,
            unit + half,
            config.min_horizontal_gap_px,
        );
        let offset = config.anchor_offset_px + lane as f64 * lane_step;
        let value_edge = projection.value_px(anchor_value);

        let (x, y) = match projection.orientation() {
            Orientation::Vertical => (unit, value_edge - offset),
            Orientation::Horizontal => (value_edge + offset, unit),
        };

        placed.push(PlacedEvent {
            id: event.id.clone(),
            time: event.time,
            position,
            lane,
            x,
            y,
        });
    }

    Ok(placed)
}

fn nearest_plotted_position(points: &[DataPoint], time: f64) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| !point.value.is_missing())
        .min_by_key(|(_, point)| OrderedFloat((point.time - time).abs()))
        .map(|(index, _)| index)
}

fn allocate_lane(last_edge: &mut Vec<f64>, left: f64, right: f64, min_gap: f64) -> usize {
    for (lane, lane_last_edge) in last_edge.iter_mut().enumerate() {
        if left >= *lane_last_edge + min_gap {
            *lane_last_edge = right;
            return lane;
        }
    }
    last_edge.push(right);
    last_edge.len() - 1
}
