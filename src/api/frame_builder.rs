use tracing::debug;

use crate::api::chart_config::{ChartConfig, ChartKind, ChartStyle, LegendPosition};
use crate::core::{
    AvailabilityBand, ChartLayout, ChartProjection, DataPointCollection, EventPoint, LayoutSpec,
    MarkerLabel, Orientation, RangeMarks, Rect, TimeLabelCadence, TimeLabelMaker, format_value,
    project_area, project_availability, project_columns, project_high_low, project_polyline,
    project_stacked, resolve_marker_label_collisions,
};
use crate::error::ChartResult;
use crate::extensions::events::{EventPlacementConfig, place_events_on_line};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PolygonPrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive,
};

const NO_DATA_MESSAGE: &str = "No Data Available";
const LABEL_PAD_PX: f64 = 2.0;
const LEGEND_SWATCH_PX: f64 = 10.0;

/// One synchronous layout-and-emit pass over the chart's current data.
pub(crate) fn build_frame(
    config: &ChartConfig,
    collections: &[&DataPointCollection],
    events: &[EventPoint],
) -> ChartResult<RenderFrame> {
    let style = &config.style;

    let statistics = RangeMarks::compute(collections.iter().copied(), config.range)?;
    if !statistics.has_data() {
        debug!(kind = ?config.kind, "rendering no-data placeholder");
        return Ok(no_data_frame(config));
    }
    let marks = match config.kind.fixed_domain() {
        Some((floor, ceiling)) => RangeMarks::fixed(floor, ceiling, config.range.value_lines)?,
        None => statistics.clone(),
    };

    let positions = collections
        .iter()
        .map(|collection| collection.len())
        .max()
        .unwrap_or(0);
    if positions == 0 {
        return Ok(no_data_frame(config));
    }
    let primary = collections[0];

    // Unit-axis labels come first: the layout pass needs their width.
    let cadence = TimeLabelCadence::for_interval_seconds(config.interval_seconds);
    let unit_labels = make_unit_labels(primary, positions, cadence)?;

    let value_labels: Vec<String> = marks
        .ticks()
        .iter()
        .map(|tick| format_value(*tick, config.range.unit))
        .collect();
    let value_label_width_px = text_block_width_px(value_labels.iter(), style.char_width_px);
    let unit_label_width_px =
        text_block_width_px(unit_labels.iter().map(|(_, label)| label), style.char_width_px);

    let legend_names: Vec<&str> = if config.legend == LegendPosition::Hidden {
        Vec::new()
    } else {
        collections
            .iter()
            .map(|collection| collection.name.as_str())
            .collect()
    };
    let legend_rows = estimate_legend_rows(
        &legend_names,
        f64::from(config.viewport.width) - 2.0 * style.margin_px,
        style,
    );

    let spec = LayoutSpec {
        orientation: config.orientation,
        font_size_px: style.font_size_px,
        title_font_size_px: style.title_font_size_px,
        show_top_title: config.top_title.is_some(),
        show_bottom_title: config.bottom_title.is_some(),
        top_legend_rows: if config.legend == LegendPosition::Top {
            legend_rows
        } else {
            0
        },
        bottom_legend_rows: if config.legend == LegendPosition::Bottom {
            legend_rows
        } else {
            0
        },
        value_label_width_px,
        unit_label_width_px,
        tick_length_px: style.tick_length_px,
        border_width_px: style.border_width_px,
        margin_px: style.margin_px,
    };
    let layout = ChartLayout::compute(config.viewport, &spec)?;
    let projection = ChartProjection::new(
        layout.plot,
        config.orientation,
        &marks,
        positions,
        style.unit_inset_px,
    )?;

    let mut frame = RenderFrame::new(config.viewport);
    frame.push_rect(RectPrimitive::filled(
        layout.image.x,
        layout.image.y,
        layout.image.width,
        layout.image.height,
        style.background,
    ));
    // The plot frame goes in before any series rect so bars paint over it;
    // its border stroke is re-drawn as lines on top of the series.
    if style.border_width_px > 0.0 {
        frame.push_rect(
            RectPrimitive::filled(
                layout.plot.x,
                layout.plot.y,
                layout.plot.width,
                layout.plot.height,
                style.background,
            )
            .with_border(style.border_color, style.border_width_px),
        );
    }

    emit_grid(&mut frame, projection, &marks, style);
    emit_series(&mut frame, config, collections, primary, projection)?;
    emit_axes(&mut frame, layout, projection, &marks, &value_labels, &unit_labels, style);

    if config.kind != ChartKind::Availability {
        emit_statistic_markers(&mut frame, config, projection, &statistics);
    }
    if config.kind.supports_events() && !events.is_empty() {
        emit_events(&mut frame, events, primary, projection, style)?;
    }
    emit_titles(&mut frame, config, layout);
    emit_legend(&mut frame, config, layout, &legend_names);

    Ok(frame)
}

fn no_data_frame(config: &ChartConfig) -> RenderFrame {
    let style = &config.style;
    let mut frame = RenderFrame::new(config.viewport);
    frame.push_rect(RectPrimitive::filled(
        0.0,
        0.0,
        f64::from(config.viewport.width),
        f64::from(config.viewport.height),
        style.background,
    ));
    frame.push_text(TextPrimitive::new(
        NO_DATA_MESSAGE,
        f64::from(config.viewport.width) / 2.0,
        (f64::from(config.viewport.height) - style.title_font_size_px) / 2.0,
        style.title_font_size_px,
        style.text_color,
        TextHAlign::Center,
    ));
    frame
}

/// Runs the label maker over every consecutive sample, keeping only the
/// cadence's printed ticks. Feeding all samples preserves the run-length
/// compaction across unprinted positions.
fn make_unit_labels(
    primary: &DataPointCollection,
    positions: usize,
    cadence: TimeLabelCadence,
) -> ChartResult<Vec<(usize, String)>> {
    let mut maker = TimeLabelMaker::new(cadence);
    let step = cadence.label_step();
    let mut labels = Vec::new();
    for index in 0..positions {
        let Some(point) = primary.points.get(index) else {
            break;
        };
        let label = maker.label_for(point.time)?;
        if index % step == 0 {
            labels.push((index, label));
        }
    }
    Ok(labels)
}

fn text_block_width_px<'a, I>(texts: I, char_width_px: f64) -> f64
where
    I: IntoIterator<Item = &'a String>,
{
    texts
        .into_iter()
        .flat_map(|text| text.lines())
        .map(|line| line.chars().count() as f64 * char_width_px)
        .fold(0.0, f64::max)
}

/// Greedy row wrap over estimated legend entry widths.
fn estimate_legend_rows(names: &[&str], strip_width_px: f64, style: &ChartStyle) -> usize {
    if names.is_empty() || strip_width_px <= 0.0 {
        return 0;
    }

    let mut rows = 1usize;
    let mut cursor = 0.0;
    for name in names.iter().copied() {
        let entry = legend_entry_width_px(name, style);
        if cursor + entry > strip_width_px && cursor > 0.0 {
            rows += 1;
            cursor = 0.0;
        }
        cursor += entry;
    }
    rows
}

fn legend_entry_width_px(name: &str, style: &ChartStyle) -> f64 {
    LEGEND_SWATCH_PX + 4.0 + name.chars().count() as f64 * style.char_width_px + 12.0
}

/// Grid lines at every tick except the floor, which the plot border covers.
fn emit_grid(frame: &mut RenderFrame, projection: ChartProjection, marks: &RangeMarks, style: &ChartStyle) {
    let plot = projection.plot();
    for tick in marks.ticks().iter().skip(1) {
        let edge = projection.value_px(*tick);
        let line = match projection.orientation() {
            Orientation::Vertical => {
                LinePrimitive::new(plot.x, edge, plot.right(), edge, 1.0, style.grid_color)
            }
            Orientation::Horizontal => {
                LinePrimitive::new(edge, plot.y, edge, plot.bottom(), 1.0, style.grid_color)
            }
        };
        frame.push_line(line.with_stroke_style(LineStrokeStyle::Dashed));
    }
}

fn emit_series(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    collections: &[&DataPointCollection],
    primary: &DataPointCollection,
    projection: ChartProjection,
) -> ChartResult<()> {
    let style = &config.style;
    match config.kind {
        ChartKind::Column => {
            for bar in project_columns(collections, projection, style.column_fill_ratio)? {
                frame.push_rect(rect_primitive(bar.rect, style.series_color(bar.series)));
            }
        }
        ChartKind::Line | ChartKind::Performance => {
            for (series, collection) in collections.iter().enumerate() {
                let color = style.series_color(series);
                for segment in project_polyline(&collection.points, projection) {
                    frame.push_line(LinePrimitive::new(
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2,
                        style.line_width_px,
                        color,
                    ));
                }
            }
        }
        ChartKind::Area => {
            for (series, collection) in collections.iter().enumerate() {
                let color = style.series_color(series);
                for polygon in project_area(&collection.points, projection) {
                    frame.push_polygon(PolygonPrimitive::new(
                        polygon.vertices,
                        color.with_alpha(style.area_fill_alpha),
                    ));
                }
                for segment in project_polyline(&collection.points, projection) {
                    frame.push_line(LinePrimitive::new(
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2,
                        style.line_width_px,
                        color,
                    ));
                }
            }
        }
        ChartKind::HighLow => {
            let color = style.series_color(0);
            for geometry in project_high_low(&primary.points, projection, style.column_fill_ratio)? {
                frame.push_rect(rect_primitive(geometry.bar, color));
                frame.push_line(LinePrimitive::new(
                    geometry.close_tick.x1,
                    geometry.close_tick.y1,
                    geometry.close_tick.x2,
                    geometry.close_tick.y2,
                    1.0,
                    style.border_color,
                ));
            }
        }
        ChartKind::Availability => {
            for segment in
                project_availability(&primary.points, projection, style.column_fill_ratio)?
            {
                let color = match segment.band {
                    AvailabilityBand::Up => style.up_color,
                    AvailabilityBand::Degraded => style.degraded_color,
                    AvailabilityBand::Down => style.down_color,
                };
                frame.push_rect(rect_primitive(segment.rect, color));
            }
        }
        ChartKind::StackedPerformance => {
            for slice in project_stacked(&primary.points, projection, style.column_fill_ratio)? {
                frame.push_rect(rect_primitive(slice.rect, style.series_color(slice.segment)));
            }
        }
    }
    Ok(())
}

fn rect_primitive(rect: Rect, color: Color) -> RectPrimitive {
    RectPrimitive::filled(rect.x, rect.y, rect.width, rect.height, color)
}

fn emit_axes(
    frame: &mut RenderFrame,
    layout: ChartLayout,
    projection: ChartProjection,
    marks: &RangeMarks,
    value_labels: &[String],
    unit_labels: &[(usize, String)],
    style: &ChartStyle,
) {
    let plot = layout.plot;
    if style.border_width_px > 0.0 {
        let corners = [
            (plot.x, plot.y, plot.right(), plot.y),
            (plot.right(), plot.y, plot.right(), plot.bottom()),
            (plot.right(), plot.bottom(), plot.x, plot.bottom()),
            (plot.x, plot.bottom(), plot.x, plot.y),
        ];
        for (x1, y1, x2, y2) in corners {
            frame.push_line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                style.border_width_px,
                style.border_color,
            ));
        }
    }

    for (tick, label) in marks.ticks().iter().zip(value_labels) {
        let edge = projection.value_px(*tick);
        match projection.orientation() {
            Orientation::Vertical => {
                frame.push_line(LinePrimitive::new(
                    plot.x - style.tick_length_px,
                    edge,
                    plot.x,
                    edge,
                    1.0,
                    style.border_color,
                ));
                frame.push_text(TextPrimitive::new(
                    label.as_str(),
                    plot.x - style.tick_length_px - LABEL_PAD_PX,
                    edge - style.font_size_px / 2.0,
                    style.font_size_px,
                    style.text_color,
                    TextHAlign::Right,
                ));
            }
            Orientation::Horizontal => {
                frame.push_line(LinePrimitive::new(
                    edge,
                    plot.bottom(),
                    edge,
                    plot.bottom() + style.tick_length_px,
                    1.0,
                    style.border_color,
                ));
                frame.push_text(TextPrimitive::new(
                    label.as_str(),
                    edge,
                    plot.bottom() + style.tick_length_px + LABEL_PAD_PX,
                    style.font_size_px,
                    style.text_color,
                    TextHAlign::Center,
                ));
            }
        }
    }

    for (index, label) in unit_labels {
        let center = projection.position_center_px(*index);
        match projection.orientation() {
            Orientation::Vertical => {
                frame.push_line(LinePrimitive::new(
                    center,
                    plot.bottom(),
                    center,
                    plot.bottom() + style.tick_length_px,
                    1.0,
                    style.border_color,
                ));
                frame.push_text(TextPrimitive::new(
                    label.as_str(),
                    center,
                    plot.bottom() + style.tick_length_px + LABEL_PAD_PX,
                    style.font_size_px,
                    style.text_color,
                    TextHAlign::Center,
                ));
            }
            Orientation::Horizontal => {
                frame.push_line(LinePrimitive::new(
                    plot.x - style.tick_length_px,
                    center,
                    plot.x,
                    center,
                    1.0,
                    style.border_color,
                ));
                frame.push_text(TextPrimitive::new(
                    label.as_str(),
                    plot.x - style.tick_length_px - LABEL_PAD_PX,
                    center - style.font_size_px / 2.0,
                    style.font_size_px,
                    style.text_color,
                    TextHAlign::Right,
                ));
            }
        }
    }
}

/// Statistic marker lines with collision-resolved labels, emitted in
/// peak/average/low/baseline order.
fn emit_statistic_markers(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    projection: ChartProjection,
    statistics: &RangeMarks,
) {
    let style = &config.style;
    let mut entries: Vec<(&str, f64, Color)> = Vec::new();
    if config.show_peak {
        entries.push(("Peak", statistics.peak(), style.peak_color));
    }
    if config.show_average {
        entries.push(("Avg", statistics.average(), style.average_color));
    }
    if config.show_low {
        entries.push(("Low", statistics.low(), style.low_color));
    }
    if let Some(baseline) = config.baseline {
        entries.push(("Baseline", baseline, style.baseline_color));
    }
    if entries.is_empty() {
        return;
    }

    let plot = projection.plot();
    let label_height = style.font_size_px + 2.0;
    let mut labels = Vec::with_capacity(entries.len());
    let mut colors = Vec::with_capacity(entries.len());

    for (prefix, value, color) in entries {
        let edge = projection.value_px(value);
        let line = match projection.orientation() {
            Orientation::Vertical => {
                LinePrimitive::new(plot.x, edge, plot.right(), edge, 1.0, color)
            }
            Orientation::Horizontal => {
                LinePrimitive::new(edge, plot.y, edge, plot.bottom(), 1.0, color)
            }
        };
        frame.push_line(line.with_stroke_style(LineStrokeStyle::Dashed));

        let text = format!("{prefix} {}", format_value(value, config.range.unit));
        let width_px = text.chars().count() as f64 * style.char_width_px;
        let (x, y) = match projection.orientation() {
            Orientation::Vertical => (
                plot.right() - width_px - LABEL_PAD_PX,
                edge - label_height - 1.0,
            ),
            Orientation::Horizontal => (edge + LABEL_PAD_PX, plot.y + LABEL_PAD_PX),
        };
        labels.push(MarkerLabel {
            text,
            x,
            y,
            width_px,
            height_px: label_height,
        });
        colors.push(color);
    }

    resolve_marker_label_collisions(&mut labels, style.char_width_px);
    for (label, color) in labels.into_iter().zip(colors) {
        frame.push_text(TextPrimitive::new(
            label.text,
            label.x,
            label.y,
            style.font_size_px,
            color,
            TextHAlign::Left,
        ));
    }
}

fn emit_events(
    frame: &mut RenderFrame,
    events: &[EventPoint],
    primary: &DataPointCollection,
    projection: ChartProjection,
    style: &ChartStyle,
) -> ChartResult<()> {
    let placement = EventPlacementConfig::default();
    let half = placement.glyph_size_px / 2.0;
    for event in place_events_on_line(events, &primary.points, projection, placement)? {
        frame.push_rect(RectPrimitive::filled(
            event.x - half,
            event.y - half,
            placement.glyph_size_px,
            placement.glyph_size_px,
            style.event_color,
        ));
        frame.push_text(TextPrimitive::new(
            event.id,
            event.x,
            event.y - half - style.font_size_px - LABEL_PAD_PX,
            style.font_size_px,
            style.text_color,
            TextHAlign::Center,
        ));
    }
    Ok(())
}

fn emit_titles(frame: &mut RenderFrame, config: &ChartConfig, layout: ChartLayout) {
    let style = &config.style;
    let strips = [
        (config.top_title.as_deref(), layout.top_title),
        (config.bottom_title.as_deref(), layout.bottom_title),
    ];
    for (title, rect) in strips {
        let (Some(title), Some(rect)) = (title, rect) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }
        frame.push_text(TextPrimitive::new(
            title,
            rect.center_x(),
            rect.y + (rect.height - style.title_font_size_px) / 2.0,
            style.title_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ));
    }
}

fn emit_legend(frame: &mut RenderFrame, config: &ChartConfig, layout: ChartLayout, names: &[&str]) {
    let style = &config.style;
    let rect = match config.legend {
        LegendPosition::Hidden => return,
        LegendPosition::Top => layout.top_legend,
        LegendPosition::Bottom => layout.bottom_legend,
    };
    let Some(rect) = rect else {
        return;
    };

    let row_height = style.font_size_px + 4.0;
    let mut x = rect.x;
    let mut y = rect.y + 2.0;
    for (series, name) in names.iter().copied().enumerate() {
        if name.is_empty() {
            continue;
        }
        let entry = legend_entry_width_px(name, style);
        if x + entry > rect.right() && x > rect.x {
            x = rect.x;
            y += row_height;
        }
        frame.push_rect(RectPrimitive::filled(
            x,
            y + (style.font_size_px - LEGEND_SWATCH_PX).max(0.0) / 2.0,
            LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            style.series_color(series),
        ));
        frame.push_text(TextPrimitive::new(
            name,
            x + LEGEND_SWATCH_PX + 4.0,
            y,
            style.font_size_px,
            style.text_color,
            TextHAlign::Left,
        ));
        x += entry;
    }
}
