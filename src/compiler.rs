use crate::ir::{DrawCommand, HAlign, Point, SceneGraph, VAlign};
use crate::palette::Rgb;
use crate::scale::{PlotArea, ScaleMapping, MARGIN};
use crate::series::Series;

/// Number of intervals between tick labels on each axis.
const TICK_STEPS: usize = 5;

const X_LABEL_OFFSET: f64 = 15.0;
const Y_LABEL_OFFSET: f64 = 10.0;
const TITLE_Y: f64 = 20.0;

const LEGEND_GAP: f64 = 10.0;
const LEGEND_WIDTH: f64 = 100.0;
const LEGEND_PADDING: f64 = 10.0;
const LEGEND_ROW_HEIGHT: f64 = 20.0;
const LEGEND_LABEL_INDENT: f64 = 30.0;
pub const LEGEND_SWATCH: f64 = 10.0;

/// One series ready to draw: its data-space points and its color.
#[derive(Debug, Clone)]
pub struct SeriesData {
    pub series: Series,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
}

/// Everything the scene is computed from.
#[derive(Debug, Clone)]
pub struct ChartModel {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub mapping: ScaleMapping,
    pub series: Vec<SeriesData>,
}

/// Compile the chart model into a SceneGraph of drawing commands.
///
/// Stages are appended in paint order and never look at what a later stage
/// produces.
pub fn compile_scene(model: &ChartModel) -> SceneGraph {
    let area = model.mapping.area();
    let mut commands = vec![DrawCommand::Clear { color: Rgb::WHITE }];

    commands.extend(axes(&area));
    commands.extend(tick_labels(&model.mapping));
    commands.extend(grid_lines(&area));
    for data in &model.series {
        commands.extend(series_geometry(data, &model.mapping));
    }
    commands.extend(legend(&model.series, model.width));
    commands.push(DrawCommand::Text {
        text: model.title.clone(),
        anchor: (f64::from(model.width) / 2.0, TITLE_Y),
        h_align: HAlign::Center,
        v_align: VAlign::Center,
    });

    SceneGraph {
        width: model.width,
        height: model.height,
        commands,
    }
}

/// Fractions `0, 1/5, ..., 1` along an axis.
fn tick_fractions() -> impl Iterator<Item = f64> {
    (0..=TICK_STEPS).map(|i| i as f64 / TICK_STEPS as f64)
}

fn tick_x(area: &PlotArea, t: f64) -> f64 {
    area.left + t * area.width()
}

fn tick_y(area: &PlotArea, t: f64) -> f64 {
    area.bottom - t * area.height()
}

fn axes(area: &PlotArea) -> [DrawCommand; 2] {
    [
        DrawCommand::Axis {
            from: (area.left, area.bottom),
            to: (area.right, area.bottom),
        },
        DrawCommand::Axis {
            from: (area.left, area.top),
            to: (area.left, area.bottom),
        },
    ]
}

fn format_tick(value: f64) -> String {
    format!("{:.1}", value)
}

fn tick_labels(mapping: &ScaleMapping) -> Vec<DrawCommand> {
    let area = mapping.area();
    let display_x = mapping.display_x();
    let y_bounds = mapping.y_bounds();

    let x_labels = tick_fractions().map(|t| DrawCommand::Text {
        text: format_tick(display_x.lerp(t)),
        anchor: (tick_x(&area, t), area.bottom + X_LABEL_OFFSET),
        h_align: HAlign::Center,
        v_align: VAlign::Bottom,
    });
    let y_labels = tick_fractions().map(|t| DrawCommand::Text {
        text: format_tick(y_bounds.lerp(t)),
        anchor: (area.left - Y_LABEL_OFFSET, tick_y(&area, t)),
        h_align: HAlign::Right,
        v_align: VAlign::Center,
    });

    x_labels.chain(y_labels).collect()
}

fn grid_lines(area: &PlotArea) -> Vec<DrawCommand> {
    let vertical = tick_fractions().map(|t| {
        let x = tick_x(area, t);
        DrawCommand::GridLine {
            from: (x, area.top),
            to: (x, area.bottom),
        }
    });
    let horizontal = tick_fractions().map(|t| {
        let y = tick_y(area, t);
        DrawCommand::GridLine {
            from: (area.left, y),
            to: (area.right, y),
        }
    });

    vertical.chain(horizontal).collect()
}

/// Line through the mapped points with a marker on each. Points cropped by
/// the mapping are left out; an empty series yields nothing.
fn series_geometry(data: &SeriesData, mapping: &ScaleMapping) -> Vec<DrawCommand> {
    let points: Vec<Point> = data
        .points
        .iter()
        .filter_map(|&(x, y)| mapping.map_point(x, y))
        .collect();

    let mut commands = Vec::with_capacity(points.len() + 1);
    if points.len() > 1 {
        commands.push(DrawCommand::Polyline {
            series: data.series.position,
            points: points.clone(),
            color: data.color,
        });
    }
    commands.extend(points.into_iter().map(|center| DrawCommand::Marker {
        series: data.series.position,
        center,
        color: data.color,
    }));
    commands
}

fn legend(series: &[SeriesData], width: u32) -> Vec<DrawCommand> {
    let left = f64::from(width) - MARGIN + LEGEND_GAP;
    let top = MARGIN;
    let height = series.len() as f64 * LEGEND_ROW_HEIGHT + 2.0 * LEGEND_PADDING;

    let mut commands = vec![DrawCommand::LegendPanel {
        tl: (left, top),
        br: (left + LEGEND_WIDTH, top + height),
    }];

    for (row, data) in series.iter().enumerate() {
        let y = top + LEGEND_PADDING + row as f64 * LEGEND_ROW_HEIGHT;
        commands.push(DrawCommand::LegendEntry {
            swatch_tl: (left + LEGEND_PADDING, y),
            label: data.series.name.clone(),
            label_anchor: (left + LEGEND_LABEL_INDENT, y + LEGEND_SWATCH / 2.0),
            color: data.color,
        });
    }
    commands
}
