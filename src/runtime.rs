// Runtime executor: data and config in, PNG out

use crate::bounds;
use crate::compiler::{self, ChartModel, SeriesData};
use crate::config::ChartConfig;
use crate::data::{PlotData, X_INDEX};
use crate::error::Result;
use crate::filter;
use crate::graph::Canvas;
use crate::palette;
use crate::scale::{PlotArea, ScaleMapping};
use crate::series;
use anyhow::Context;
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Run the data side of the pipeline: synthesize X, resolve series, filter,
/// thin, and compute the scale mapping.
pub fn build_model(config: &ChartConfig, data: PlotData) -> Result<ChartModel> {
    config.validate()?;

    let data = data.with_x_column(config.x_from_data);
    let index = data.column_index();
    let selected = series::resolve_all(&config.columns, &index);

    let filtered = filter::filter_rows(&data.rows, X_INDEX, config.max_x);
    // X bounds are taken before thinning so a rescale does not depend on the stride
    let x_bounds = bounds::x_bounds(&filtered, X_INDEX);
    let thinned = filter::thin(&filtered, config.skip);
    let y_bounds = bounds::y_bounds(&thinned, &selected)?;
    debug!(
        "{} rows after filtering, {} after thinning; x {:?}, y {:?}",
        filtered.len(),
        thinned.len(),
        x_bounds,
        y_bounds
    );

    let area = PlotArea::new(config.size.width, config.size.height);
    let mapping = ScaleMapping::new(area, x_bounds, config.display_range, y_bounds);

    let colors = palette::generate(config.columns.len());
    let series = selected
        .into_iter()
        .map(|s| {
            let points = s.points(&thinned, X_INDEX);
            let color = colors[s.position];
            SeriesData {
                series: s,
                points,
                color,
            }
        })
        .collect();

    Ok(ChartModel {
        width: config.size.width,
        height: config.size.height,
        title: config.title.clone(),
        mapping,
        series,
    })
}

/// Render a chart to PNG bytes
pub fn render_chart(config: &ChartConfig, data: PlotData) -> Result<Vec<u8>> {
    let model = build_model(config, data)?;
    let scene = compiler::compile_scene(&model);

    let mut canvas = Canvas::new(scene.width, scene.height);
    canvas.draw_scene(&scene)?;
    canvas.render()
}

/// Load `data_path`, render it, and write the PNG to `out`. Nothing is
/// written when any earlier step fails.
pub fn render_to_file(config: &ChartConfig, data_path: &Path, out: &Path) -> anyhow::Result<()> {
    let data = PlotData::load(data_path)
        .with_context(|| format!("Failed to load data from {}", data_path.display()))?;

    let png_bytes = render_chart(config, data).context("Failed to render chart")?;

    let mut file = File::create(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    file.write_all(&png_bytes)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    file.flush()
        .with_context(|| format!("Failed to flush {}", out.display()))?;

    debug!("wrote {} bytes to {}", png_bytes.len(), out.display());
    Ok(())
}
