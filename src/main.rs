use anyhow::{Context, Result};
use clap::Parser;
use csvgraph::config::{self, CanvasSize, ChartConfig};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csvgraph")]
#[command(about = "Plot numeric CSV columns as a scatter/line chart PNG", long_about = None)]
struct Args {
    /// Path to the CSV (or JSON array-of-objects) data file
    #[arg(long)]
    data: PathBuf,

    /// Comma-separated columns to plot
    #[arg(long)]
    columns: Option<String>,

    /// Max X value; only points with X <= this are plotted
    #[arg(long)]
    range: Option<f64>,

    /// Output image size, e.g. 768x512
    #[arg(long, value_parser = config::parse_size)]
    size: Option<CanvasSize>,

    /// Data thinning: plot every Nth point
    #[arg(long)]
    skip: Option<NonZeroUsize>,

    /// The first column holds X values
    #[arg(long)]
    xdata: bool,

    /// Map X values onto START,END
    #[arg(long)]
    xscale: Option<String>,

    /// Graph title
    #[arg(long)]
    title: Option<String>,

    /// Output image filename
    #[arg(long, default_value = "scatter_plot.png")]
    out: PathBuf,

    /// JSON file with chart settings; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(ChartConfig, PathBuf, PathBuf)> {
        let mut chart = match &self.config {
            Some(path) => ChartConfig::from_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => ChartConfig::default(),
        };

        if let Some(columns) = &self.columns {
            chart.columns = config::parse_columns(columns);
        }
        if self.range.is_some() {
            chart.max_x = self.range;
        }
        if let Some(size) = self.size {
            chart.size = size;
        }
        if let Some(skip) = self.skip {
            chart.skip = skip;
        }
        if self.xdata {
            chart.x_from_data = true;
        }
        if let Some(xscale) = &self.xscale {
            chart.display_range = config::parse_display_range(xscale);
        }
        if let Some(title) = self.title {
            chart.title = title;
        }

        chart
            .validate()
            .context("Usage: csvgraph --data <FILE> --columns <COLS> [options]")?;
        Ok((chart, self.data, self.out))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let (chart, data, out) = args.into_config()?;

    csvgraph::render_to_file(&chart, &data, &out)?;
    println!("Saved: {}", out.display());

    Ok(())
}
