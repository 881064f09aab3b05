// Library exports for csvgraph

pub mod bounds;
pub mod compiler;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod graph;
pub mod ir;
pub mod palette;
pub mod runtime;
pub mod scale;
pub mod series;

pub use config::ChartConfig;
pub use data::PlotData;
pub use error::PlotError;
pub use runtime::{render_chart, render_to_file};
