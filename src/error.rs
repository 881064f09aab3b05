use thiserror::Error;

/// Failures the chart pipeline can report.
///
/// Per-cell parse failures never show up here: they only drop the affected
/// point or row.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to read data source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The source held fewer than two records (header plus one row).
    #[error("no data to plot")]
    NoData,

    /// None of the selected series produced a numeric Y value.
    #[error("no valid data for plotting")]
    NoValidData,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PlotError>;
