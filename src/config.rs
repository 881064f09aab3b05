use crate::error::{PlotError, Result};
use crate::scale::DisplayRange;
use log::debug;
use nom::{
    character::complete::{char, multispace0, one_of, u32 as dimension},
    combinator::all_consuming,
    number::complete::double,
    sequence::{delimited, separated_pair},
    IResult,
};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_TITLE: &str = "Scatter Plot from CSV";

/// Canvas dimensions in pixels, written `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 768,
            height: 512,
        }
    }
}

impl FromStr for CanvasSize {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_size(s)
    }
}

impl TryFrom<String> for CanvasSize {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self> {
        parse_size(&s)
    }
}

/// Everything one chart invocation needs besides the data itself.
/// Built once, then only read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Series to plot, in legend order.
    pub columns: Vec<String>,
    /// Inclusive upper limit on X; rows above it are dropped.
    #[serde(rename = "range")]
    pub max_x: Option<f64>,
    pub size: CanvasSize,
    /// Plot every Nth row.
    pub skip: NonZeroUsize,
    /// The first column holds X; otherwise X is the row number from 1.
    #[serde(rename = "xdata")]
    pub x_from_data: bool,
    #[serde(rename = "xscale", deserialize_with = "lenient_display_range")]
    pub display_range: Option<DisplayRange>,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            max_x: None,
            size: CanvasSize::default(),
            skip: NonZeroUsize::MIN,
            x_from_data: false,
            display_range: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PlotError::InvalidConfig("no columns to plot".to_string()));
        }
        Ok(())
    }
}

/// Split `a,b,c` into column names. Blank entries are dropped.
pub fn parse_columns(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn size_pair(input: &str) -> IResult<&str, (u32, u32)> {
    separated_pair(ws(dimension), one_of("xX"), ws(dimension))(input)
}

fn range_pair(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(ws(double), char(','), ws(double))(input)
}

/// Parse `WxH`. Both dimensions must be non-zero.
pub fn parse_size(s: &str) -> Result<CanvasSize> {
    let (_, (width, height)) = all_consuming(size_pair)(s)
        .map_err(|_| PlotError::InvalidConfig(format!("invalid size '{}', expected WxH", s)))?;

    if width == 0 || height == 0 {
        return Err(PlotError::InvalidConfig(format!(
            "canvas size must be non-zero, got {}x{}",
            width, height
        )));
    }
    Ok(CanvasSize { width, height })
}

/// Parse `start,end`. Anything malformed, or with `start >= end`, yields
/// `None` and the natural X bounds are used instead.
pub fn parse_display_range(s: &str) -> Option<DisplayRange> {
    let range = all_consuming(range_pair)(s)
        .ok()
        .and_then(|(_, (start, end))| DisplayRange::new(start, end));

    if range.is_none() {
        debug!("ignoring invalid xscale '{}'", s);
    }
    range
}

fn lenient_display_range<'de, D>(deserializer: D) -> std::result::Result<Option<DisplayRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_display_range))
}
