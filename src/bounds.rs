use crate::data::{parse_number, Row};
use crate::error::{PlotError, Result};
use crate::series::Series;

/// Closed data-space interval. `Bounds::empty()` has `min > max` until a
/// value is included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Value at fraction `t` of the way from `min` to `max`.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }

    /// An empty interval collapses to `[0, 0]`.
    pub fn or_zero(self) -> Self {
        if self.is_empty() {
            Self::new(0.0, 0.0)
        } else {
            self
        }
    }
}

impl FromIterator<f64> for Bounds {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut bounds = Bounds::empty();
        for value in iter {
            bounds.include(value);
        }
        bounds
    }
}

/// X bounds over the range-filtered rows, before thinning.
pub fn x_bounds(rows: &[&Row], x_index: usize) -> Bounds {
    rows.iter()
        .filter_map(|row| row.get(x_index).and_then(|field| parse_number(field)))
        .collect()
}

/// Y bounds across all series over the thinned rows.
///
/// Fails with [`PlotError::NoValidData`] when no series has a single numeric
/// value, including when no series resolved at all.
pub fn y_bounds(rows: &[&Row], series: &[Series]) -> Result<Bounds> {
    let bounds: Bounds = series.iter().flat_map(move |s| s.values(rows)).collect();
    if bounds.is_empty() {
        return Err(PlotError::NoValidData);
    }
    Ok(bounds)
}
