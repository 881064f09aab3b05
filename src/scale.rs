use crate::bounds::Bounds;

/// Inset of the plotting rectangle from every canvas edge, in pixels.
pub const MARGIN: f64 = 60.0;

/// Pixels of rounding slack allowed when deciding whether a point falls
/// inside the plotting rectangle.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Optional X axis interval the data is stretched onto, independent of the
/// data's own extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    start: f64,
    end: f64,
}

impl DisplayRange {
    /// `None` unless both ends are finite and `start < end`.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        (start.is_finite() && end.is_finite() && start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

impl From<DisplayRange> for Bounds {
    fn from(range: DisplayRange) -> Self {
        Bounds::new(range.start, range.end)
    }
}

/// The pixel rectangle series are drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            left: MARGIN,
            top: MARGIN,
            right: f64::from(width) - MARGIN,
            bottom: f64::from(height) - MARGIN,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn contains_x(&self, px: f64) -> bool {
        px >= self.left - EDGE_TOLERANCE && px <= self.right + EDGE_TOLERANCE
    }
}

/// Linear map of `value` from `from` onto `[to_start, to_end]`.
///
/// A degenerate `from` interval maps everything to the middle of the target.
fn interpolate(value: f64, from: Bounds, to_start: f64, to_end: f64) -> f64 {
    if from.is_degenerate() {
        return (to_start + to_end) / 2.0;
    }
    to_start + (value - from.min) / (from.max - from.min) * (to_end - to_start)
}

/// Data space to pixel space for one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapping {
    area: PlotArea,
    data_x: Bounds,
    display_x: Bounds,
    rescale: bool,
    y: Bounds,
}

impl ScaleMapping {
    /// `data_x` are the X bounds of the filtered, unthinned rows. With a
    /// display range, X values are first stretched from `data_x` onto it.
    pub fn new(
        area: PlotArea,
        data_x: Bounds,
        display_range: Option<DisplayRange>,
        y: Bounds,
    ) -> Self {
        let data_x = data_x.or_zero();
        let display_x = display_range.map(Bounds::from).unwrap_or(data_x);
        Self {
            area,
            data_x,
            display_x,
            rescale: display_range.is_some(),
            y,
        }
    }

    pub fn area(&self) -> PlotArea {
        self.area
    }

    /// The X interval shown along the axis.
    pub fn display_x(&self) -> Bounds {
        self.display_x
    }

    pub fn y_bounds(&self) -> Bounds {
        self.y
    }

    /// Raw X into display space; the identity without a display range.
    pub fn normalize_x(&self, x: f64) -> f64 {
        if !self.rescale {
            return x;
        }
        interpolate(x, self.data_x, self.display_x.min, self.display_x.max)
    }

    pub fn x_to_pixel(&self, x: f64) -> f64 {
        interpolate(
            self.normalize_x(x),
            self.display_x,
            self.area.left,
            self.area.right,
        )
    }

    /// Data max lands on the top edge, data min on the bottom edge.
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        interpolate(y, self.y, self.area.bottom, self.area.top)
    }

    /// Pixel position of a data point, or `None` when it falls outside the
    /// horizontal span of the plotting rectangle.
    pub fn map_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let px = self.x_to_pixel(x);
        self.area
            .contains_x(px)
            .then(|| (px, self.y_to_pixel(y)))
    }
}
