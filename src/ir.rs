use crate::palette::Rgb;

/// A pixel-space position, origin top-left.
pub type Point = (f64, f64);

/// Horizontal placement of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A list of primitive drawing commands in pixel space.
/// The backend just executes these in order.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Rgb,
    },
    Axis {
        from: Point,
        to: Point,
    },
    GridLine {
        from: Point,
        to: Point,
    },
    Marker {
        series: usize,
        center: Point,
        color: Rgb,
    },
    Polyline {
        series: usize,
        points: Vec<Point>,
        color: Rgb,
    },
    LegendPanel {
        // Top-Left, Bottom-Right
        tl: Point,
        br: Point,
    },
    LegendEntry {
        swatch_tl: Point,
        label: String,
        label_anchor: Point,
        color: Rgb,
    },
    Text {
        text: String,
        anchor: Point,
        h_align: HAlign,
        v_align: VAlign,
    },
}

impl SceneGraph {
    pub fn markers(&self, series: usize) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::Marker {
                series: s, center, ..
            } if *s == series => Some(*center),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
