use crate::compiler::LEGEND_SWATCH;
use crate::error::{PlotError, Result};
use crate::ir::{DrawCommand, HAlign, Point, SceneGraph, VAlign};
use crate::palette::Rgb;
use image::ImageEncoder;
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const AXIS_WIDTH: u32 = 2;
const LINE_WIDTH: u32 = 1;
const MARKER_RADIUS: i32 = 2;
const FONT: (&str, u32) = ("sans-serif", 13);

/// Owns the RGB pixel buffer for one chart.
pub struct Canvas {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        Canvas {
            buffer,
            width,
            height,
        }
    }

    /// Rasterize every command of the scene, in order.
    pub fn draw_scene(&mut self, scene: &SceneGraph) -> Result<()> {
        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();

        for command in &scene.commands {
            draw_command(&root, command)?;
        }

        root.present().map_err(draw_error)?;
        Ok(())
    }

    /// Finalize and encode the canvas as PNG
    pub fn render(self) -> Result<Vec<u8>> {
        let mut png_bytes = Vec::new();
        {
            let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
            encoder.write_image(
                &self.buffer,
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )?;
        }

        Ok(png_bytes)
    }
}

fn draw_error<E: std::error::Error>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn pixel((x, y): Point) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn anchor_pos(h_align: HAlign, v_align: VAlign) -> Pos {
    let h = match h_align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match v_align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    Pos::new(h, v)
}

/// Text needs a system font. A label that cannot be rasterized is skipped
/// with a warning so the rest of the chart still renders.
fn draw_text(
    root: &DrawingArea<BitMapBackend, Shift>,
    text: &str,
    anchor: Point,
    pos: Pos,
) {
    let style = FONT.into_font().color(&BLACK).pos(pos);
    if let Err(e) = root.draw(&Text::new(text, pixel(anchor), style)) {
        warn!("skipping label '{}': {}", text, e);
    }
}

fn draw_command(root: &DrawingArea<BitMapBackend, Shift>, command: &DrawCommand) -> Result<()> {
    match command {
        DrawCommand::Clear { color } => {
            root.fill(&rgb(*color)).map_err(draw_error)?;
        }
        DrawCommand::Axis { from, to } => {
            root.draw(&PathElement::new(
                vec![pixel(*from), pixel(*to)],
                BLACK.stroke_width(AXIS_WIDTH),
            ))
            .map_err(draw_error)?;
        }
        DrawCommand::GridLine { from, to } => {
            root.draw(&PathElement::new(
                vec![pixel(*from), pixel(*to)],
                rgb(Rgb::GRID).stroke_width(LINE_WIDTH),
            ))
            .map_err(draw_error)?;
        }
        DrawCommand::Marker { center, color, .. } => {
            root.draw(&Circle::new(
                pixel(*center),
                MARKER_RADIUS,
                rgb(*color).filled(),
            ))
            .map_err(draw_error)?;
        }
        DrawCommand::Polyline { points, color, .. } => {
            let path: Vec<(i32, i32)> = points.iter().copied().map(pixel).collect();
            root.draw(&PathElement::new(path, rgb(*color).stroke_width(LINE_WIDTH)))
                .map_err(draw_error)?;
        }
        DrawCommand::LegendPanel { tl, br } => {
            let corners = [pixel(*tl), pixel(*br)];
            root.draw(&Rectangle::new(corners, WHITE.filled()))
                .map_err(draw_error)?;
            root.draw(&Rectangle::new(corners, BLACK.stroke_width(LINE_WIDTH)))
                .map_err(draw_error)?;
        }
        DrawCommand::LegendEntry {
            swatch_tl,
            label,
            label_anchor,
            color,
        } => {
            let swatch_br = (swatch_tl.0 + LEGEND_SWATCH, swatch_tl.1 + LEGEND_SWATCH);
            root.draw(&Rectangle::new(
                [pixel(*swatch_tl), pixel(swatch_br)],
                rgb(*color).filled(),
            ))
            .map_err(draw_error)?;
            draw_text(
                root,
                label,
                *label_anchor,
                anchor_pos(HAlign::Left, VAlign::Center),
            );
        }
        DrawCommand::Text {
            text,
            anchor,
            h_align,
            v_align,
        } => {
            draw_text(root, text, *anchor, anchor_pos(*h_align, *v_align));
        }
    }
    Ok(())
}
