use super::style::{NodeStyle, Shape};
use super::{FlowNode, Flowchart};
use crate::config::RenderConfig;
use crate::error::SynthesisError;
use ab_glyph::{FontArc, PxScale};
use ahash::AHashMap;
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_ellipse_mut, draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size,
};
use imageproc::point::Point;
use std::fs;
use std::path::Path;
use tracing::debug;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const EDGE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const EDGE_WIDTH: f64 = 0.03;
const ARROW_LENGTH: f64 = 0.15;
const ARROW_HALF_WIDTH: f64 = 0.08;
/// Text heights in world units.
const LABEL_HEIGHT: f64 = 0.2;
const TITLE_HEIGHT: f64 = 0.3;
/// Title centre, measured up from the first node.
const TITLE_OFFSET: f64 = 0.7;
/// Edge labels sit this far right of the edge midpoint.
const EDGE_LABEL_OFFSET: f64 = 0.5;

type WorldPoint = (f64, f64);

/// Lays the chain out on one vertical axis and writes it as a PNG.
///
/// Every node is drawn at its stored position with the fixed style of its kind and its
/// label centred inside. Each edge becomes a straight arrow from the bottom of its source
/// to the top of its target. The title sits above the first node. The output is PNG
/// whatever the file extension.
pub fn render_flowchart(
    flowchart: &Flowchart,
    config: &RenderConfig,
    output_path: &Path,
) -> Result<(), SynthesisError> {
    let font = load_font(config)?;
    let mut canvas = Canvas::for_flowchart(flowchart, config);

    if let Some(first) = flowchart.nodes.first() {
        let (x, y) = first.position;
        canvas.draw_text_centered(&font, &flowchart.title, (x, y + TITLE_OFFSET), TITLE_HEIGHT);
    }

    let mut anchors: AHashMap<&str, (WorldPoint, NodeStyle)> = AHashMap::new();
    for node in &flowchart.nodes {
        let style = NodeStyle::for_kind(node.kind);
        canvas.draw_node(node, &style, &font);
        anchors.insert(node.id.as_str(), (node.position, style));
    }

    for edge in &flowchart.edges {
        let (Some((from, from_style)), Some((to, to_style))) =
            (anchors.get(edge.from_id.as_str()), anchors.get(edge.to_id.as_str()))
        else {
            continue;
        };
        let direction = if to.1 <= from.1 { 1.0 } else { -1.0 };
        let start = (from.0, from.1 - direction * from_style.half_height);
        let tip = (to.0, to.1 + direction * to_style.half_height);
        canvas.draw_arrow(start, tip);

        if !edge.label.is_empty() {
            let middle = ((start.0 + tip.0) / 2.0 + EDGE_LABEL_OFFSET, (start.1 + tip.1) / 2.0);
            canvas.draw_text_centered(&font, &edge.label, middle, LABEL_HEIGHT);
        }
    }

    canvas
        .image
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| SynthesisError::Render {
            path: output_path.display().to_string(),
            message: e.to_string(),
        })
}

fn load_font(config: &RenderConfig) -> Result<FontArc, SynthesisError> {
    match &config.font_path {
        Some(path) => {
            let bytes = fs::read(path).map_err(|e| SynthesisError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            FontArc::try_from_vec(bytes).map_err(|e| SynthesisError::Render {
                path: path.display().to_string(),
                message: format!("invalid font: {}", e),
            })
        }
        None => FontArc::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT).map_err(|e| {
            SynthesisError::Render {
                path: "bundled font".to_string(),
                message: e.to_string(),
            }
        }),
    }
}

/// A raster surface addressed in world units.
struct Canvas {
    image: RgbaImage,
    pixels_per_unit: f64,
    x_min: f64,
    y_top: f64,
}

impl Canvas {
    fn for_flowchart(flowchart: &Flowchart, config: &RenderConfig) -> Self {
        let (y_max, y_min) = flowchart
            .nodes
            .iter()
            .map(|n| n.position.1)
            .fold((0.0_f64, 0.0_f64), |(hi, lo), y| (hi.max(y), lo.min(y)));
        let y_top = y_max + config.margin_units;
        let span = y_top - (y_min - config.margin_units);

        let max_height = config.max_height_px.max(1);
        let mut pixels_per_unit = config.pixels_per_unit.max(1) as f64;
        if span * pixels_per_unit > max_height as f64 {
            pixels_per_unit = max_height as f64 / span;
            debug!(
                pixels_per_unit,
                max_height, "Scaled flowchart down to fit the height limit"
            );
        }

        let width = (config.width_units * pixels_per_unit).ceil().max(1.0) as u32;
        let height = ((span * pixels_per_unit).ceil().max(1.0) as u32).min(max_height);

        Self {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
            pixels_per_unit,
            x_min: -config.width_units / 2.0,
            y_top,
        }
    }

    fn to_screen(&self, (x, y): WorldPoint) -> (f32, f32) {
        (
            ((x - self.x_min) * self.pixels_per_unit) as f32,
            ((self.y_top - y) * self.pixels_per_unit) as f32,
        )
    }

    fn to_pixel(&self, point: WorldPoint) -> Point<i32> {
        let (x, y) = self.to_screen(point);
        Point::new(x.round() as i32, y.round() as i32)
    }

    /// Border colour fills the shape grown by half the border width, then the fill colour
    /// covers the shape shrunk by the same amount.
    fn draw_node(&mut self, node: &FlowNode, style: &NodeStyle, font: &FontArc) {
        let half_border = style.border_width / 2.0;
        let outer = style.inflated(half_border);
        let inner = style.inflated(-half_border);
        match style.shape {
            Shape::Oval => {
                self.fill_ellipse(node.position, &outer, style.border);
                self.fill_ellipse(node.position, &inner, style.fill);
            }
            Shape::Diamond | Shape::Rectangle | Shape::Parallelogram => {
                self.fill_outline(node.position, &outer, style.border);
                self.fill_outline(node.position, &inner, style.fill);
            }
        }
        self.draw_text_centered(font, &node.label, node.position, LABEL_HEIGHT);
    }

    fn fill_outline(&mut self, (x, y): WorldPoint, style: &NodeStyle, color: Rgba<u8>) {
        if let Some(outline) = style.outline(x, y) {
            let points = outline.into_iter().map(|p| self.to_pixel(p)).collect();
            self.fill_polygon(points, color);
        }
    }

    fn fill_ellipse(&mut self, center: WorldPoint, style: &NodeStyle, color: Rgba<u8>) {
        let center = self.to_pixel(center);
        let rx = (style.half_width * self.pixels_per_unit).round().max(1.0) as i32;
        let ry = (style.half_height * self.pixels_per_unit).round().max(1.0) as i32;
        draw_filled_ellipse_mut(&mut self.image, (center.x, center.y), rx, ry, color);
    }

    /// Shapes that collapse below three distinct pixels at small scales are skipped.
    fn fill_polygon(&mut self, mut points: Vec<Point<i32>>, color: Rgba<u8>) {
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() >= 3 {
            draw_polygon_mut(&mut self.image, &points, color);
        }
    }

    fn draw_arrow(&mut self, start: WorldPoint, tip: WorldPoint) {
        let (dx, dy) = (tip.0 - start.0, tip.1 - start.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);
        let head = ARROW_LENGTH.min(length);
        let base = (tip.0 - ux * head, tip.1 - uy * head);

        // Screen y points down, so (uy, ux) is perpendicular to the shaft on screen.
        let (a, b) = (self.to_screen(start), self.to_screen(base));
        let (nx, ny) = (uy as f32, ux as f32);
        let strokes = (EDGE_WIDTH * self.pixels_per_unit).round().max(1.0) as i32;
        for k in 0..strokes {
            let offset = (k - strokes / 2) as f32;
            draw_line_segment_mut(
                &mut self.image,
                (a.0 + offset * nx, a.1 + offset * ny),
                (b.0 + offset * nx, b.1 + offset * ny),
                EDGE_COLOR,
            );
        }

        let wing = (-uy * ARROW_HALF_WIDTH, ux * ARROW_HALF_WIDTH);
        let head = vec![
            self.to_pixel(tip),
            self.to_pixel((base.0 + wing.0, base.1 + wing.1)),
            self.to_pixel((base.0 - wing.0, base.1 - wing.1)),
        ];
        self.fill_polygon(head, EDGE_COLOR);
    }

    /// Text too small to read at the current scale is left out.
    fn draw_text_centered(&mut self, font: &FontArc, text: &str, center: WorldPoint, height: f64) {
        let size = (height * self.pixels_per_unit) as f32;
        if text.is_empty() || size < 4.0 {
            return;
        }
        let scale = PxScale::from(size);
        let (width, text_height) = text_size(scale, font, text);
        let center = self.to_pixel(center);
        draw_text_mut(
            &mut self.image,
            TEXT_COLOR,
            center.x - width as i32 / 2,
            center.y - text_height as i32 / 2,
            scale,
            font,
            text,
        );
    }
}
