//! PDF output encoder.
//!
//! Replays a [`Scene`] into a vector PDF page using `printpdf` with the
//! built-in Helvetica fonts. Logical pixels map to the page at 96 dpi
//! (1 px = 0.264583 mm) and the y axis is flipped to the PDF bottom-left
//! origin. Filled shapes go through [`Polygon`], strokes through [`Line`].

use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Pt, Rgb, TextMatrix,
};

use crate::color::Rgba;
use crate::error::Result;
use crate::mark::TextAlign;
use crate::scene::{Scene, SceneNode};

/// Logical pixels to millimeters at 96 dpi.
const PX_TO_MM: f64 = 0.264583;
/// Logical pixels to points at 96 dpi.
const PX_TO_PT: f64 = 0.75;
/// Approximate Helvetica advance as a fraction of the font size.
const TEXT_ADVANCE: f64 = 0.5;
/// Baseline offset from the top of a text run, as a fraction of the size.
const BASELINE: f64 = 0.8;

/// PDF encoder for scene output.
pub struct PdfEncoder;

impl PdfEncoder {
    /// Write a scene to a single-page PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PDF writing fails.
    pub fn write_to_file<P: AsRef<Path>>(scene: &Scene, title: &str, path: P) -> Result<()> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm((scene.width * PX_TO_MM) as f32),
            Mm((scene.height * PX_TO_MM) as f32),
            "Layer 1",
        );
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        let ctx = PdfContext {
            layer: doc.get_page(page).get_layer(layer),
            font,
            font_bold,
            height: scene.height,
        };

        if scene.background != Rgba::WHITE {
            ctx.layer.set_fill_color(rgb(scene.background));
            ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
        }

        for node in &scene.nodes {
            ctx.draw(node);
        }

        let file = File::create(path)?;
        doc.save(&mut BufWriter::new(file))?;
        Ok(())
    }
}

fn rgb(color: Rgba) -> Color {
    let (r, g, b) = color.to_unit_rgb();
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct PdfContext {
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    height: f64,
}

impl PdfContext {
    fn x(&self, px: f64) -> Mm {
        Mm((px * PX_TO_MM) as f32)
    }

    /// Flip from screen-down to the PDF bottom-left origin.
    fn y(&self, px: f64) -> Mm {
        Mm(((self.height - px) * PX_TO_MM) as f32)
    }

    fn rect_ring(&self, x: f64, y: f64, w: f64, h: f64) -> Vec<(Point, bool)> {
        vec![
            (Point::new(self.x(x), self.y(y + h)), false),
            (Point::new(self.x(x + w), self.y(y + h)), false),
            (Point::new(self.x(x + w), self.y(y)), false),
            (Point::new(self.x(x), self.y(y)), false),
        ]
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.layer.add_polygon(Polygon {
            rings: vec![self.rect_ring(x, y, w, h)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn draw(&self, node: &SceneNode) {
        match node {
            SceneNode::Rect { x, y, w, h, fill, .. } => {
                // The corner radius is visually minor at vector scale and is
                // not reproduced here.
                self.layer.set_fill_color(rgb(*fill));
                self.fill_rect(*x, *y, *w, *h);
            }
            SceneNode::Frame { x, y, w, h, color } => {
                self.layer.set_outline_color(rgb(*color));
                self.layer.set_outline_thickness(PX_TO_PT as f32);
                self.layer.add_line(Line {
                    points: self.rect_ring(*x, *y, *w, *h),
                    is_closed: true,
                });
            }
            SceneNode::Line { x0, y0, x1, y1, width, dash, color } => {
                self.layer.set_outline_color(rgb(*color));
                self.layer.set_outline_thickness((width * PX_TO_PT) as f32);
                if let Some((on, off)) = dash {
                    self.layer.set_line_dash_pattern(LineDashPattern {
                        dash_1: Some(on.round() as i64),
                        gap_1: Some(off.round() as i64),
                        ..LineDashPattern::default()
                    });
                }
                self.layer.add_line(Line {
                    points: vec![
                        (Point::new(self.x(*x0), self.y(*y0)), false),
                        (Point::new(self.x(*x1), self.y(*y1)), false),
                    ],
                    is_closed: false,
                });
                if dash.is_some() {
                    self.layer.set_line_dash_pattern(LineDashPattern::default());
                }
            }
            SceneNode::Polyline { points, width, color } => {
                self.layer.set_outline_color(rgb(*color));
                self.layer.set_outline_thickness((width * PX_TO_PT) as f32);
                self.layer.add_line(Line {
                    points: points
                        .iter()
                        .map(|&(px, py)| (Point::new(self.x(px), self.y(py)), false))
                        .collect(),
                    is_closed: false,
                });
            }
            SceneNode::Circle { cx, cy, radius, color } => {
                self.layer.set_fill_color(rgb(*color));
                self.layer.add_polygon(Polygon {
                    rings: vec![self.circle_ring(*cx, *cy, *radius)],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
            SceneNode::Text { x, y, content, size, color, bold, align, rot90 } => {
                self.text(content, *x, *y, *size, *color, *bold, *align, *rot90);
            }
        }
    }

    /// A 16-segment polygonal approximation of a filled circle.
    fn circle_ring(&self, cx: f64, cy: f64, radius: f64) -> Vec<(Point, bool)> {
        const SEGMENTS: usize = 16;
        (0..SEGMENTS)
            .map(|i| {
                let angle = TAU * i as f64 / SEGMENTS as f64;
                let px = cx + radius * angle.cos();
                let py = cy + radius * angle.sin();
                (Point::new(self.x(px), self.y(py)), false)
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &self,
        content: &str,
        x: f64,
        y: f64,
        size: f64,
        color: Rgba,
        bold: bool,
        align: TextAlign,
        rot90: bool,
    ) {
        let font = if bold { &self.font_bold } else { &self.font };
        let size_pt = (size * PX_TO_PT) as f32;
        let run = content.chars().count() as f64 * size * TEXT_ADVANCE;

        self.layer.set_fill_color(rgb(color));

        if rot90 {
            // The run reads bottom to top; the anchor y sits along the run
            // and the baseline is offset into the glyph column.
            let start = match align {
                TextAlign::Left => y,
                TextAlign::Center => y + run / 2.0,
                TextAlign::Right => y + run,
            };
            self.layer.begin_text_section();
            self.layer.set_font(font, size_pt);
            self.layer.set_text_matrix(TextMatrix::TranslateRotate(
                Pt(((x + size * BASELINE) * PX_TO_PT) as f32),
                Pt(((self.height - start) * PX_TO_PT) as f32),
                90.0,
            ));
            self.layer.write_text(content, font);
            self.layer.end_text_section();
        } else {
            let x0 = match align {
                TextAlign::Left => x,
                TextAlign::Center => x - run / 2.0,
                TextAlign::Right => x - run,
            };
            let baseline = y + size * BASELINE;
            self.layer.use_text(content, size_pt, self.x(x0), self.y(baseline), font);
        }
    }
}
