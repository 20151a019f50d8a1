//! Rasterization primitives and scene rasterizer.
//!
//! [`rasterize`] replays a [`Scene`] into a [`Framebuffer`] at an
//! oversampling factor: every coordinate and size is multiplied by the
//! factor, so a 2.0x render has twice the pixel density of the logical
//! layout.

pub mod primitives;
pub mod text;

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::scene::{Scene, SceneNode};

use primitives::{
    draw_circle, draw_dashed_line_aa, draw_rect_outline, draw_rect_rounded_top,
    draw_thick_line_aa,
};
use text::{draw_text, draw_text_rot90};

/// Rasterize a scene at the given oversampling factor.
///
/// # Errors
///
/// Returns an error if the scaled canvas has a zero dimension.
pub fn rasterize(scene: &Scene, factor: f64) -> Result<Framebuffer> {
    let width = (scene.width * factor).ceil() as u32;
    let height = (scene.height * factor).ceil() as u32;
    let mut fb = Framebuffer::new(width, height)?;
    fb.clear(scene.background);

    let f = factor as f32;
    for node in &scene.nodes {
        draw_node(&mut fb, node, f);
    }

    Ok(fb)
}

fn draw_node(fb: &mut Framebuffer, node: &SceneNode, f: f32) {
    match node {
        SceneNode::Rect { x, y, w, h, corner_radius, fill } => {
            draw_rect_rounded_top(
                fb,
                (*x as f32 * f).round() as i32,
                (*y as f32 * f).round() as i32,
                (*w as f32 * f).round().max(0.0) as u32,
                (*h as f32 * f).round().max(0.0) as u32,
                *corner_radius as f32 * f,
                *fill,
            );
        }
        SceneNode::Frame { x, y, w, h, color } => {
            draw_rect_outline(
                fb,
                (*x as f32 * f).round() as i32,
                (*y as f32 * f).round() as i32,
                (*w as f32 * f).round().max(0.0) as u32,
                (*h as f32 * f).round().max(0.0) as u32,
                *color,
                f.round().max(1.0) as u32,
            );
        }
        SceneNode::Line { x0, y0, x1, y1, width, dash, color } => {
            let stroke = (*width as f32 * f).max(1.0);
            match dash {
                Some((on, off)) => draw_dashed_line_aa(
                    fb,
                    *x0 as f32 * f,
                    *y0 as f32 * f,
                    *x1 as f32 * f,
                    *y1 as f32 * f,
                    stroke,
                    (*on as f32 * f, *off as f32 * f),
                    *color,
                ),
                None => draw_thick_line_aa(
                    fb,
                    *x0 as f32 * f,
                    *y0 as f32 * f,
                    *x1 as f32 * f,
                    *y1 as f32 * f,
                    stroke,
                    *color,
                ),
            }
        }
        SceneNode::Polyline { points, width, color } => {
            let stroke = (*width as f32 * f).max(1.0);
            for pair in points.windows(2) {
                draw_thick_line_aa(
                    fb,
                    pair[0].0 as f32 * f,
                    pair[0].1 as f32 * f,
                    pair[1].0 as f32 * f,
                    pair[1].1 as f32 * f,
                    stroke,
                    *color,
                );
            }
            // Round the joints so thick segments meet cleanly.
            if stroke > 2.0 {
                for &(px, py) in points.iter().skip(1).take(points.len().saturating_sub(2)) {
                    draw_circle(
                        fb,
                        (px as f32 * f).round() as i32,
                        (py as f32 * f).round() as i32,
                        (stroke / 2.0).round() as i32,
                        *color,
                    );
                }
            }
        }
        SceneNode::Circle { cx, cy, radius, color } => {
            draw_circle(
                fb,
                (*cx as f32 * f).round() as i32,
                (*cy as f32 * f).round() as i32,
                (*radius as f32 * f).round() as i32,
                *color,
            );
        }
        SceneNode::Text { x, y, content, size, color, bold, align, rot90 } => {
            if *rot90 {
                draw_text_rot90(
                    fb,
                    content,
                    *x as f32 * f,
                    *y as f32 * f,
                    *size as f32 * f,
                    *color,
                    *bold,
                    *align,
                );
            } else {
                draw_text(
                    fb,
                    content,
                    *x as f32 * f,
                    *y as f32 * f,
                    *size as f32 * f,
                    *color,
                    *bold,
                    *align,
                );
            }
        }
    }
}
