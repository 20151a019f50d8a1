//! Bitmap text rasterization.
//!
//! Renders label text from the 8x8 bitmap font, scaled to the requested
//! pixel size with nearest-neighbor sampling. The font is monospaced: each
//! glyph advances by the font size. Bold weight is approximated by
//! overstriking one pixel to the right.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::mark::TextAlign;

/// Glyph cell height and width in font units.
const GLYPH_UNITS: f32 = 8.0;

/// The rendered width of a string at the given size.
#[must_use]
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size
}

#[inline]
fn glyph_bit(glyph: &[u8; 8], col: usize, row: usize) -> bool {
    // Row per byte, least significant bit is the leftmost pixel.
    (glyph[row] >> col) & 1 == 1
}

fn glyph_for(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'))
}

/// Draw horizontal text anchored at `x` with its top edge at `y_top`.
///
/// `align` moves the anchor to the left edge, center or right edge of the
/// rendered string.
pub fn draw_text(
    fb: &mut Framebuffer,
    text: &str,
    x: f32,
    y_top: f32,
    size: f32,
    color: Rgba,
    bold: bool,
    align: TextAlign,
) {
    let width = text_width(text, size);
    let x0 = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width / 2.0,
        TextAlign::Right => x - width,
    };

    let scale = size / GLYPH_UNITS;
    let cell = size.ceil() as i32;

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = glyph_for(ch) else {
            continue;
        };
        let gx = x0 + index as f32 * size;

        for v in 0..cell {
            let row = ((v as f32 + 0.5) / scale) as usize;
            if row >= 8 {
                continue;
            }
            for u in 0..cell {
                let col = ((u as f32 + 0.5) / scale) as usize;
                if col >= 8 || !glyph_bit(&glyph, col, row) {
                    continue;
                }

                let px = (gx + u as f32).round() as i32;
                let py = (y_top + v as f32).round() as i32;
                if px >= 0 && py >= 0 {
                    fb.blend_pixel(px as u32, py as u32, color);
                    if bold {
                        fb.blend_pixel(px as u32 + 1, py as u32, color);
                    }
                }
            }
        }
    }
}

/// Draw text rotated 90 degrees counterclockwise, reading bottom to top.
///
/// The anchor `(x, y_bottom)` is the left edge of the glyph column at the
/// first character's baseline; `align` works along the vertical run.
pub fn draw_text_rot90(
    fb: &mut Framebuffer,
    text: &str,
    x: f32,
    y_bottom: f32,
    size: f32,
    color: Rgba,
    bold: bool,
    align: TextAlign,
) {
    let run = text_width(text, size);
    let y0 = match align {
        TextAlign::Left => y_bottom,
        TextAlign::Center => y_bottom + run / 2.0,
        TextAlign::Right => y_bottom + run,
    };

    let scale = size / GLYPH_UNITS;
    let cell = size.ceil() as i32;

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = glyph_for(ch) else {
            continue;
        };
        let gy = y0 - index as f32 * size;

        // Counterclockwise rotation: glyph rows run rightward, glyph
        // columns run upward from the anchor.
        for u in 0..cell {
            let row = ((u as f32 + 0.5) / scale) as usize;
            if row >= 8 {
                continue;
            }
            for v in 0..cell {
                let col = ((v as f32 + 0.5) / scale) as usize;
                if col >= 8 || !glyph_bit(&glyph, col, row) {
                    continue;
                }

                let px = (x + u as f32).round() as i32;
                let py = (gy - v as f32).round() as i32;
                if px >= 0 && py >= 0 {
                    fb.blend_pixel(px as u32, py as u32, color);
                    if bold {
                        fb.blend_pixel(px as u32, py as u32 + 1, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_pixels(fb: &Framebuffer) -> usize {
        (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get_pixel(x, y).is_some_and(|p| p.r < 128))
            .count()
    }

    #[test]
    fn test_text_width_monospaced() {
        assert!((text_width("abc", 8.0) - 24.0).abs() < f32::EPSILON);
        assert!((text_width("", 11.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut fb = Framebuffer::new(100, 30).unwrap();
        fb.clear(Rgba::WHITE);
        draw_text(&mut fb, "Test", 2.0, 2.0, 8.0, Rgba::BLACK, false, TextAlign::Left);
        assert!(dark_pixels(&fb) > 10);
    }

    #[test]
    fn test_bold_covers_more_pixels() {
        let mut plain = Framebuffer::new(100, 30).unwrap();
        plain.clear(Rgba::WHITE);
        draw_text(&mut plain, "0.82", 2.0, 2.0, 12.0, Rgba::BLACK, false, TextAlign::Left);

        let mut bold = Framebuffer::new(100, 30).unwrap();
        bold.clear(Rgba::WHITE);
        draw_text(&mut bold, "0.82", 2.0, 2.0, 12.0, Rgba::BLACK, true, TextAlign::Left);

        assert!(dark_pixels(&bold) > dark_pixels(&plain));
    }

    #[test]
    fn test_center_alignment_straddles_anchor() {
        let mut fb = Framebuffer::new(100, 30).unwrap();
        fb.clear(Rgba::WHITE);
        draw_text(&mut fb, "ab", 50.0, 5.0, 8.0, Rgba::BLACK, false, TextAlign::Center);

        let left = (0..50).any(|x| (0..30).any(|y| fb.get_pixel(x, y).unwrap().r < 128));
        let right = (50..100).any(|x| (0..30).any(|y| fb.get_pixel(x, y).unwrap().r < 128));
        assert!(left && right);
    }

    #[test]
    fn test_rotated_text_runs_upward_from_anchor() {
        let mut fb = Framebuffer::new(30, 100).unwrap();
        fb.clear(Rgba::WHITE);
        // An 11-char run at size 8 spans 88px up from the anchor at y=90.
        draw_text_rot90(
            &mut fb,
            "Probability",
            5.0,
            90.0,
            8.0,
            Rgba::BLACK,
            false,
            TextAlign::Left,
        );

        let top = (0..50).any(|y| (0..30).any(|x| fb.get_pixel(x, y).unwrap().r < 128));
        let bottom = (50..91).any(|y| (0..30).any(|x| fb.get_pixel(x, y).unwrap().r < 128));
        let below_anchor =
            (92..100).any(|y| (0..30).any(|x| fb.get_pixel(x, y).unwrap().r < 128));
        assert!(top && bottom);
        assert!(!below_anchor);
    }

    #[test]
    fn test_unknown_glyph_falls_back() {
        let mut fb = Framebuffer::new(30, 30).unwrap();
        fb.clear(Rgba::WHITE);
        draw_text(&mut fb, "\u{2603}", 2.0, 2.0, 8.0, Rgba::BLACK, false, TextAlign::Left);
        assert!(dark_pixels(&fb) > 0);
    }
}
