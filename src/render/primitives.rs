//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes the scene rasterizer
//! needs: anti-aliased lines (thin, thick and dashed), filled circles and
//! rectangles with optionally rounded top corners.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Wu's algorithm draws two pixels at each step along the major axis,
/// adjusting their intensities based on the fractional distance from the
/// ideal line position.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // Handle first endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl1, xpxl1, color, rfpart(yend) * xgap);
        plot(fb, ypxl1 + 1, xpxl1, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl1, ypxl1, color, rfpart(yend) * xgap);
        plot(fb, xpxl1, ypxl1 + 1, color, fpart(yend) * xgap);
    }

    let mut intery = yend + gradient;

    // Handle second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl2, xpxl2, color, rfpart(yend) * xgap);
        plot(fb, ypxl2 + 1, xpxl2, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl2, ypxl2, color, rfpart(yend) * xgap);
        plot(fb, xpxl2, ypxl2 + 1, color, fpart(yend) * xgap);
    }

    // Main loop
    if steep {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
            intery += gradient;
        }
    } else {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
            intery += gradient;
        }
    }
}

/// Draw an anti-aliased line of the given stroke width.
///
/// Widths at or below one pixel fall back to a single Wu line; wider
/// strokes are built from unit-spaced parallel Wu lines offset along the
/// perpendicular.
pub fn draw_thick_line_aa(
    fb: &mut Framebuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    width: f32,
    color: Rgba,
) {
    if width <= 1.0 {
        draw_line_aa(fb, x0, y0, x1, y1, color);
        return;
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        let radius = (width / 2.0).round() as i32;
        draw_circle(fb, x0.round() as i32, y0.round() as i32, radius, color);
        return;
    }

    // Unit perpendicular.
    let px = -dy / len;
    let py = dx / len;

    let strands = width.round().max(1.0) as i32;
    let half = (strands - 1) as f32 / 2.0;
    for i in 0..strands {
        let offset = i as f32 - half;
        draw_line_aa(
            fb,
            x0 + px * offset,
            y0 + py * offset,
            x1 + px * offset,
            y1 + py * offset,
            color,
        );
    }
}

/// Draw a dashed anti-aliased line.
///
/// `dash` is the (on, off) pattern in pixels, walked from the start point.
pub fn draw_dashed_line_aa(
    fb: &mut Framebuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    width: f32,
    dash: (f32, f32),
    color: Rgba,
) {
    let (on, off) = dash;
    if on <= 0.0 || off < 0.0 {
        draw_thick_line_aa(fb, x0, y0, x1, y1, width, color);
        return;
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        return;
    }

    let ux = dx / len;
    let uy = dy / len;

    let mut pos = 0.0;
    while pos < len {
        let seg_end = (pos + on).min(len);
        draw_thick_line_aa(
            fb,
            x0 + ux * pos,
            y0 + uy * pos,
            x0 + ux * seg_end,
            y0 + uy * seg_end,
            width,
            color,
        );
        pos += on + off;
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        fb.blend_pixel_coverage(x as u32, y as u32, color, intensity);
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    fb.fill_rect(x, y, width, height, color);
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + (height - thickness) as i32, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness as i32, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(
            x + (width - thickness) as i32,
            y + thickness as i32,
            thickness,
            height - 2 * thickness,
            color,
        );
    }
}

/// Draw a filled rectangle whose top corners are rounded.
///
/// Rows inside the corner radius are inset by the circular profile, so the
/// bar top reads as rounded without touching the flat bottom edge.
pub fn draw_rect_rounded_top(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    radius: f32,
    color: Rgba,
) {
    let radius = radius.max(0.0).min(width as f32 / 2.0).min(height as f32);
    if radius < 0.5 {
        fb.fill_rect(x, y, width, height, color);
        return;
    }

    for row in 0..height {
        let dy = row as f32 + 0.5;
        let inset = if dy < radius {
            let leg = radius - dy;
            radius - (radius * radius - leg * leg).sqrt()
        } else {
            0.0
        };

        let left = x + inset.round() as i32;
        let row_width = (width as f32 - 2.0 * inset.round()).max(0.0) as u32;
        fb.fill_rect(left, y + row as i32, row_width, 1, color);
    }
}

// ============================================================================
// Circle/Point Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        // Horizontal scan lines for each octant pair
        draw_horizontal_line(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_line(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Helper to draw a horizontal line (used by filled circle).
#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0);
    let x_end = (x2 + 1).max(0).min(fb.width() as i32);

    if x_start < x_end {
        fb.fill_rect(x_start, y, (x_end - x_start) as u32, 1, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_line_aa_endpoints_touched() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_line_aa(&mut fb, 10.0, 50.0, 90.0, 50.0, Rgba::BLACK);

        let mid = fb.get_pixel(50, 50).unwrap();
        assert!(mid.r < 128);
    }

    #[test]
    fn test_thick_line_covers_width() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_thick_line_aa(&mut fb, 10.0, 50.0, 90.0, 50.0, 5.0, Rgba::BLACK);

        // Pixels two rows above and below the center are part of the stroke.
        assert!(fb.get_pixel(50, 48).unwrap().r < 128);
        assert!(fb.get_pixel(50, 52).unwrap().r < 128);
        // Five rows away stays white.
        assert_eq!(fb.get_pixel(50, 55), Some(Rgba::WHITE));
    }

    #[test]
    fn test_dashed_line_has_gaps() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_dashed_line_aa(&mut fb, 0.0, 50.0, 99.0, 50.0, 1.0, (6.0, 4.0), Rgba::BLACK);

        let row: Vec<bool> = (0..100)
            .map(|x| fb.get_pixel(x, 50).unwrap().r < 200)
            .collect();
        assert!(row.iter().any(|&on| on));
        assert!(row.iter().any(|&on| !on));
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_rect(&mut fb, 20, 20, 30, 30, Rgba::BLACK);

        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_rect_outline(&mut fb, 20, 20, 30, 30, Rgba::BLACK, 2);

        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(35, 35), Some(Rgba::WHITE));
    }

    #[test]
    fn test_rounded_top_rect_corners_inset() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_rect_rounded_top(&mut fb, 10, 10, 40, 40, 6.0, Rgba::BLACK);

        // Extreme top corners stay background; bottom corners are filled.
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(49, 10), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(10, 49), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(49, 49), Some(Rgba::BLACK));
        // Top edge center is filled.
        assert_eq!(fb.get_pixel(30, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn test_rounded_top_zero_radius_is_plain_rect() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_rect_rounded_top(&mut fb, 10, 10, 20, 20, 0.0, Rgba::BLACK);
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_circle() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_circle(&mut fb, 50, 50, 20, Rgba::BLACK);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_zero_radius() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);

        draw_circle(&mut fb, 50, 50, 0, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_out_of_bounds_is_safe() {
        let mut fb = Framebuffer::new(50, 50).unwrap();
        draw_line_aa(&mut fb, -10.0, -10.0, 60.0, 60.0, Rgba::BLACK);
        draw_circle(&mut fb, -5, -5, 10, Rgba::BLACK);
        draw_rect_rounded_top(&mut fb, 45, 45, 20, 20, 3.0, Rgba::BLACK);
    }
}
