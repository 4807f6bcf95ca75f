//! Drawing primitives that write straight into a framebuffer's color buffer

use super::bitmap::Bitmap;
use super::framebuffer::Framebuffer;
use super::types::Color;

/// Byte offset of (x, y) in the color buffer, or None if it is off-screen.
fn offset(fb: &Framebuffer, x: i64, y: i64) -> Option<usize> {
    if x < 0 || y < 0 || x >= fb.width as i64 || y >= fb.height as i64 {
        return None;
    }
    Some((x as usize + y as usize * fb.width) * 4)
}

fn plot(fb: &mut Framebuffer, x: i64, y: i64, color: Color) -> bool {
    match offset(fb, x, y) {
        Some(i) => {
            fb.color[i] = color.r;
            fb.color[i + 1] = color.g;
            fb.color[i + 2] = color.b;
            true
        }
        None => false,
    }
}

/// Write the RGB of `color` at (x, y). Alpha is left as it was.
/// Returns false (and writes nothing) when the point is outside the framebuffer.
pub fn pixel(fb: &mut Framebuffer, x: i32, y: i32, color: Color) -> bool {
    plot(fb, x as i64, y as i64, color)
}

/// Draw a line from (x0, y0) to (x1, y1) with an accumulated-error stepper.
///
/// Endpoints are swapped so y never decreases. Steep lines walk y over
/// `y0..y1` and leave the last row unplotted; shallow lines plot
/// `|x1 - x0| + 1` pixels and step y by +1, which only holds because of the
/// swap above.
pub fn line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let (x0, y0, x1, y1) = if y1 < y0 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };
    // Widened so spans across the whole i32 range can't overflow
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

    let dx = x1 - x0;
    let dy = y1 - y0;

    // Nothing to plot if the bounding box misses the framebuffer
    if x0.max(x1) < 0 || x0.min(x1) >= fb.width as i64 || y1 < 0 || y0 >= fb.height as i64 {
        return;
    }

    let d = if x1 > x0 { 1 } else { -1 };
    let mut err = 0.0f64;

    if dy.abs() > dx.abs() {
        let d_err = (dx as f64 / dy as f64).abs();
        let mut x = x0;
        for y in y0..y1 {
            plot(fb, x, y, color);
            err += d_err;
            if err > 0.5 {
                err -= 1.0;
                x += d;
            }
        }
    } else {
        // dx == 0 here means a single point
        let d_err = if dx == 0 { 0.0 } else { (dy as f64 / dx as f64).abs() };
        let mut x = x0;
        let mut y = y0;
        for _ in 0..=dx.abs() {
            plot(fb, x, y, color);
            x += d;
            err += d_err;
            if err > 0.5 {
                err -= 1.0;
                y += 1;
            }
        }
    }
}

/// Copy a bitmap into the framebuffer with its top-left corner at (x, y).
/// Fully transparent source pixels are skipped, as is anything off-screen.
pub fn bitmap(fb: &mut Framebuffer, image: &Bitmap, x: i32, y: i32) {
    for sy in 0..image.height {
        for sx in 0..image.width {
            let Some([r, g, b, a]) = image.get_pixel(sx, sy) else {
                continue;
            };
            if a == 0 {
                continue;
            }
            plot(fb, x as i64 + sx as i64, y as i64 + sy as i64, Color::with_alpha(r, g, b, a));
        }
    }
}
