//! Full-footprint area averaging.

use super::CellBounds;
use crate::capture::Frame;
use crate::color::Rgb;

/// Floor of the per-channel mean over every in-bounds pixel of the cell.
pub(super) fn average(frame: &Frame, bounds: &CellBounds) -> Rgb {
    let area = bounds.area();
    if area == 0 {
        return Rgb::BLACK;
    }

    let bpp = frame.format().bytes_per_pixel();
    let stride = frame.width() as usize * bpp;
    let pixels = frame.pixels();
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);

    for y in bounds.y..bounds.y + bounds.height {
        let row_start = y as usize * stride + bounds.x as usize * bpp;
        let row = &pixels[row_start..row_start + bounds.width as usize * bpp];
        for px in row.chunks_exact(bpp) {
            r += px[0] as u64;
            g += px[1] as u64;
            b += px[2] as u64;
        }
    }

    Rgb::clamped((r / area) as u32, (g / area) as u32, (b / area) as u32)
}
