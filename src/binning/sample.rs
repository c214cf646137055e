//! Single-pixel sampling.

use super::CellBounds;
use crate::capture::Frame;
use crate::color::Rgb;

/// The cell's top-left pixel.
#[inline]
pub(super) fn sample(frame: &Frame, bounds: &CellBounds) -> Rgb {
    frame.pixel(bounds.x, bounds.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ignores_rest_of_cell() {
        let frame = Frame::from_fn(3, 3, 0, |x, y| {
            if (x, y) == (1, 1) {
                Rgb::new(1, 2, 3)
            } else {
                Rgb::WHITE
            }
        });
        let bounds = CellBounds {
            index: 0,
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        };
        assert_eq!(sample(&frame, &bounds), Rgb::new(1, 2, 3));
    }
}
