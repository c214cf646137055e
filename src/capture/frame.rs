//! Frame type representing one captured RGB(A) raster.

use crate::color::Rgb;
use std::time::Instant;

/// Byte layout of a frame's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Three bytes per pixel.
    #[default]
    Rgb,
    /// Four bytes per pixel; alpha is ignored.
    Rgba,
}

impl PixelFormat {
    /// Bytes used by one pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A single raster from the pixel source.
///
/// Rows are stored top to bottom, pixels left to right.
#[derive(Clone)]
pub struct Frame {
    /// Raw interleaved channel bytes.
    pixels: Vec<u8>,
    format: PixelFormat,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Capture timestamp.
    timestamp: Instant,
    /// Monotonic sequence number.
    sequence: u64,
}

impl Frame {
    /// Creates an RGB frame.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        Self::with_format(pixels, PixelFormat::Rgb, width, height, sequence)
    }

    /// Creates a frame with an explicit pixel layout.
    pub fn with_format(
        pixels: Vec<u8>,
        format: PixelFormat,
        width: u32,
        height: u32,
        sequence: u64,
    ) -> Self {
        Self {
            pixels,
            format,
            width,
            height,
            timestamp: Instant::now(),
            sequence,
        }
    }

    /// Builds an RGB frame by evaluating `f` at every pixel.
    pub fn from_fn(width: u32, height: u32, sequence: u64, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                pixels.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Self::new(pixels, width, height, sequence)
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the pixel layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the capture timestamp.
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates that the pixel buffer size matches dimensions and format.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.pixel_count() * self.format.bytes_per_pixel()
    }

    /// Reads the color at `(x, y)`.
    ///
    /// Callers must stay in bounds and only use valid frames.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let offset = (y as usize * self.width as usize + x as usize) * self.format.bytes_per_pixel();
        Rgb::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        )
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("sequence", &self.sequence)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}
