//! Drawing surfaces and the mirror transform.

use crate::color::Rgb;

/// An axis-aligned rectangle in surface coordinates.
///
/// The origin may be negative: mirrored partial cells can start left of
/// the surface. Surfaces clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Horizontal mirror: `x' = width - x` with the x axis scaled by -1.
///
/// A rectangle spanning `[x, x + w)` lands on `[width - x - w, width - x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorTransform {
    width: u32,
}

impl MirrorTransform {
    /// Mirror across a raster `width` pixels wide.
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// Maps a source-space rectangle to surface space.
    #[inline]
    pub fn apply(&self, x: u32, y: u32, width: u32, height: u32) -> Rect {
        let left = self.width as i64 - x as i64 - width as i64;
        Rect::new(left as i32, y as i32, width, height)
    }
}

/// Receives fill-color and rectangle commands from the pipeline.
pub trait DrawingSurface {
    /// Sets the color used by subsequent `draw_rect` calls.
    fn set_fill_color(&mut self, color: Rgb);

    /// Fills a rectangle with the current fill color.
    fn draw_rect(&mut self, rect: Rect);
}

/// A single recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    /// `set_fill_color` call.
    Fill(Rgb),
    /// `draw_rect` call.
    Rect(Rect),
}

/// Surface that records every call, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Rectangles drawn so far, each paired with its fill color.
    pub fn filled_rects(&self) -> Vec<(Rgb, Rect)> {
        let mut fill = None;
        let mut out = Vec::new();
        for command in &self.commands {
            match *command {
                DrawCommand::Fill(color) => fill = Some(color),
                DrawCommand::Rect(rect) => {
                    if let Some(color) = fill {
                        out.push((color, rect));
                    }
                }
            }
        }
        out
    }

    /// Removes and returns all recorded commands.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Rect(rect));
    }
}

/// In-memory RGB canvas that rasterizes rectangles.
///
/// Cells that are not redrawn keep their previous color, which is what
/// makes per-cell redraw suppression invisible in the output.
#[derive(Clone)]
pub struct CanvasSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    fill: Rgb,
}

impl CanvasSurface {
    /// Creates a canvas cleared to `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
            fill: Rgb::BLACK,
        }
    }

    /// Canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major canvas pixels.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }
}

impl DrawingSurface for CanvasSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn draw_rect(&mut self, rect: Rect) {
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = (rect.x as i64 + rect.width as i64).min(self.width as i64);
        let y1 = (rect.y as i64 + rect.height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize;
        for y in y0 as usize..y1 as usize {
            self.pixels[y * stride + x0 as usize..y * stride + x1 as usize].fill(self.fill);
        }
    }
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill", &self.fill)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_maps_left_edge_to_right_edge() {
        let mirror = MirrorTransform::new(12);
        assert_eq!(mirror.apply(0, 0, 3, 9), Rect::new(9, 0, 3, 9));
        assert_eq!(mirror.apply(9, 9, 3, 9), Rect::new(0, 9, 3, 9));
    }

    #[test]
    fn test_mirror_partial_column_starts_off_canvas() {
        let mirror = MirrorTransform::new(10);
        assert_eq!(mirror.apply(9, 0, 3, 3), Rect::new(-2, 0, 3, 3));
    }

    #[test]
    fn test_recording_pairs_fill_with_rect() {
        let mut surface = RecordingSurface::new();
        surface.set_fill_color(Rgb::WHITE);
        surface.draw_rect(Rect::new(0, 0, 1, 1));
        surface.draw_rect(Rect::new(1, 0, 1, 1));
        surface.set_fill_color(Rgb::BLACK);
        surface.draw_rect(Rect::new(2, 0, 1, 1));

        let rects = surface.filled_rects();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1], (Rgb::WHITE, Rect::new(1, 0, 1, 1)));
        assert_eq!(rects[2].0, Rgb::BLACK);

        assert_eq!(surface.drain().len(), 5);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_canvas_clips() {
        let mut canvas = CanvasSurface::new(4, 4, Rgb::BLACK);
        canvas.set_fill_color(Rgb::WHITE);
        canvas.draw_rect(Rect::new(-2, 2, 3, 5));

        assert_eq!(canvas.get(0, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.get(0, 3), Some(Rgb::WHITE));
        assert_eq!(canvas.get(1, 2), Some(Rgb::BLACK));
        assert_eq!(canvas.get(0, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.get(4, 0), None);
    }

    #[test]
    fn test_canvas_ignores_fully_outside_rect() {
        let mut canvas = CanvasSurface::new(2, 2, Rgb::BLACK);
        canvas.set_fill_color(Rgb::WHITE);
        canvas.draw_rect(Rect::new(-5, 0, 3, 2));
        canvas.draw_rect(Rect::new(2, 0, 3, 2));
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::BLACK));
    }
}
