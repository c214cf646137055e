//! Per-cell redraw suppression.
//!
//! Memory maps a cell's traversal index to the color last emitted for it.
//! Coordinates are not stored: for a fixed geometry an index always names
//! the same cell. The pipeline resets memory whenever the geometry changes.

use crate::color::Rgb;

/// Last emitted color per cell index.
///
/// [`FrameMemory::should_emit`] is not a pure query: a `true` answer also
/// records the new color.
#[derive(Debug, Clone, Default)]
pub struct FrameMemory {
    colors: Vec<Option<Rgb>>,
}

impl FrameMemory {
    /// Creates empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and stores `color` if it differs from the stored color
    /// for `index` or nothing is stored yet. Returns false otherwise.
    pub fn should_emit(&mut self, index: usize, color: Rgb) -> bool {
        if index >= self.colors.len() {
            self.colors.resize(index + 1, None);
        }

        let slot = &mut self.colors[index];
        if *slot == Some(color) {
            return false;
        }
        *slot = Some(color);
        true
    }

    /// The color last emitted for `index`.
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied().flatten()
    }

    /// Number of indices with a stored color.
    pub fn len(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    /// True when no color is stored.
    pub fn is_empty(&self) -> bool {
        self.colors.iter().all(Option::is_none)
    }

    /// Forgets every stored color; the next frame redraws every cell.
    pub fn reset(&mut self) {
        self.colors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_emits() {
        let mut memory = FrameMemory::new();
        assert!(memory.should_emit(3, Rgb::WHITE));
        assert_eq!(memory.get(3), Some(Rgb::WHITE));
        assert_eq!(memory.get(0), None);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_unchanged_color_suppressed() {
        let mut memory = FrameMemory::new();
        assert!(memory.should_emit(0, Rgb::BLACK));
        assert!(!memory.should_emit(0, Rgb::BLACK));
        assert!(!memory.should_emit(0, Rgb::BLACK));
    }

    #[test]
    fn test_changed_color_emits_and_overwrites() {
        let mut memory = FrameMemory::new();
        memory.should_emit(0, Rgb::BLACK);
        assert!(memory.should_emit(0, Rgb::new(0, 0, 1)));
        assert_eq!(memory.get(0), Some(Rgb::new(0, 0, 1)));
        assert!(!memory.should_emit(0, Rgb::new(0, 0, 1)));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut memory = FrameMemory::new();
        memory.should_emit(0, Rgb::BLACK);
        memory.should_emit(1, Rgb::WHITE);

        memory.reset();
        assert!(memory.is_empty());
        assert!(memory.should_emit(0, Rgb::BLACK));
    }
}
