//! Color representation and reduction.
//!
//! Cell colors leave the binner as full 24-bit triples. This module holds
//! the two ways of coarsening them: bit-depth truncation and nearest-entry
//! palette matching. Palettes are decoded from `#RRGGBB` text once at
//! startup and are read-only afterwards.

mod bit_depth;
mod mode;
mod palette;
mod rgb;

pub use bit_depth::{reduce, reduce_rgb, MAX_BITS, MIN_BITS};
pub use mode::ColorMode;
pub use palette::{Palette, PaletteError, PaletteStore};
pub(crate) use palette::CGA_16;
pub use rgb::{ParseColorError, Rgb};
