//! Live Mosaic Library
//!
//! Turns a live RGB video feed into a low-resolution, palette-quantized
//! mosaic and redraws only the cells whose color changed since the
//! previous frame.
//!
//! # Architecture
//!
//! One frame flows through the pipeline per display tick:
//!
//! ```text
//! capture → binning → color mode → frame memory → drawing surface
//! ```
//!
//! - **capture**: the pixel source ([`Camera`]) and configuration
//! - **binning**: grid geometry plus average or sample cell reduction
//! - **color**: bit-depth truncation and nearest-palette matching
//! - **render**: redraw suppression and the mirrored draw pass
//!
//! Everything runs on a single thread. The [`FramePipeline`] owns the
//! resolved configuration and the per-cell frame memory.
//!
//! # Example
//!
//! ```no_run
//! use live_mosaic::{
//!     capture::{Camera, CaptureConfig, MockCamera, MosaicConfig},
//!     color::Rgb,
//!     render::{CanvasSurface, FramePipeline},
//! };
//!
//! let capture = CaptureConfig::default();
//! let mut camera = MockCamera::new();
//! camera.open(&capture).unwrap();
//!
//! let mut pipeline = FramePipeline::new(&MosaicConfig::default()).unwrap();
//! let mut canvas = CanvasSurface::new(capture.width, capture.height, Rgb::new(25, 25, 25));
//!
//! for _ in 0..10 {
//!     let stats = pipeline.tick(&mut camera, &mut canvas).unwrap();
//!     println!("redrew {} of {} cells", stats.emitted, stats.cells);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod binning;
pub mod capture;
pub mod color;
pub mod metrics;
pub mod render;

// Re-export commonly used types at crate root
pub use binning::{BinningStrategy, CellRecord, GridGeometry};
pub use capture::{Camera, CaptureConfig, ConfigError, FileConfig, Frame, MockCamera, MosaicConfig};
pub use color::{ColorMode, Palette, PaletteStore, Rgb};
pub use render::{CanvasSurface, DrawingSurface, FrameMemory, FramePipeline, FrameStats, RecordingSurface};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
