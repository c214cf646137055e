//! Pixel source input and configuration.
//!
//! The pixel source is an external collaborator: anything implementing
//! [`Camera`] that can hand over a fresh [`Frame`] once per tick.

mod camera;
mod config;
mod frame;

pub use camera::{Camera, CameraError, MockCamera};
pub use config::{CaptureConfig, CellSize, ConfigError, FileConfig, MosaicConfig, OutputConfig};
pub use frame::{Frame, PixelFormat};
