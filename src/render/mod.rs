//! Change-detected rendering of binned frames.
//!
//! ```text
//! frame → bin → color mode → frame memory → drawing surface
//! ```

mod differ;
mod pipeline;
mod surface;

pub use differ::FrameMemory;
pub use pipeline::{FramePipeline, FrameStats, PipelineError, PipelineTotals};
pub use surface::{CanvasSurface, DrawCommand, DrawingSurface, MirrorTransform, Rect, RecordingSurface};
