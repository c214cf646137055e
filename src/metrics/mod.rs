//! Prometheus metrics exporter for the mosaic pipeline.
//!
//! # Metrics Exposed
//!
//! - `live_mosaic_frames_total` - Frames processed
//! - `live_mosaic_cells_emitted_total` - Cells redrawn
//! - `live_mosaic_cells_suppressed_total` - Cells skipped as unchanged
//! - `live_mosaic_memory_resets_total` - Frame memory resets
//! - `live_mosaic_last_frame_cells` - Grid cells in the latest frame
//! - `live_mosaic_last_frame_emitted` - Cells redrawn in the latest frame
//!
//! With the `metrics` feature, `MetricsServer` also serves `/health` and
//! `/status` from the latest snapshot.
//!
//! # Example
//!
//! ```no_run
//! use live_mosaic::metrics::{MetricsRegistry, MetricsSnapshot};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! let snapshot = MetricsSnapshot {
//!     frames: 120,
//!     cells_emitted: 9_000,
//!     cells_suppressed: 1_200_000,
//!     memory_resets: 0,
//!     last_frame_cells: 11_360,
//!     last_frame_emitted: 42,
//! };
//!
//! registry.update(&snapshot);
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError};
