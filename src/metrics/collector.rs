//! Metrics collection and registry.

use crate::render::{FrameStats, PipelineTotals};
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of pipeline state for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Total frames processed.
    pub frames: u64,
    /// Total cells drawn.
    pub cells_emitted: u64,
    /// Total cells skipped as unchanged.
    pub cells_suppressed: u64,
    /// Total frame memory resets.
    pub memory_resets: u64,
    /// Cells in the most recent frame's grid.
    pub last_frame_cells: usize,
    /// Cells drawn in the most recent frame.
    pub last_frame_emitted: usize,
}

/// Prometheus metrics registry for the mosaic pipeline.
pub struct MetricsRegistry {
    registry: Registry,

    frames_total: IntCounter,
    cells_emitted_total: IntCounter,
    cells_suppressed_total: IntCounter,
    memory_resets_total: IntCounter,

    last_frame_cells: IntGauge,
    last_frame_emitted: IntGauge,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all pipeline metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let frames_total = IntCounter::new(
            "live_mosaic_frames_total",
            "Total number of frames processed",
        )?;
        let cells_emitted_total = IntCounter::new(
            "live_mosaic_cells_emitted_total",
            "Total number of cells redrawn",
        )?;
        let cells_suppressed_total = IntCounter::new(
            "live_mosaic_cells_suppressed_total",
            "Total number of cell redraws skipped because the color was unchanged",
        )?;
        let memory_resets_total = IntCounter::new(
            "live_mosaic_memory_resets_total",
            "Total number of frame memory resets after a geometry change",
        )?;
        let last_frame_cells = IntGauge::new(
            "live_mosaic_last_frame_cells",
            "Number of grid cells in the most recent frame",
        )?;
        let last_frame_emitted = IntGauge::new(
            "live_mosaic_last_frame_emitted",
            "Number of cells redrawn in the most recent frame",
        )?;

        registry.register(Box::new(frames_total.clone()))?;
        registry.register(Box::new(cells_emitted_total.clone()))?;
        registry.register(Box::new(cells_suppressed_total.clone()))?;
        registry.register(Box::new(memory_resets_total.clone()))?;
        registry.register(Box::new(last_frame_cells.clone()))?;
        registry.register(Box::new(last_frame_emitted.clone()))?;

        Ok(Self {
            registry,
            frames_total,
            cells_emitted_total,
            cells_suppressed_total,
            memory_resets_total,
            last_frame_cells,
            last_frame_emitted,
        })
    }

    /// Updates all metrics from a snapshot of pipeline state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        // Counters only move forward, so increment by the difference
        advance(&self.frames_total, snapshot.frames);
        advance(&self.cells_emitted_total, snapshot.cells_emitted);
        advance(&self.cells_suppressed_total, snapshot.cells_suppressed);
        advance(&self.memory_resets_total, snapshot.memory_resets);

        self.last_frame_cells.set(snapshot.last_frame_cells as i64);
        self.last_frame_emitted.set(snapshot.last_frame_emitted as i64);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}

impl MetricsSnapshot {
    /// Creates a snapshot from pipeline totals and the latest frame.
    pub fn from_pipeline(totals: PipelineTotals, last: &FrameStats) -> Self {
        Self {
            frames: totals.frames,
            cells_emitted: totals.cells_emitted,
            cells_suppressed: totals.cells_suppressed,
            memory_resets: totals.memory_resets,
            last_frame_cells: last.cells,
            last_frame_emitted: last.emitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_metrics_update() {
        let registry = MetricsRegistry::new().unwrap();

        let totals = PipelineTotals {
            frames: 3,
            cells_emitted: 70,
            cells_suppressed: 122,
            memory_resets: 1,
        };
        let last = FrameStats {
            sequence: 3,
            cells: 64,
            emitted: 5,
            suppressed: 59,
            memory_reset: false,
        };
        registry.update(&MetricsSnapshot::from_pipeline(totals, &last));

        let output = registry.encode().unwrap();
        assert!(output.contains("live_mosaic_frames_total 3"));
        assert!(output.contains("live_mosaic_cells_suppressed_total 122"));
        assert!(output.contains("live_mosaic_last_frame_emitted 5"));
    }

    #[test]
    fn test_counters_never_decrease() {
        let registry = MetricsRegistry::new().unwrap();
        registry.update(&MetricsSnapshot {
            frames: 10,
            ..Default::default()
        });
        registry.update(&MetricsSnapshot {
            frames: 4,
            ..Default::default()
        });

        let output = registry.encode().unwrap();
        assert!(output.contains("live_mosaic_frames_total 10"));
    }

    #[test]
    fn test_metrics_encode() {
        let registry = MetricsRegistry::new().unwrap();
        let output = registry.encode().unwrap();

        assert!(output.contains("live_mosaic_frames_total"));
        assert!(output.contains("live_mosaic_memory_resets_total"));
        assert!(output.contains("live_mosaic_last_frame_cells"));
    }
}
