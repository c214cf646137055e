//! Per-frame orchestration: capture, bin, reduce, diff, draw.

use super::{DrawingSurface, FrameMemory, MirrorTransform};
use crate::binning::{BinningStrategy, CellRecord, GridGeometry};
use crate::capture::{Camera, CameraError, CellSize, ConfigError, Frame, MosaicConfig};
use crate::color::{ColorMode, PaletteStore};
use thiserror::Error;

/// Errors raised while processing a frame.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pixel source failed.
    #[error("capture failed: {0}")]
    Capture(#[from] CameraError),
    /// The pixel buffer does not match the frame dimensions.
    #[error("frame {sequence} has {actual} bytes, expected {expected}")]
    InvalidFrame {
        /// Sequence number of the rejected frame.
        sequence: u64,
        /// Bytes implied by width, height and format.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Source frame sequence number.
    pub sequence: u64,
    /// Cells in the grid.
    pub cells: usize,
    /// Cells drawn this frame.
    pub emitted: usize,
    /// Cells skipped because their color was unchanged.
    pub suppressed: usize,
    /// Whether frame memory was cleared before this frame.
    pub memory_reset: bool,
}

/// Running totals across all frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineTotals {
    /// Frames processed.
    pub frames: u64,
    /// Cells drawn across all frames.
    pub cells_emitted: u64,
    /// Cells skipped across all frames.
    pub cells_suppressed: u64,
    /// Frame memory resets after geometry changes.
    pub memory_resets: u64,
}

/// Turns frames into mosaic draw commands.
///
/// Owns the resolved binning strategy, color mode and frame memory. Not
/// re-entrant: each call must finish before the next frame starts.
pub struct FramePipeline {
    cell: CellSize,
    strategy: BinningStrategy,
    color_mode: ColorMode,
    memory: FrameMemory,
    geometry: Option<GridGeometry>,
    records: Vec<CellRecord>,
    totals: PipelineTotals,
}

impl FramePipeline {
    /// Builds a pipeline from configuration, resolving every key up front.
    pub fn new(config: &MosaicConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let palettes = PaletteStore::from_definitions(&config.palettes)?;
        let strategy = BinningStrategy::from_key(&config.binning)?;
        let color_mode =
            ColorMode::resolve(&config.color_mode, config.bit_depth, &config.palette, &palettes)?;

        tracing::info!(
            binning = strategy.key(),
            color_mode = color_mode.key(),
            palette = %config.palette,
            cell_x = config.cell.x,
            cell_y = config.cell.y,
            "Frame pipeline configured"
        );

        Self::from_parts(config.cell, strategy, color_mode)
    }

    /// Builds a pipeline from already-resolved parts.
    pub fn from_parts(
        cell: CellSize,
        strategy: BinningStrategy,
        color_mode: ColorMode,
    ) -> Result<Self, ConfigError> {
        if cell.x == 0 || cell.y == 0 {
            return Err(ConfigError::InvalidCellSize {
                x: cell.x,
                y: cell.y,
            });
        }
        color_mode.validate()?;
        Ok(Self {
            cell,
            strategy,
            color_mode,
            memory: FrameMemory::new(),
            geometry: None,
            records: Vec::new(),
            totals: PipelineTotals::default(),
        })
    }

    /// Captures one frame from `source` and draws it onto `surface`.
    pub fn tick<C, S>(&mut self, source: &mut C, surface: &mut S) -> Result<FrameStats, PipelineError>
    where
        C: Camera + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        let frame = source.capture()?;
        self.process_frame(&frame, surface)
    }

    /// Draws every cell of `frame` whose reduced color changed.
    ///
    /// Commands go out in traversal order, each as a fill color followed
    /// by a rectangle of the configured cell size under the mirror
    /// transform.
    pub fn process_frame<S>(&mut self, frame: &Frame, surface: &mut S) -> Result<FrameStats, PipelineError>
    where
        S: DrawingSurface + ?Sized,
    {
        if !frame.is_valid() {
            return Err(PipelineError::InvalidFrame {
                sequence: frame.sequence(),
                expected: frame.pixel_count() * frame.format().bytes_per_pixel(),
                actual: frame.pixels().len(),
            });
        }

        let memory_reset = self.sync_geometry(frame);
        self.strategy.bin_into(frame, self.cell, &mut self.records);

        let mirror = MirrorTransform::new(frame.width());
        let mut stats = FrameStats {
            sequence: frame.sequence(),
            cells: self.records.len(),
            memory_reset,
            ..Default::default()
        };

        for record in &self.records {
            let color = self.color_mode.apply(record.color);
            if !self.memory.should_emit(record.index(), color) {
                stats.suppressed += 1;
                continue;
            }

            surface.set_fill_color(color);
            surface.draw_rect(mirror.apply(
                record.bounds.x,
                record.bounds.y,
                self.cell.x,
                self.cell.y,
            ));
            stats.emitted += 1;
        }

        self.totals.frames += 1;
        self.totals.cells_emitted += stats.emitted as u64;
        self.totals.cells_suppressed += stats.suppressed as u64;

        tracing::trace!(
            sequence = stats.sequence,
            emitted = stats.emitted,
            suppressed = stats.suppressed,
            "Frame processed"
        );

        Ok(stats)
    }

    /// Clears frame memory when the grid layout differs from last frame.
    fn sync_geometry(&mut self, frame: &Frame) -> bool {
        let geometry = GridGeometry::for_frame(frame, self.cell);
        let previous = self.geometry.replace(geometry);
        if previous == Some(geometry) {
            return false;
        }

        if geometry.is_oversized() {
            tracing::warn!(
                cells = geometry.cell_count(),
                "Cell size exceeds raster; cells are clamped to the frame"
            );
        }

        let Some(prev) = previous else {
            return false;
        };

        tracing::info!(
            from = %format!("{}x{}", prev.raster_width(), prev.raster_height()),
            to = %format!("{}x{}", geometry.raster_width(), geometry.raster_height()),
            cells = geometry.cell_count(),
            "Raster geometry changed, resetting frame memory"
        );
        self.memory.reset();
        self.totals.memory_resets += 1;
        true
    }

    /// Forgets all memoized colors so the next frame redraws everything.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.geometry = None;
        tracing::debug!("Frame pipeline reset");
    }

    /// Configured cell size.
    pub fn cell(&self) -> CellSize {
        self.cell
    }

    /// Active binning strategy.
    pub fn strategy(&self) -> BinningStrategy {
        self.strategy
    }

    /// Active color mode.
    pub fn color_mode(&self) -> &ColorMode {
        &self.color_mode
    }

    /// Per-cell memory of emitted colors.
    pub fn memory(&self) -> &FrameMemory {
        &self.memory
    }

    /// Geometry of the last processed frame.
    pub fn geometry(&self) -> Option<GridGeometry> {
        self.geometry
    }

    /// Running totals since construction.
    pub fn totals(&self) -> PipelineTotals {
        self.totals
    }
}
