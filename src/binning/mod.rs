//! Spatial binning of a raster into a mosaic grid.
//!
//! The grid is walked column by column: the outer loop steps `x` by the
//! cell width and the inner loop steps `y` by the cell height. Cell indices
//! follow that walk, so index `i` is `column * rows + row`. Frame memory is
//! keyed by this index and depends on it being identical every frame.
//!
//! Cells on the right and bottom edges may be partial when the raster is
//! not an exact multiple of the cell size. Their footprint is clamped to
//! the raster and only in-bounds pixels contribute.

mod average;
mod sample;

use crate::capture::{CellSize, ConfigError, Frame};
use crate::color::Rgb;

/// Grid layout for one raster size and cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    raster_width: u32,
    raster_height: u32,
    cell: CellSize,
}

impl GridGeometry {
    /// Geometry for a `raster_width` x `raster_height` raster.
    pub fn new(raster_width: u32, raster_height: u32, cell: CellSize) -> Self {
        Self {
            raster_width,
            raster_height,
            cell,
        }
    }

    /// Geometry of `frame` under the given cell size.
    pub fn for_frame(frame: &Frame, cell: CellSize) -> Self {
        Self::new(frame.width(), frame.height(), cell)
    }

    /// Raster width in pixels.
    #[inline]
    pub fn raster_width(&self) -> u32 {
        self.raster_width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn raster_height(&self) -> u32 {
        self.raster_height
    }

    /// Configured cell size.
    #[inline]
    pub fn cell(&self) -> CellSize {
        self.cell
    }

    /// Number of cell columns, counting a partial last column.
    pub fn columns(&self) -> u32 {
        self.raster_width.div_ceil(self.cell.x)
    }

    /// Number of cell rows, counting a partial last row.
    pub fn rows(&self) -> u32 {
        self.raster_height.div_ceil(self.cell.y)
    }

    /// Total cells, `columns * rows`.
    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// True when a cell is larger than the raster in either direction.
    pub fn is_oversized(&self) -> bool {
        self.cell.x > self.raster_width || self.cell.y > self.raster_height
    }

    /// Cell footprints in traversal order.
    pub fn cells(&self) -> impl Iterator<Item = CellBounds> + '_ {
        let rows = self.rows() as usize;
        (0..self.columns()).flat_map(move |column| {
            (0..self.rows()).map(move |row| {
                let x = column * self.cell.x;
                let y = row * self.cell.y;
                CellBounds {
                    index: column as usize * rows + row as usize,
                    x,
                    y,
                    width: self.cell.x.min(self.raster_width - x),
                    height: self.cell.y.min(self.raster_height - y),
                }
            })
        })
    }
}

/// The in-bounds pixel footprint of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    /// Position in traversal order.
    pub index: usize,
    /// Top-left pixel column.
    pub x: u32,
    /// Top-left pixel row.
    pub y: u32,
    /// Footprint width after clamping to the raster.
    pub width: u32,
    /// Footprint height after clamping to the raster.
    pub height: u32,
}

impl CellBounds {
    /// Number of in-bounds pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// One binned cell: where it sits and its representative color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRecord {
    /// Position and clamped footprint.
    pub bounds: CellBounds,
    /// Representative color before color processing.
    pub color: Rgb,
}

impl CellRecord {
    /// Traversal index of the cell.
    #[inline]
    pub fn index(&self) -> usize {
        self.bounds.index
    }
}

/// How a cell is reduced to a single color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinningStrategy {
    /// Floor of the per-channel mean over the whole footprint.
    #[default]
    Average,
    /// The top-left pixel of the footprint.
    Sample,
}

impl BinningStrategy {
    /// Configuration key for area averaging.
    pub const AVERAGE: &'static str = "average";
    /// Configuration key for top-left sampling.
    pub const SAMPLE: &'static str = "sample";

    /// Resolves a strategy from its configuration key.
    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        match key {
            Self::AVERAGE => Ok(BinningStrategy::Average),
            Self::SAMPLE => Ok(BinningStrategy::Sample),
            other => Err(ConfigError::UnknownBinningMode(other.to_string())),
        }
    }

    /// The configuration key this strategy was selected by.
    pub fn key(&self) -> &'static str {
        match self {
            BinningStrategy::Average => Self::AVERAGE,
            BinningStrategy::Sample => Self::SAMPLE,
        }
    }

    /// Reduces one cell of `frame` to a color.
    #[inline]
    pub fn reduce(&self, frame: &Frame, bounds: &CellBounds) -> Rgb {
        match self {
            BinningStrategy::Average => average::average(frame, bounds),
            BinningStrategy::Sample => sample::sample(frame, bounds),
        }
    }

    /// Bins a whole frame, one record per cell in traversal order.
    pub fn bin(&self, frame: &Frame, cell: CellSize) -> Vec<CellRecord> {
        let mut records = Vec::new();
        self.bin_into(frame, cell, &mut records);
        records
    }

    /// Like [`bin`](Self::bin) but reuses `records`' allocation.
    pub fn bin_into(&self, frame: &Frame, cell: CellSize, records: &mut Vec<CellRecord>) {
        let geometry = GridGeometry::for_frame(frame, cell);
        records.clear();
        records.reserve(geometry.cell_count());
        records.extend(geometry.cells().map(|bounds| CellRecord {
            color: self.reduce(frame, &bounds),
            bounds,
        }));
    }
}
