//! Per-cell color processing modes.

use super::{bit_depth, Palette, PaletteStore, Rgb};
use crate::capture::ConfigError;

/// How a cell's representative color is coarsened before drawing.
///
/// Resolved once from configuration; the per-cell path is a plain `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// Draw the binned color unchanged.
    Identity,
    /// Truncate each channel with [`bit_depth::reduce`].
    ReduceBitDepth {
        /// Bit depth, 3..=8.
        bits: u32,
    },
    /// Snap to the nearest entry of the active palette.
    MatchPalette(Palette),
}

impl ColorMode {
    /// Configuration key for identity passthrough.
    pub const IDENTITY: &'static str = "identity";
    /// Configuration key for bit-depth reduction.
    pub const REDUCE_BIT_DEPTH: &'static str = "reduceBitDepth";
    /// Configuration key for palette matching.
    pub const MATCH_PALETTE: &'static str = "matchPalette";

    /// Resolves a mode from its configuration key.
    ///
    /// The active palette and bit depth are validated regardless of the
    /// selected mode so a bad configuration fails at startup.
    pub fn resolve(
        key: &str,
        bits: u32,
        palette: &str,
        palettes: &PaletteStore,
    ) -> Result<Self, ConfigError> {
        check_bits(bits)?;
        let palette = palettes.get(palette)?;

        match key {
            Self::IDENTITY => Ok(ColorMode::Identity),
            Self::REDUCE_BIT_DEPTH => Ok(ColorMode::ReduceBitDepth { bits }),
            Self::MATCH_PALETTE => Ok(ColorMode::MatchPalette(palette.clone())),
            other => Err(ConfigError::UnknownColorMode(other.to_string())),
        }
    }

    /// Rejects a bit depth outside 3..=8 on a directly built mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ColorMode::ReduceBitDepth { bits } => check_bits(*bits),
            ColorMode::Identity | ColorMode::MatchPalette(_) => Ok(()),
        }
    }

    /// Applies the mode to one color.
    #[inline]
    pub fn apply(&self, color: Rgb) -> Rgb {
        match self {
            ColorMode::Identity => color,
            ColorMode::ReduceBitDepth { bits } => bit_depth::reduce_rgb(*bits, color),
            ColorMode::MatchPalette(palette) => palette.nearest(color),
        }
    }

    /// The configuration key this mode was selected by.
    pub fn key(&self) -> &'static str {
        match self {
            ColorMode::Identity => Self::IDENTITY,
            ColorMode::ReduceBitDepth { .. } => Self::REDUCE_BIT_DEPTH,
            ColorMode::MatchPalette(_) => Self::MATCH_PALETTE,
        }
    }
}

fn check_bits(bits: u32) -> Result<(), ConfigError> {
    if !(bit_depth::MIN_BITS..=bit_depth::MAX_BITS).contains(&bits) {
        return Err(ConfigError::InvalidBitDepth(bits));
    }
    Ok(())
}
