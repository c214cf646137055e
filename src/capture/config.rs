//! Capture and mosaic configuration.
//!
//! Everything here is read once at startup. The pipeline resolves mode
//! names and palettes when it is constructed and never looks at strings
//! again while frames are flowing.

use crate::color::{PaletteError, CGA_16};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for the pixel source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

impl CaptureConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Mosaic cell size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    /// Cell width.
    pub x: u32,
    /// Cell height.
    pub y: u32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self { x: 3, y: 9 }
    }
}

/// Pipeline configuration handed to `FramePipeline::new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    /// Cell footprint.
    pub cell: CellSize,
    /// Binning strategy key (`average` or `sample`).
    pub binning: String,
    /// Color mode key (`identity`, `reduceBitDepth` or `matchPalette`).
    pub color_mode: String,
    /// Name of the active palette.
    pub palette: String,
    /// Bit depth used by `reduceBitDepth`.
    pub bit_depth: u32,
    /// Palette name to ordered `#RRGGBB` colors.
    pub palettes: BTreeMap<String, Vec<String>>,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        let mut palettes = BTreeMap::new();
        palettes.insert(
            "cga".to_string(),
            CGA_16.iter().map(|s| s.to_string()).collect(),
        );
        Self {
            cell: CellSize::default(),
            binning: "average".to_string(),
            color_mode: "reduceBitDepth".to_string(),
            palette: "cga".to_string(),
            bit_depth: 3,
            palettes,
        }
    }
}

impl MosaicConfig {
    /// Checks values that do not need palette decoding.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell.x == 0 || self.cell.y == 0 {
            return Err(ConfigError::InvalidCellSize {
                x: self.cell.x,
                y: self.cell.y,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
///
/// All of these are raised before the first frame is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    /// Frame rate outside 1-120.
    #[error("invalid frame rate (must be 1-120 fps)")]
    InvalidFrameRate,
    /// A cell side is zero.
    #[error("invalid cell size {x}x{y} (both sides must be non-zero)")]
    InvalidCellSize {
        /// Configured cell width.
        x: u32,
        /// Configured cell height.
        y: u32,
    },
    /// Bit depth outside 3-8.
    #[error("invalid bit depth {0} (must be 3-8)")]
    InvalidBitDepth(u32),
    /// Binning key is not `average` or `sample`.
    #[error("unknown binning mode '{0}'")]
    UnknownBinningMode(String),
    /// Color mode key is not recognized.
    #[error("unknown color mode '{0}'")]
    UnknownColorMode(String),
    /// A palette failed to decode or resolve.
    #[error(transparent)]
    Palette(#[from] PaletteError),
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Pixel source settings.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Pipeline settings and palettes.
    #[serde(default)]
    pub mosaic: MosaicConfig,
    /// Frame loop and exporter settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Run continuously (true) or process fixed number of frames (false).
    pub continuous: bool,
    /// Number of frames to process if not continuous.
    pub frame_count: u32,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            frame_count: 100,
            metrics_port: 9090,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.capture.validate()?;
        config.mosaic.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = CaptureConfig::default();
        assert!(config.validate().is_ok());
        assert!(MosaicConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_invalid() {
        let mut config = CaptureConfig::default();
        config.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_zero_cell_invalid() {
        let mut config = MosaicConfig::default();
        config.cell.y = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCellSize { x: 3, y: 0 })
        );
    }

    #[test]
    fn test_default_mosaic_matches_cga() {
        let config = MosaicConfig::default();
        assert_eq!(config.cell, CellSize { x: 3, y: 9 });
        assert_eq!(config.palettes["cga"].len(), 16);
        assert_eq!(config.palettes["cga"][12], "#AA5500");
    }

    #[test]
    fn test_parse_toml() {
        let config = FileConfig::from_toml(
            r##"
            [capture]
            width = 320
            height = 240

            [mosaic]
            binning = "sample"
            color_mode = "matchPalette"
            palette = "mono"
            cell = { x = 4, y = 4 }

            [mosaic.palettes]
            mono = ["#000000", "#FFFFFF"]

            [output]
            frame_count = 5
            "##,
        )
        .unwrap();

        assert_eq!(config.capture.width, 320);
        assert_eq!(config.capture.fps, 30);
        assert_eq!(config.mosaic.binning, "sample");
        assert_eq!(config.mosaic.cell, CellSize { x: 4, y: 4 });
        assert_eq!(config.mosaic.bit_depth, 3);
        assert_eq!(config.mosaic.palettes.len(), 1);
        assert_eq!(config.output.frame_count, 5);
        assert_eq!(config.output.metrics_port, 9090);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(matches!(
            FileConfig::from_toml("[capture]\nfps = 0\n"),
            Err(ConfigError::InvalidFrameRate)
        ));
        assert!(matches!(
            FileConfig::from_toml("[mosaic\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = FileConfig::from_toml(include_str!("../../config/live-mosaic.toml")).unwrap();
        assert_eq!(config.mosaic.color_mode, "matchPalette");
        assert_eq!(config.mosaic.palettes["cga"].len(), 16);
        assert_eq!(config.mosaic.palettes["mono"].len(), 2);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FileConfig::from_file("/nonexistent/live-mosaic.toml"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
