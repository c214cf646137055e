//! Pixel source abstraction for frame capture.
//!
//! The pipeline only needs something that hands over a fresh raster once
//! per tick. Real camera backends live outside this crate; the mock source
//! here produces a deterministic moving test pattern.

use super::{CaptureConfig, Frame};
use crate::color::Rgb;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use thiserror::Error;

/// Errors that can occur during camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    /// The capture configuration was rejected.
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    /// `capture` was called before `open`.
    #[error("camera not initialized")]
    NotInitialized,
}

/// Trait for pixel sources.
///
/// This abstraction allows swapping between real camera hardware
/// and mock implementations for testing.
pub trait Camera {
    /// Opens and initializes the source with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError>;

    /// Captures a single frame.
    fn capture(&mut self) -> Result<Frame, CameraError>;

    /// Checks if the source is currently open.
    fn is_open(&self) -> bool;

    /// Closes the source and releases resources.
    fn close(&mut self);
}

/// Mock camera that renders a synthetic scene.
///
/// The scene is a static color gradient with a white square sliding
/// left to right, plus optional per-pixel noise from a seeded ChaCha
/// stream. The same seed always yields the same frame sequence.
#[derive(Debug)]
pub struct MockCamera {
    config: Option<CaptureConfig>,
    sequence: u64,
    seed: u64,
    /// Maximum noise added to each channel.
    noise: u8,
    rng: ChaCha8Rng,
}

impl MockCamera {
    /// Creates a mock source with seed 0 and no noise.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Creates a mock source with a fixed noise seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: None,
            sequence: 0,
            seed,
            noise: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Sets the per-channel noise amplitude.
    pub fn with_noise(mut self, noise: u8) -> Self {
        self.noise = noise;
        self
    }

    fn render(&mut self, width: u32, height: u32) -> Frame {
        let side = (width.min(height) / 4).max(1);
        let travel = width.saturating_sub(side).max(1) as u64;
        let square_x = ((self.sequence * 4) % travel) as u32;
        let square_y = (height - side.min(height)) / 2;
        let noise = self.noise as u32;
        let rng = &mut self.rng;

        Frame::from_fn(width, height, self.sequence, |x, y| {
            let base = if x >= square_x && x < square_x + side && y >= square_y && y < square_y + side {
                Rgb::WHITE
            } else {
                Rgb::new(
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    128,
                )
            };
            if noise == 0 {
                return base;
            }
            let jitter = rng.next_u32();
            let offset = |shift: u32| (jitter >> shift) % (noise + 1);
            Rgb::clamped(
                base.r as u32 + offset(0),
                base.g as u32 + offset(8),
                base.b as u32 + offset(16),
            )
        })
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for MockCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        tracing::info!("MockCamera opened with config: {:?}", config);
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CameraError> {
        let (width, height) = {
            let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;
            (config.width, config.height)
        };

        self.sequence += 1;
        Ok(self.render(width, height))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockCamera closed");
    }
}
