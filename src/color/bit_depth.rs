//! Bit-depth truncation.
//!
//! The quantization curve is `floor(v * 7 / 255) * step` where
//! `step = 256 / 2^bits`. The numerator stays 7 for every bit depth, so the
//! curve always has eight levels; `bits` only changes their spacing. Rendered
//! output depends on this exact curve.

use super::Rgb;

/// Smallest bit depth whose top level (`7 * step`) still fits in a byte.
pub const MIN_BITS: u32 = 3;
/// Largest supported bit depth.
pub const MAX_BITS: u32 = 8;

/// Reduces one 8-bit channel value to the given bit depth.
///
/// `bits` outside [`MIN_BITS`, `MAX_BITS`] is clamped into that range;
/// configured depths are rejected earlier by `ColorMode::validate`.
#[inline]
pub fn reduce(bits: u32, value: u8) -> u8 {
    let levels = 1u32 << bits.clamp(MIN_BITS, MAX_BITS);
    let step = 256 / levels;
    ((value as u32 * 7 / 255) * step) as u8
}

/// Applies [`reduce`] to each channel independently.
#[inline]
pub fn reduce_rgb(bits: u32, color: Rgb) -> Rgb {
    Rgb::new(
        reduce(bits, color.r),
        reduce(bits, color.g),
        reduce(bits, color.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_three_bit_endpoints() {
        assert_eq!(reduce(3, 0), 0);
        assert_eq!(reduce(3, 255), 224);
        assert_eq!(reduce(3, 36), 0);
        assert_eq!(reduce(3, 37), 32);
    }

    #[test]
    fn test_three_bit_has_eight_levels() {
        let levels: BTreeSet<u8> = (0..=255u8).map(|v| reduce(3, v)).collect();
        assert_eq!(levels.len(), 8);
        assert!(levels.iter().all(|l| l % 32 == 0));
    }

    #[test]
    fn test_three_bit_is_monotonic() {
        let outputs: Vec<u8> = (0..=255u8).map(|v| reduce(3, v)).collect();
        assert!(outputs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_numerator_is_fixed_across_depths() {
        // Higher depths shrink the step but keep eight levels.
        assert_eq!(reduce(4, 255), 7 * 16);
        assert_eq!(reduce(8, 255), 7);
    }

    #[test]
    fn test_out_of_range_depth_is_clamped() {
        assert_eq!(reduce(2, 255), reduce(3, 255));
        assert_eq!(reduce(0, 146), reduce(3, 146));
        assert_eq!(reduce(40, 255), reduce(8, 255));
        let outputs: Vec<u8> = (0..=255u8).map(|v| reduce(2, v)).collect();
        assert!(outputs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_reduce_rgb() {
        assert_eq!(
            reduce_rgb(3, Rgb::new(255, 128, 0)),
            Rgb::new(224, 96, 0)
        );
    }

    proptest! {
        #[test]
        fn prop_output_is_multiple_of_step(bits in MIN_BITS..=MAX_BITS, v in any::<u8>()) {
            let step = 256 / (1u32 << bits);
            let out = reduce(bits, v) as u32;
            prop_assert_eq!(out % step, 0);
            prop_assert!(out <= 7 * step);
        }

        #[test]
        fn prop_reduce_is_non_decreasing(bits in MIN_BITS..=MAX_BITS, a in any::<u8>(), b in any::<u8>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(reduce(bits, lo) <= reduce(bits, hi));
        }
    }
}
