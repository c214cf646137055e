//! 24-bit RGB triple and its hex encoding.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// `#000000`.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// `#FFFFFF`.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from wider channel values, clamping each to [0, 255].
    pub fn clamped(r: u32, g: u32, b: u32) -> Self {
        Self {
            r: r.min(255) as u8,
            g: g.min(255) as u8,
            b: b.min(255) as u8,
        }
    }

    /// Squared Euclidean distance to another color.
    #[inline]
    pub fn distance_squared(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Errors from decoding a `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Not exactly six characters after the optional `#`.
    #[error("invalid hex color length (expected 6 digits, got {0})")]
    InvalidLength(usize),
    /// A character is not a hex digit.
    #[error("invalid hex digit in '{0}'")]
    InvalidDigit(String),
    /// A digit pair failed to parse.
    #[error("invalid hex digit: {0}")]
    InvalidHex(#[from] ParseIntError),
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parses `#RRGGBB` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError::InvalidLength(hex.len()));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(hex.to_string()));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self::new(r, g, b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#AA5500".parse::<Rgb>().unwrap(), Rgb::new(170, 85, 0));
        assert_eq!("#ffffff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "#FFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength(3))
        ));
        assert!(matches!(
            "#GG0000".parse::<Rgb>(),
            Err(ParseColorError::InvalidDigit(_))
        ));
        assert_eq!(
            "#+A+A+A".parse::<Rgb>(),
            Err(ParseColorError::InvalidDigit("+A+A+A".to_string()))
        );
        assert!("#ÄA000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let color = Rgb::new(0x55, 0xFF, 0x0A);
        assert_eq!(color.to_string(), "#55FF0A");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Rgb::clamped(300, 255, 7), Rgb::new(255, 255, 7));
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Rgb::BLACK.distance_squared(&Rgb::WHITE), 3 * 255 * 255);
        assert_eq!(Rgb::new(10, 20, 30).distance_squared(&Rgb::new(13, 16, 30)), 25);
    }
}
