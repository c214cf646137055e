//! Named palettes and nearest-color matching.

use super::{ParseColorError, Rgb};
use std::collections::BTreeMap;
use thiserror::Error;

/// The 16-color CGA palette, the default `cga` entry.
pub(crate) const CGA_16: [&str; 16] = [
    "#000000", // black
    "#555555", // gray
    "#0000AA", // blue
    "#5555FF", // light blue
    "#00AA00", // green
    "#55FF55", // light green
    "#00AAAA", // cyan
    "#55FFFF", // light cyan
    "#AA0000", // red
    "#FF5555", // light red
    "#AA00AA", // magenta
    "#FF55FF", // light magenta
    "#AA5500", // brown
    "#FFFF55", // yellow
    "#AAAAAA", // light gray
    "#FFFFFF", // white
];

/// Palette construction and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The palette has no colors.
    #[error("palette '{name}' has no colors")]
    Empty {
        /// Palette name.
        name: String,
    },
    /// An entry is not a valid `#RRGGBB` string.
    #[error("palette '{name}' entry {index} ('{value}'): {source}")]
    InvalidColor {
        /// Palette name.
        name: String,
        /// Position of the bad entry.
        index: usize,
        /// The offending text.
        value: String,
        /// Why it failed to parse.
        #[source]
        source: ParseColorError,
    },
    /// No palette with this name is configured.
    #[error("unknown palette '{0}'")]
    Unknown(String),
}

/// An ordered, non-empty set of reference colors.
///
/// Order only matters for ties in [`Palette::nearest`]: the earliest
/// entry at the minimal distance wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Palette name.
    name: String,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Creates a palette from already-decoded colors.
    pub fn new(name: impl Into<String>, colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        let name = name.into();
        if colors.is_empty() {
            return Err(PaletteError::Empty { name });
        }
        Ok(Self { name, colors })
    }

    /// Decodes a palette from `#RRGGBB` strings.
    pub fn from_hex<S: AsRef<str>>(name: impl Into<String>, hex: &[S]) -> Result<Self, PaletteError> {
        let name = name.into();
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_ref()
                    .parse::<Rgb>()
                    .map_err(|source| PaletteError::InvalidColor {
                        name: name.clone(),
                        index,
                        value: value.as_ref().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, colors)
    }

    /// The built-in 16-color CGA palette.
    pub fn cga() -> Self {
        Self {
            name: "cga".to_string(),
            colors: CGA_16
                .iter()
                .filter_map(|hex| hex.parse().ok())
                .collect(),
        }
    }

    /// Palette name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in match order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the entry with the smallest squared Euclidean distance.
    pub fn nearest(&self, color: Rgb) -> Rgb {
        let mut best = self.colors[0];
        let mut best_dist = u32::MAX;

        for candidate in &self.colors {
            let dist = color.distance_squared(candidate);
            if dist < best_dist {
                best_dist = dist;
                best = *candidate;
                if dist == 0 {
                    break;
                }
            }
        }

        best
    }
}

/// All configured palettes, decoded once at startup.
#[derive(Debug, Clone, Default)]
pub struct PaletteStore {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes every palette definition, failing on the first bad one.
    pub fn from_definitions(
        definitions: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, PaletteError> {
        let mut store = Self::new();
        for (name, hex) in definitions {
            store.insert(Palette::from_hex(name.clone(), hex)?);
        }
        tracing::debug!(count = store.len(), "Palettes decoded");
        Ok(store)
    }

    /// Adds or replaces a palette under its own name.
    pub fn insert(&mut self, palette: Palette) {
        self.palettes.insert(palette.name.clone(), palette);
    }

    /// Looks up a palette by name.
    pub fn get(&self, name: &str) -> Result<&Palette, PaletteError> {
        self.palettes
            .get(name)
            .ok_or_else(|| PaletteError::Unknown(name.to_string()))
    }

    /// Palette names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True when no palettes are stored.
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
