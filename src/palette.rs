//! Display colors for the detail panel.
//!
//! Accent colors come from a fixed, ordered palette indexed by a hash of the
//! contact's initials. The mapping is deterministic for a given input and
//! different initials may share a color.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Whether black text reads better than white on this background.
    pub fn is_light(&self) -> bool {
        let brightness =
            0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        brightness > 150.0
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Array([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
            Hex(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Array([r, g, b]) => Ok(RgbColor { r, g, b }),
            Helper::Map { r, g, b } => Ok(RgbColor { r, g, b }),
            Helper::Hex(value) => RgbColor::from_hex(&value)
                .ok_or_else(|| D::Error::custom(format!("invalid color `{}`", value))),
        }
    }
}

pub const BLUE: RgbColor = RgbColor::new(0, 0, 255);

pub const ACCENT_PALETTE: [RgbColor; 11] = [
    BLUE,
    RgbColor::new(165, 42, 42),   // brown
    RgbColor::new(0, 128, 0),     // green
    RgbColor::new(255, 0, 0),     // red
    RgbColor::new(255, 255, 0),   // yellow
    RgbColor::new(128, 0, 128),   // purple
    RgbColor::new(255, 165, 0),   // orange
    RgbColor::new(210, 105, 30),  // chocolate
    RgbColor::new(127, 255, 212), // aquamarine
    RgbColor::new(75, 0, 130),    // indigo
    RgbColor::new(128, 128, 128), // gray
];

pub const DEFAULT_TAG_COLOR: RgbColor = BLUE;

/// Accent color for an initials badge.
pub fn accent_for(initials: &str) -> RgbColor {
    let mut hasher = DefaultHasher::new();
    initials.hash(&mut hasher);
    let index = (hasher.finish() % ACCENT_PALETTE.len() as u64) as usize;
    ACCENT_PALETTE[index]
}
