//! Colors and the sequential palette used for the map classes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fill for regions without an attainment record.
pub const NO_DATA_COLOR: Rgb = Rgb::new(150, 150, 150);

// Single-hue green ramps, light to dark, one row per class count (3..=9).
const GREENS: [&[&str]; 7] = [
    &["#e5f5e0", "#a1d99b", "#31a354"],
    &["#edf8e9", "#bae4b3", "#74c476", "#238b45"],
    &["#edf8e9", "#bae4b3", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c", "#00441b"],
];

pub const MIN_CLASSES: usize = 3;
pub const MAX_CLASSES: usize = 9;

/// Returns the green ramp with exactly `classes` colors, light to dark.
pub fn greens(classes: usize) -> Option<Vec<Rgb>> {
    if !(MIN_CLASSES..=MAX_CLASSES).contains(&classes) {
        return None;
    }
    GREENS[classes - MIN_CLASSES]
        .iter()
        .map(|hex| Rgb::from_hex(hex))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_ramp_has_requested_size() {
        for classes in MIN_CLASSES..=MAX_CLASSES {
            assert_eq!(greens(classes).unwrap().len(), classes);
        }
    }

    #[test]
    fn test_ramps_get_darker() {
        let ramp = greens(9).unwrap();
        let lightness = |c: &Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(ramp.windows(2).all(|w| lightness(&w[0]) > lightness(&w[1])));
    }

    #[test]
    fn test_unsupported_sizes() {
        assert!(greens(2).is_none());
        assert!(greens(10).is_none());
    }

    #[test]
    fn test_hex_round_trip_format() {
        let color = Rgb::from_hex("#00441b").unwrap();
        assert_eq!(color, Rgb::new(0, 0x44, 0x1b));
        assert_eq!(color.to_string(), "#00441b");
        assert!(Rgb::from_hex("#12345").is_none());
        assert!(Rgb::from_hex("zz0000").is_none());
    }
}
