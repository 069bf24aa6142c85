//! Indicator palette.
//!
//! The dashboard's status box is painted with one of a handful of hex
//! colors. Modelling the palette as an enum keeps the indicator from ever
//! holding an empty or arbitrary string.

use serde::{Serialize, Serializer};
use std::fmt;

/// Hex code shown when nothing is lit.
pub const IDLE_HEX: &str = "#222222";

/// Hex code shown when a color command names something outside the palette.
pub const UNKNOWN_HEX: &str = "#ffffff";

/// Current color of the dashboard indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorColor {
    /// Nothing lit.
    #[default]
    Idle,
    Red,
    Green,
    Blue,
    Yellow,
    /// A color command named a color outside the palette.
    Unknown,
}

impl IndicatorColor {
    /// Looks up a palette name (`red`, `green`, `blue`, `yellow`).
    ///
    /// Any other name maps to [`IndicatorColor::Unknown`], which is distinct
    /// from [`IndicatorColor::Idle`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "red" => Self::Red,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "yellow" => Self::Yellow,
            _ => Self::Unknown,
        }
    }

    /// Returns the CSS hex code for this color.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Idle => IDLE_HEX,
            Self::Red => "#ff0000",
            Self::Green => "#00ff00",
            Self::Blue => "#0000ff",
            Self::Yellow => "#ffff00",
            Self::Unknown => UNKNOWN_HEX,
        }
    }
}

impl fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl Serialize for IndicatorColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}
