use crate::OverlapTextError;
use serde::Deserialize;
use std::str::FromStr;

/// A text colour, expressed in RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a colour from a packed `0xAARRGGBB` integer. PDF text has no alpha,
    /// so the alpha channel is dropped
    pub fn from_argb(argb: u32) -> Colour {
        Colour::new_rgb_bytes((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

/// Parses `#RGB`, `#RRGGBB` and `#AARRGGBB`
impl FromStr for Colour {
    type Err = OverlapTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OverlapTextError::InvalidColour(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            3 => {
                // each nibble doubles up: #abc == #aabbcc
                let r = ((value >> 8) & 0xf) * 0x11;
                let g = ((value >> 4) & 0xf) * 0x11;
                let b = (value & 0xf) * 0x11;
                Ok(Colour::new_rgb_bytes(r as u8, g as u8, b as u8))
            }
            6 | 8 => Ok(Colour::from_argb(value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Colour {
    type Error = OverlapTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
}
