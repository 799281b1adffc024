/*!
 * Packed 32-bit color codec.
 *
 * Colors travel through adapters as a single word laid out as
 * `alpha << 24 | blue << 16 | green << 8 | red`. That byte order is what
 * SSA/ASS color fields use and must be kept as-is.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SubtitleError};

/// A color with four independent 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub alpha: u8,
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color (alpha 0) from red, green and blue channels
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0,
            blue,
            green,
            red,
        }
    }

    /// Unpack a color from its 32-bit word
    pub const fn from_packed(word: u32) -> Self {
        Self {
            alpha: (word >> 24) as u8,
            blue: (word >> 16) as u8,
            green: (word >> 8) as u8,
            red: word as u8,
        }
    }

    /// Pack the channels into a 32-bit word
    pub const fn packed(&self) -> u32 {
        (self.alpha as u32) << 24
            | (self.blue as u32) << 16
            | (self.green as u32) << 8
            | self.red as u32
    }

    /// Parse a color written as a signed 64-bit integer in `base`.
    ///
    /// Only the low 32 bits are kept, so values written with a sign or with
    /// extra high bits still unpack into the four channels.
    pub fn from_str_radix(text: &str, base: u32) -> Result<Self> {
        if !(2..=36).contains(&base) {
            return Err(SubtitleError::format(
                text,
                format!("color (unsupported base {})", base),
            ));
        }
        let value = i64::from_str_radix(text, base)
            .map_err(|_| SubtitleError::format(text, format!("color in base {}", base)))?;
        Ok(Self::from_packed(value as u32))
    }

    /// Render the packed word: 8 lowercase hex digits for base 16,
    /// an unsigned decimal for any other base
    pub fn to_string_radix(&self, base: u32) -> String {
        if base == 16 {
            format!("{:08x}", self.packed())
        } else {
            self.packed().to_string()
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_radix(16))
    }
}
