use crate::RenderError;
use std::str::FromStr;

/// A colour in the sRGB space with straight (non-premultiplied) alpha; each channel
/// ranges from 0 to 255
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new, fully opaque colour. r, g, and b range from 0 to 255
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b, a: 255 }
    }

    /// Create a new colour with an alpha channel. r, g, b, and a range from 0 to 255
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour { r, g, b, a }
    }

    /// Parse a hex colour in one of the forms `RGB`, `RRGGBB` or `RRGGBBAA`, each
    /// optionally prefixed with a single `#`. Digits are case-insensitive. The short
    /// form duplicates each digit (`abc` is `aabbcc`), and alpha is opaque unless given.
    pub fn from_hex(s: &str) -> Result<Colour, RenderError> {
        let invalid = || RenderError::InvalidFormat(s.to_string());

        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digits = hex.as_bytes();
        let channel = |hi: u8, lo: u8| -> Result<u8, RenderError> {
            let pair = [hi, lo];
            let pair = std::str::from_utf8(&pair).map_err(|_| invalid())?;
            u8::from_str_radix(pair, 16).map_err(|_| invalid())
        };

        match digits.len() {
            3 => Ok(Colour::new_rgb(
                channel(digits[0], digits[0])?,
                channel(digits[1], digits[1])?,
                channel(digits[2], digits[2])?,
            )),
            6 => Ok(Colour::new_rgb(
                channel(digits[0], digits[1])?,
                channel(digits[2], digits[3])?,
                channel(digits[4], digits[5])?,
            )),
            8 => Ok(Colour::new_rgba(
                channel(digits[0], digits[1])?,
                channel(digits[2], digits[3])?,
                channel(digits[4], digits[5])?,
                channel(digits[6], digits[7])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Colour {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb(c.0, c.1, c.2)
    }
}

impl From<[u8; 4]> for Colour {
    fn from(c: [u8; 4]) -> Self {
        let [r, g, b, a] = c;
        Colour { r, g, b, a }
    }
}

impl From<Colour> for [u8; 4] {
    fn from(c: Colour) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::new_rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::new_rgb(255, 255, 255);
    pub const TRANSPARENT: Colour = Colour::new_rgba(0, 0, 0, 0);
    pub const RED: Colour = Colour::new_rgb(255, 0, 0);
    pub const GREEN: Colour = Colour::new_rgb(0, 255, 0);
    pub const BLUE: Colour = Colour::new_rgb(0, 0, 255);
}
