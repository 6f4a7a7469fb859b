use std::{fmt, str::FromStr};

use crate::foundation::error::{DesignerError, DesignerResult};
use crate::foundation::math::mul_div255_u8;

/// Pixel dimensions of a raster or source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> DesignerResult<Self> {
        if width == 0 || height == 0 {
            return Err(DesignerError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> DesignerResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| DesignerError::validation("canvas buffer size overflow"))
    }
}

/// Straight (non-premultiplied) RGBA8 color as picked by the user.
///
/// Textual form is `#RRGGBB` (opaque) or `#RRGGBBAA`; `#RGB` is accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse_hex(s: &str) -> DesignerResult<Self> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| DesignerError::validation(format!("color '{s}' must start with '#'")))?;
        if !hex.is_ascii() {
            return Err(DesignerError::validation(format!(
                "color '{s}' is not a hex color"
            )));
        }

        fn byte(s: &str, part: &str) -> DesignerResult<u8> {
            u8::from_str_radix(part, 16)
                .map_err(|_| DesignerError::validation(format!("color '{s}' is not a hex color")))
        }

        match hex.len() {
            3 => {
                let r = byte(s, &hex[0..1])?;
                let g = byte(s, &hex[1..2])?;
                let b = byte(s, &hex[2..3])?;
                Ok(Self::opaque(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::opaque(
                byte(s, &hex[0..2])?,
                byte(s, &hex[2..4])?,
                byte(s, &hex[4..6])?,
            )),
            8 => Ok(Self {
                r: byte(s, &hex[0..2])?,
                g: byte(s, &hex[2..4])?,
                b: byte(s, &hex[4..6])?,
                a: byte(s, &hex[6..8])?,
            }),
            _ => Err(DesignerError::validation(format!(
                "color '{s}' must be #RGB, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// CSS color value for preview styles.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            self.to_string()
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Rgba8 {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
