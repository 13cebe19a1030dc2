//! RGBA colors and the xcolor names TikZ understands

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// xcolor base names with their RGB values
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("darkgray", Color::rgb(64, 64, 64)),
    ("lightgray", Color::rgb(191, 191, 191)),
    ("brown", Color::rgb(191, 128, 64)),
    ("lime", Color::rgb(191, 255, 0)),
    ("olive", Color::rgb(128, 128, 0)),
    ("orange", Color::rgb(255, 128, 0)),
    ("pink", Color::rgb(255, 191, 191)),
    ("purple", Color::rgb(191, 0, 64)),
    ("teal", Color::rgb(0, 128, 128)),
    ("violet", Color::rgb(128, 0, 128)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Fully transparent; written as `none`
    pub const NONE: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// xcolor name, if the color is one of the base colors
    pub fn name(&self) -> Option<&'static str> {
        if self.is_transparent() {
            return Some("none");
        }
        NAMED_COLORS
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
    }

    pub fn from_name(name: &str) -> Option<Color> {
        if name == "none" {
            return Some(Color::NONE);
        }
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, color)| *color)
    }

    /// Color expression usable inside TikZ options
    pub fn to_tikz(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => format!("{{rgb,255:red,{};green,{};blue,{}}}", self.r, self.g, self.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    /// Canonical text: the xcolor name when there is one, `#rrggbb[aa]` otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(color) = Color::from_name(s) {
            return Ok(color);
        }
        let invalid = || ModelError::InvalidValue(format!("unknown color '{}'", s));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_round_trip() {
        assert_eq!(Color::RED.to_string(), "red");
        assert_eq!("white".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("none".parse::<Color>().unwrap(), Color::NONE);
    }

    #[test]
    fn test_hex_colors() {
        let color = Color::rgb(0x12, 0xab, 0x34);
        assert_eq!(color.to_string(), "#12ab34");
        assert_eq!("#12ab34".parse::<Color>().unwrap(), color);
        assert_eq!("#12ab3480".parse::<Color>().unwrap(), Color::rgba(0x12, 0xab, 0x34, 0x80));
        assert!("#12ab3".parse::<Color>().is_err());
        assert!("chartreuse".parse::<Color>().is_err());
    }

    #[test]
    fn test_tikz_color_expression() {
        assert_eq!(Color::BLUE.to_tikz(), "blue");
        assert_eq!(Color::rgb(1, 2, 3).to_tikz(), "{rgb,255:red,1;green,2;blue,3}");
    }
}
