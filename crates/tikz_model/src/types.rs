//! Enumerated style values
//!
//! Every enum has a canonical string form. Those strings are what the
//! persisted file format stores, so they must never change.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements `as_str`, `ALL`, `Display` and `FromStr` over a fixed name table
macro_rules! canonical_names {
    ($ty:ident, $what:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(ModelError::InvalidValue(format!(
                        concat!("unknown ", $what, " '{}'"),
                        s
                    ))),
                }
            }
        }
    };
}

/// Dash pattern of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PenStyle {
    #[default]
    Solid,
    Dotted,
    DenselyDotted,
    LooselyDotted,
    Dashed,
    DenselyDashed,
    LooselyDashed,
    DashDotted,
    DenselyDashDotted,
    LooselyDashDotted,
    DashDotDotted,
    DenselyDashDotDotted,
    LooselyDashDotDotted,
}

canonical_names!(PenStyle, "pen style", {
    Solid => "solid",
    Dotted => "dotted",
    DenselyDotted => "densely dotted",
    LooselyDotted => "loosely dotted",
    Dashed => "dashed",
    DenselyDashed => "densely dashed",
    LooselyDashed => "loosely dashed",
    DashDotted => "dash dot",
    DenselyDashDotted => "densely dash dot",
    LooselyDashDotted => "loosely dash dot",
    DashDotDotted => "dash dot dot",
    DenselyDashDotDotted => "densely dash dot dot",
    LooselyDashDotDotted => "loosely dash dot dot",
});

/// Arrow tip at either end of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Arrow {
    #[default]
    None,
    To,
    ReversedTo,
    Stealth,
    ReversedStealth,
    Latex,
    ReversedLatex,
    StealthTick,
    ReversedStealthTick,
    Pipe,
}

canonical_names!(Arrow, "arrow", {
    None => "none",
    To => "to",
    ReversedTo => "to reversed",
    Stealth => "stealth",
    ReversedStealth => "stealth reversed",
    Latex => "latex",
    ReversedLatex => "latex reversed",
    StealthTick => "stealth'",
    ReversedStealthTick => "stealth' reversed",
    Pipe => "|",
});

/// Node outline shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
    Ellipse,
    Diamond,
}

canonical_names!(Shape, "shape", {
    Rectangle => "rectangle",
    Circle => "circle",
    Ellipse => "ellipse",
    Diamond => "diamond",
});

/// Alignment of multi-line node text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    #[default]
    NoAlign,
    Left,
    Center,
    Right,
    Justify,
}

canonical_names!(TextAlignment, "text alignment", {
    NoAlign => "none",
    Left => "left",
    Center => "center",
    Right => "right",
    Justify => "justify",
});

/// Named attachment point on a node shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    NoAnchor,
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

canonical_names!(Anchor, "anchor", {
    NoAnchor => "",
    Center => "center",
    North => "north",
    NorthEast => "north east",
    East => "east",
    SouthEast => "south east",
    South => "south",
    SouthWest => "south west",
    West => "west",
    NorthWest => "north west",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_are_unique_and_parse_back() {
        for style in PenStyle::ALL {
            assert_eq!(style.as_str().parse::<PenStyle>().unwrap(), *style);
        }
        for arrow in Arrow::ALL {
            assert_eq!(arrow.as_str().parse::<Arrow>().unwrap(), *arrow);
        }
        for anchor in Anchor::ALL {
            assert_eq!(anchor.as_str().parse::<Anchor>().unwrap(), *anchor);
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!("wobbly".parse::<PenStyle>().is_err());
        assert!("hexagon".parse::<Shape>().is_err());
        assert_eq!(
            "stealth' reversed".parse::<Arrow>().unwrap(),
            Arrow::ReversedStealthTick
        );
    }
}
