//! Typed lengths with TeX units and conversion arithmetic

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Points per inch as used by TeX
const POINTS_PER_INCH: f64 = 72.27;
const POINTS_PER_CM: f64 = POINTS_PER_INCH / 2.54;
const POINTS_PER_MM: f64 = POINTS_PER_INCH / 25.4;

/// Length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Point,
    Millimeter,
    Centimeter,
    Inch,
}

impl Unit {
    /// Number of TeX points in one unit
    pub fn points(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Millimeter => POINTS_PER_MM,
            Unit::Centimeter => POINTS_PER_CM,
            Unit::Inch => POINTS_PER_INCH,
        }
    }

    /// TeX unit suffix
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Point => "pt",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "pt" => Some(Unit::Point),
            "mm" => Some(Unit::Millimeter),
            "cm" => Some(Unit::Centimeter),
            "in" => Some(Unit::Inch),
            _ => None,
        }
    }
}

/// A number paired with a unit.
///
/// Equality compares the physical length, so `1in == 72.27pt`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Value {
    value: f64,
    unit: Unit,
}

impl Value {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn points(value: f64) -> Self {
        Self::new(value, Unit::Point)
    }

    pub const fn mm(value: f64) -> Self {
        Self::new(value, Unit::Millimeter)
    }

    pub const fn cm(value: f64) -> Self {
        Self::new(value, Unit::Centimeter)
    }

    pub const fn inch(value: f64) -> Self {
        Self::new(value, Unit::Inch)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Length in TeX points
    pub fn to_points(&self) -> f64 {
        self.value * self.unit.points()
    }

    /// Same length expressed in another unit
    pub fn convert_to(&self, unit: Unit) -> Value {
        if unit == self.unit {
            return *self;
        }
        Value::new(self.to_points() / unit.points(), unit)
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_finite()
    }

    /// Fixed precision text, e.g. `-3.00cm`
    pub fn to_fixed(&self, precision: usize) -> String {
        let rounded = format!("{:.*}", precision, self.value);
        // avoid "-0.00"
        let rounded = if rounded.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            rounded.trim_start_matches('-').to_string()
        } else {
            rounded
        };
        format!("{}{}", rounded, self.unit.suffix())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.unit == other.unit {
            self.value == other.value
        } else {
            self.to_points() == other.to_points()
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.to_points().partial_cmp(&other.to_points())
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::new(self.value + rhs.convert_to(self.unit).value, self.unit)
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::new(self.value - rhs.convert_to(self.unit).value, self.unit)
    }
}

impl Mul<f64> for Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Value {
        Value::new(self.value * rhs, self.unit)
    }
}

impl Mul<Value> for f64 {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        rhs * self
    }
}

impl Div<f64> for Value {
    type Output = Value;

    fn div(self, rhs: f64) -> Value {
        Value::new(self.value / rhs, self.unit)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::new(-self.value, self.unit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Value {
    type Err = ModelError;

    /// Parses `0.6pt`, `-3cm`, `2 in`; a bare number is taken as points.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (number, suffix) = s.split_at(split);
        let unit = if suffix.is_empty() {
            Unit::Point
        } else {
            Unit::from_suffix(suffix.trim())
                .ok_or_else(|| ModelError::InvalidValue(format!("unknown unit in '{}'", s)))?
        };
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidValue(format!("not a length: '{}'", s)))?;
        if !value.is_finite() {
            return Err(ModelError::InvalidValue(format!("not a finite length: '{}'", s)));
        }
        Ok(Value::new(value, unit))
    }
}

/// A 2D position made of two lengths
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: Value,
    pub y: Value,
}

impl Pos {
    pub const fn new(x: Value, y: Value) -> Self {
        Self { x, y }
    }

    /// Position in centimeters, the unit TikZ assumes for bare coordinates
    pub const fn cm(x: f64, y: f64) -> Self {
        Self::new(Value::cm(x), Value::cm(y))
    }

    pub fn convert_to(&self, unit: Unit) -> Pos {
        Pos::new(self.x.convert_to(unit), self.y.convert_to(unit))
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// TikZ coordinate text with fixed precision, e.g. `(-3.00cm,3.00cm)`
    pub fn to_fixed(&self, precision: usize) -> String {
        format!("({},{})", self.x.to_fixed(precision), self.y.to_fixed(precision))
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Pos {
    type Err = ModelError;

    /// Parses `(x, y)` where both coordinates carry units
    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ModelError::InvalidValue(format!("not a position: '{}'", s)))?;
        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| ModelError::InvalidValue(format!("not a position: '{}'", s)))?;
        Ok(Pos::new(x.parse()?, y.parse()?))
    }
}

/// TikZ line width presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWidth {
    UltraThin,
    VeryThin,
    Thin,
    SemiThick,
    Thick,
    VeryThick,
    UltraThick,
}

impl LineWidth {
    pub const ALL: [LineWidth; 7] = [
        LineWidth::UltraThin,
        LineWidth::VeryThin,
        LineWidth::Thin,
        LineWidth::SemiThick,
        LineWidth::Thick,
        LineWidth::VeryThick,
        LineWidth::UltraThick,
    ];

    pub fn value(self) -> Value {
        match self {
            LineWidth::UltraThin => Value::points(0.1),
            LineWidth::VeryThin => Value::points(0.2),
            LineWidth::Thin => Value::points(0.4),
            LineWidth::SemiThick => Value::points(0.6),
            LineWidth::Thick => Value::points(0.8),
            LineWidth::VeryThick => Value::points(1.2),
            LineWidth::UltraThick => Value::points(1.6),
        }
    }

    /// TikZ option name
    pub fn tikz_name(self) -> &'static str {
        match self {
            LineWidth::UltraThin => "ultra thin",
            LineWidth::VeryThin => "very thin",
            LineWidth::Thin => "thin",
            LineWidth::SemiThick => "semithick",
            LineWidth::Thick => "thick",
            LineWidth::VeryThick => "very thick",
            LineWidth::UltraThick => "ultra thick",
        }
    }

    /// The preset matching a width exactly, if any
    pub fn from_value(value: Value) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| {
            (preset.value().to_points() - value.to_points()).abs() < 1e-9
        })
    }
}

impl From<LineWidth> for Value {
    fn from(width: LineWidth) -> Self {
        width.value()
    }
}
