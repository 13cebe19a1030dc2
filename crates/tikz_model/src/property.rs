//! Style property keys, values and the per-style property bag

use crate::{Arrow, Color, ModelError, PenStyle, Result, Shape, TextAlignment, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which family of properties a style carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleKind {
    /// The document's shared root style; accepts every property
    Document,
    /// Style owned by a node
    Node,
    /// Style owned by an edge or ellipse path
    Edge,
}

/// Every property a style can set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleProperty {
    PenColor,
    FillColor,
    PenOpacity,
    FillOpacity,
    PenStyle,
    LineWidth,
    DoubleLine,
    InnerLineWidth,
    InnerLineColor,
    Rotation,
    RadiusX,
    RadiusY,
    BendAngle,
    Looseness,
    OutAngle,
    InAngle,
    ArrowTail,
    ArrowHead,
    ShortenStart,
    ShortenEnd,
    TextAlign,
    Shape,
    InnerSep,
    OuterSep,
    MinimumWidth,
    MinimumHeight,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 26] = [
        StyleProperty::PenColor,
        StyleProperty::FillColor,
        StyleProperty::PenOpacity,
        StyleProperty::FillOpacity,
        StyleProperty::PenStyle,
        StyleProperty::LineWidth,
        StyleProperty::DoubleLine,
        StyleProperty::InnerLineWidth,
        StyleProperty::InnerLineColor,
        StyleProperty::Rotation,
        StyleProperty::RadiusX,
        StyleProperty::RadiusY,
        StyleProperty::BendAngle,
        StyleProperty::Looseness,
        StyleProperty::OutAngle,
        StyleProperty::InAngle,
        StyleProperty::ArrowTail,
        StyleProperty::ArrowHead,
        StyleProperty::ShortenStart,
        StyleProperty::ShortenEnd,
        StyleProperty::TextAlign,
        StyleProperty::Shape,
        StyleProperty::InnerSep,
        StyleProperty::OuterSep,
        StyleProperty::MinimumWidth,
        StyleProperty::MinimumHeight,
    ];

    /// Canonical key used in the persisted property map
    pub fn key(self) -> &'static str {
        match self {
            StyleProperty::PenColor => "pen-color",
            StyleProperty::FillColor => "fill-color",
            StyleProperty::PenOpacity => "pen-opacity",
            StyleProperty::FillOpacity => "fill-opacity",
            StyleProperty::PenStyle => "pen-style",
            StyleProperty::LineWidth => "line-width",
            StyleProperty::DoubleLine => "double-line",
            StyleProperty::InnerLineWidth => "inner-line-width",
            StyleProperty::InnerLineColor => "inner-line-color",
            StyleProperty::Rotation => "rotation",
            StyleProperty::RadiusX => "radius-x",
            StyleProperty::RadiusY => "radius-y",
            StyleProperty::BendAngle => "bend-angle",
            StyleProperty::Looseness => "looseness",
            StyleProperty::OutAngle => "out-angle",
            StyleProperty::InAngle => "in-angle",
            StyleProperty::ArrowTail => "arrow-tail",
            StyleProperty::ArrowHead => "arrow-head",
            StyleProperty::ShortenStart => "shorten-start",
            StyleProperty::ShortenEnd => "shorten-end",
            StyleProperty::TextAlign => "text-align",
            StyleProperty::Shape => "shape",
            StyleProperty::InnerSep => "inner-sep",
            StyleProperty::OuterSep => "outer-sep",
            StyleProperty::MinimumWidth => "minimum-width",
            StyleProperty::MinimumHeight => "minimum-height",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn is_path_property(self) -> bool {
        matches!(
            self,
            StyleProperty::RadiusX
                | StyleProperty::RadiusY
                | StyleProperty::BendAngle
                | StyleProperty::Looseness
                | StyleProperty::OutAngle
                | StyleProperty::InAngle
                | StyleProperty::ArrowTail
                | StyleProperty::ArrowHead
                | StyleProperty::ShortenStart
                | StyleProperty::ShortenEnd
        )
    }

    pub fn is_node_property(self) -> bool {
        matches!(
            self,
            StyleProperty::TextAlign
                | StyleProperty::Shape
                | StyleProperty::InnerSep
                | StyleProperty::OuterSep
                | StyleProperty::MinimumWidth
                | StyleProperty::MinimumHeight
        )
    }

    /// Whether a style of `kind` may set this property
    pub fn applies_to(self, kind: StyleKind) -> bool {
        match kind {
            StyleKind::Document => true,
            StyleKind::Node => !self.is_path_property(),
            StyleKind::Edge => !self.is_node_property(),
        }
    }

    /// Parse the canonical text of a value for this property
    pub fn parse_value(self, text: &str) -> Result<PropertyValue> {
        let number = || -> Result<f64> {
            let n: f64 = text
                .trim()
                .parse()
                .map_err(|_| ModelError::InvalidValue(format!("{}: not a number '{}'", self, text)))?;
            if n.is_finite() {
                Ok(n)
            } else {
                Err(ModelError::InvalidValue(format!("{}: not finite '{}'", self, text)))
            }
        };
        let value = match self {
            StyleProperty::PenColor => PropertyValue::PenColor(text.parse()?),
            StyleProperty::FillColor => PropertyValue::FillColor(text.parse()?),
            StyleProperty::PenOpacity => PropertyValue::PenOpacity(number()?),
            StyleProperty::FillOpacity => PropertyValue::FillOpacity(number()?),
            StyleProperty::PenStyle => PropertyValue::PenStyle(text.parse()?),
            StyleProperty::LineWidth => PropertyValue::LineWidth(text.parse()?),
            StyleProperty::DoubleLine => PropertyValue::DoubleLine(match text {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(ModelError::InvalidValue(format!(
                        "{}: not a boolean '{}'",
                        self, text
                    )))
                }
            }),
            StyleProperty::InnerLineWidth => PropertyValue::InnerLineWidth(text.parse()?),
            StyleProperty::InnerLineColor => PropertyValue::InnerLineColor(text.parse()?),
            StyleProperty::Rotation => PropertyValue::Rotation(number()?),
            StyleProperty::RadiusX => PropertyValue::RadiusX(text.parse()?),
            StyleProperty::RadiusY => PropertyValue::RadiusY(text.parse()?),
            StyleProperty::BendAngle => PropertyValue::BendAngle(number()?),
            StyleProperty::Looseness => PropertyValue::Looseness(number()?),
            StyleProperty::OutAngle => PropertyValue::OutAngle(number()?),
            StyleProperty::InAngle => PropertyValue::InAngle(number()?),
            StyleProperty::ArrowTail => PropertyValue::ArrowTail(text.parse()?),
            StyleProperty::ArrowHead => PropertyValue::ArrowHead(text.parse()?),
            StyleProperty::ShortenStart => PropertyValue::ShortenStart(text.parse()?),
            StyleProperty::ShortenEnd => PropertyValue::ShortenEnd(text.parse()?),
            StyleProperty::TextAlign => PropertyValue::TextAlign(text.parse()?),
            StyleProperty::Shape => PropertyValue::Shape(text.parse()?),
            StyleProperty::InnerSep => PropertyValue::InnerSep(text.parse()?),
            StyleProperty::OuterSep => PropertyValue::OuterSep(text.parse()?),
            StyleProperty::MinimumWidth => PropertyValue::MinimumWidth(text.parse()?),
            StyleProperty::MinimumHeight => PropertyValue::MinimumHeight(text.parse()?),
        };
        Ok(value)
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StyleProperty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s).ok_or_else(|| ModelError::InvalidValue(format!("unknown property '{}'", s)))
    }
}

/// A property together with its value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    PenColor(Color),
    FillColor(Color),
    PenOpacity(f64),
    FillOpacity(f64),
    PenStyle(PenStyle),
    LineWidth(Value),
    DoubleLine(bool),
    InnerLineWidth(Value),
    InnerLineColor(Color),
    Rotation(f64),
    RadiusX(Value),
    RadiusY(Value),
    BendAngle(f64),
    Looseness(f64),
    OutAngle(f64),
    InAngle(f64),
    ArrowTail(Arrow),
    ArrowHead(Arrow),
    ShortenStart(Value),
    ShortenEnd(Value),
    TextAlign(TextAlignment),
    Shape(Shape),
    InnerSep(Value),
    OuterSep(Value),
    MinimumWidth(Value),
    MinimumHeight(Value),
}

impl PropertyValue {
    pub fn property(&self) -> StyleProperty {
        match self {
            PropertyValue::PenColor(_) => StyleProperty::PenColor,
            PropertyValue::FillColor(_) => StyleProperty::FillColor,
            PropertyValue::PenOpacity(_) => StyleProperty::PenOpacity,
            PropertyValue::FillOpacity(_) => StyleProperty::FillOpacity,
            PropertyValue::PenStyle(_) => StyleProperty::PenStyle,
            PropertyValue::LineWidth(_) => StyleProperty::LineWidth,
            PropertyValue::DoubleLine(_) => StyleProperty::DoubleLine,
            PropertyValue::InnerLineWidth(_) => StyleProperty::InnerLineWidth,
            PropertyValue::InnerLineColor(_) => StyleProperty::InnerLineColor,
            PropertyValue::Rotation(_) => StyleProperty::Rotation,
            PropertyValue::RadiusX(_) => StyleProperty::RadiusX,
            PropertyValue::RadiusY(_) => StyleProperty::RadiusY,
            PropertyValue::BendAngle(_) => StyleProperty::BendAngle,
            PropertyValue::Looseness(_) => StyleProperty::Looseness,
            PropertyValue::OutAngle(_) => StyleProperty::OutAngle,
            PropertyValue::InAngle(_) => StyleProperty::InAngle,
            PropertyValue::ArrowTail(_) => StyleProperty::ArrowTail,
            PropertyValue::ArrowHead(_) => StyleProperty::ArrowHead,
            PropertyValue::ShortenStart(_) => StyleProperty::ShortenStart,
            PropertyValue::ShortenEnd(_) => StyleProperty::ShortenEnd,
            PropertyValue::TextAlign(_) => StyleProperty::TextAlign,
            PropertyValue::Shape(_) => StyleProperty::Shape,
            PropertyValue::InnerSep(_) => StyleProperty::InnerSep,
            PropertyValue::OuterSep(_) => StyleProperty::OuterSep,
            PropertyValue::MinimumWidth(_) => StyleProperty::MinimumWidth,
            PropertyValue::MinimumHeight(_) => StyleProperty::MinimumHeight,
        }
    }

    /// Hard-coded default of a property. `OuterSep` depends on the pen
    /// width and is resolved by the style view instead.
    pub fn default_for(property: StyleProperty) -> PropertyValue {
        match property {
            StyleProperty::PenColor => PropertyValue::PenColor(defaults::PEN_COLOR),
            StyleProperty::FillColor => PropertyValue::FillColor(defaults::FILL_COLOR),
            StyleProperty::PenOpacity => PropertyValue::PenOpacity(defaults::PEN_OPACITY),
            StyleProperty::FillOpacity => PropertyValue::FillOpacity(defaults::FILL_OPACITY),
            StyleProperty::PenStyle => PropertyValue::PenStyle(defaults::PEN_STYLE),
            StyleProperty::LineWidth => PropertyValue::LineWidth(defaults::LINE_WIDTH),
            StyleProperty::DoubleLine => PropertyValue::DoubleLine(defaults::DOUBLE_LINE),
            StyleProperty::InnerLineWidth => PropertyValue::InnerLineWidth(defaults::INNER_LINE_WIDTH),
            StyleProperty::InnerLineColor => PropertyValue::InnerLineColor(defaults::INNER_LINE_COLOR),
            StyleProperty::Rotation => PropertyValue::Rotation(defaults::ROTATION),
            StyleProperty::RadiusX => PropertyValue::RadiusX(defaults::RADIUS),
            StyleProperty::RadiusY => PropertyValue::RadiusY(defaults::RADIUS),
            StyleProperty::BendAngle => PropertyValue::BendAngle(defaults::BEND_ANGLE),
            StyleProperty::Looseness => PropertyValue::Looseness(defaults::LOOSENESS),
            StyleProperty::OutAngle => PropertyValue::OutAngle(defaults::OUT_ANGLE),
            StyleProperty::InAngle => PropertyValue::InAngle(defaults::IN_ANGLE),
            StyleProperty::ArrowTail => PropertyValue::ArrowTail(defaults::ARROW),
            StyleProperty::ArrowHead => PropertyValue::ArrowHead(defaults::ARROW),
            StyleProperty::ShortenStart => PropertyValue::ShortenStart(defaults::SHORTEN),
            StyleProperty::ShortenEnd => PropertyValue::ShortenEnd(defaults::SHORTEN),
            StyleProperty::TextAlign => PropertyValue::TextAlign(defaults::TEXT_ALIGN),
            StyleProperty::Shape => PropertyValue::Shape(defaults::SHAPE),
            StyleProperty::InnerSep => PropertyValue::InnerSep(defaults::INNER_SEP),
            StyleProperty::OuterSep => PropertyValue::OuterSep(defaults::LINE_WIDTH * 0.5),
            StyleProperty::MinimumWidth => PropertyValue::MinimumWidth(defaults::MINIMUM_SIZE),
            StyleProperty::MinimumHeight => PropertyValue::MinimumHeight(defaults::MINIMUM_SIZE),
        }
    }

    /// False for NaN or infinite numbers and lengths, which have no
    /// canonical text
    pub fn is_finite(&self) -> bool {
        match self {
            PropertyValue::PenOpacity(n)
            | PropertyValue::FillOpacity(n)
            | PropertyValue::Rotation(n)
            | PropertyValue::BendAngle(n)
            | PropertyValue::Looseness(n)
            | PropertyValue::OutAngle(n)
            | PropertyValue::InAngle(n) => n.is_finite(),
            PropertyValue::LineWidth(v)
            | PropertyValue::InnerLineWidth(v)
            | PropertyValue::RadiusX(v)
            | PropertyValue::RadiusY(v)
            | PropertyValue::ShortenStart(v)
            | PropertyValue::ShortenEnd(v)
            | PropertyValue::InnerSep(v)
            | PropertyValue::OuterSep(v)
            | PropertyValue::MinimumWidth(v)
            | PropertyValue::MinimumHeight(v) => v.is_valid(),
            PropertyValue::PenColor(_)
            | PropertyValue::FillColor(_)
            | PropertyValue::InnerLineColor(_)
            | PropertyValue::PenStyle(_)
            | PropertyValue::DoubleLine(_)
            | PropertyValue::ArrowTail(_)
            | PropertyValue::ArrowHead(_)
            | PropertyValue::TextAlign(_)
            | PropertyValue::Shape(_) => true,
        }
    }

    /// Put the value into its canonical range
    pub fn normalized(self) -> PropertyValue {
        match self {
            PropertyValue::BendAngle(angle) => PropertyValue::BendAngle(normalize_angle(angle)),
            PropertyValue::PenOpacity(o) => PropertyValue::PenOpacity(o.clamp(0.0, 1.0)),
            PropertyValue::FillOpacity(o) => PropertyValue::FillOpacity(o.clamp(0.0, 1.0)),
            other => other,
        }
    }

    /// Canonical text written to the persisted property map
    pub fn to_canonical_string(&self) -> String {
        match self {
            PropertyValue::PenColor(c)
            | PropertyValue::FillColor(c)
            | PropertyValue::InnerLineColor(c) => c.to_string(),
            PropertyValue::PenOpacity(n)
            | PropertyValue::FillOpacity(n)
            | PropertyValue::Rotation(n)
            | PropertyValue::BendAngle(n)
            | PropertyValue::Looseness(n)
            | PropertyValue::OutAngle(n)
            | PropertyValue::InAngle(n) => n.to_string(),
            PropertyValue::PenStyle(s) => s.to_string(),
            PropertyValue::DoubleLine(b) => b.to_string(),
            PropertyValue::LineWidth(v)
            | PropertyValue::InnerLineWidth(v)
            | PropertyValue::RadiusX(v)
            | PropertyValue::RadiusY(v)
            | PropertyValue::ShortenStart(v)
            | PropertyValue::ShortenEnd(v)
            | PropertyValue::InnerSep(v)
            | PropertyValue::OuterSep(v)
            | PropertyValue::MinimumWidth(v)
            | PropertyValue::MinimumHeight(v) => v.to_string(),
            PropertyValue::ArrowTail(a) | PropertyValue::ArrowHead(a) => a.to_string(),
            PropertyValue::TextAlign(a) => a.to_string(),
            PropertyValue::Shape(s) => s.to_string(),
        }
    }
}

/// Hard-coded property defaults, the end of every parent chain
pub mod defaults {
    use crate::{Arrow, Color, PenStyle, Shape, TextAlignment, Value};

    pub const PEN_COLOR: Color = Color::BLACK;
    pub const FILL_COLOR: Color = Color::NONE;
    pub const PEN_OPACITY: f64 = 1.0;
    pub const FILL_OPACITY: f64 = 1.0;
    pub const PEN_STYLE: PenStyle = PenStyle::Solid;
    /// TikZ `thin`
    pub const LINE_WIDTH: Value = Value::points(0.4);
    pub const DOUBLE_LINE: bool = false;
    /// TikZ `double distance` default
    pub const INNER_LINE_WIDTH: Value = Value::points(0.6);
    pub const INNER_LINE_COLOR: Color = Color::WHITE;
    pub const ROTATION: f64 = 0.0;
    pub const RADIUS: Value = Value::cm(1.0);
    pub const BEND_ANGLE: f64 = 0.0;
    pub const LOOSENESS: f64 = 1.0;
    pub const OUT_ANGLE: f64 = 45.0;
    pub const IN_ANGLE: f64 = 135.0;
    pub const ARROW: Arrow = Arrow::None;
    pub const SHORTEN: Value = Value::points(0.0);
    pub const TEXT_ALIGN: TextAlignment = TextAlignment::NoAlign;
    pub const SHAPE: Shape = Shape::Rectangle;
    /// .3333em at 10pt
    pub const INNER_SEP: Value = Value::points(3.333);
    pub const MINIMUM_SIZE: Value = Value::points(0.0);
}

/// Wrap an angle into (-180, 180]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Properties explicitly set on one style. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    pub pen_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub pen_opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub pen_style: Option<PenStyle>,
    pub line_width: Option<Value>,
    pub double_line: Option<bool>,
    pub inner_line_width: Option<Value>,
    pub inner_line_color: Option<Color>,
    pub rotation: Option<f64>,
    pub radius_x: Option<Value>,
    pub radius_y: Option<Value>,
    pub bend_angle: Option<f64>,
    pub looseness: Option<f64>,
    pub out_angle: Option<f64>,
    pub in_angle: Option<f64>,
    pub arrow_tail: Option<Arrow>,
    pub arrow_head: Option<Arrow>,
    pub shorten_start: Option<Value>,
    pub shorten_end: Option<Value>,
    pub text_align: Option<TextAlignment>,
    pub shape: Option<Shape>,
    pub inner_sep: Option<Value>,
    pub outer_sep: Option<Value>,
    pub minimum_width: Option<Value>,
    pub minimum_height: Option<Value>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value of a property, `None` when unset
    pub fn get(&self, property: StyleProperty) -> Option<PropertyValue> {
        match property {
            StyleProperty::PenColor => self.pen_color.map(PropertyValue::PenColor),
            StyleProperty::FillColor => self.fill_color.map(PropertyValue::FillColor),
            StyleProperty::PenOpacity => self.pen_opacity.map(PropertyValue::PenOpacity),
            StyleProperty::FillOpacity => self.fill_opacity.map(PropertyValue::FillOpacity),
            StyleProperty::PenStyle => self.pen_style.map(PropertyValue::PenStyle),
            StyleProperty::LineWidth => self.line_width.map(PropertyValue::LineWidth),
            StyleProperty::DoubleLine => self.double_line.map(PropertyValue::DoubleLine),
            StyleProperty::InnerLineWidth => self.inner_line_width.map(PropertyValue::InnerLineWidth),
            StyleProperty::InnerLineColor => self.inner_line_color.map(PropertyValue::InnerLineColor),
            StyleProperty::Rotation => self.rotation.map(PropertyValue::Rotation),
            StyleProperty::RadiusX => self.radius_x.map(PropertyValue::RadiusX),
            StyleProperty::RadiusY => self.radius_y.map(PropertyValue::RadiusY),
            StyleProperty::BendAngle => self.bend_angle.map(PropertyValue::BendAngle),
            StyleProperty::Looseness => self.looseness.map(PropertyValue::Looseness),
            StyleProperty::OutAngle => self.out_angle.map(PropertyValue::OutAngle),
            StyleProperty::InAngle => self.in_angle.map(PropertyValue::InAngle),
            StyleProperty::ArrowTail => self.arrow_tail.map(PropertyValue::ArrowTail),
            StyleProperty::ArrowHead => self.arrow_head.map(PropertyValue::ArrowHead),
            StyleProperty::ShortenStart => self.shorten_start.map(PropertyValue::ShortenStart),
            StyleProperty::ShortenEnd => self.shorten_end.map(PropertyValue::ShortenEnd),
            StyleProperty::TextAlign => self.text_align.map(PropertyValue::TextAlign),
            StyleProperty::Shape => self.shape.map(PropertyValue::Shape),
            StyleProperty::InnerSep => self.inner_sep.map(PropertyValue::InnerSep),
            StyleProperty::OuterSep => self.outer_sep.map(PropertyValue::OuterSep),
            StyleProperty::MinimumWidth => self.minimum_width.map(PropertyValue::MinimumWidth),
            StyleProperty::MinimumHeight => self.minimum_height.map(PropertyValue::MinimumHeight),
        }
    }

    pub fn is_set(&self, property: StyleProperty) -> bool {
        self.get(property).is_some()
    }

    /// Store a value, marking its property as set
    pub fn set(&mut self, value: PropertyValue) {
        match value {
            PropertyValue::PenColor(v) => self.pen_color = Some(v),
            PropertyValue::FillColor(v) => self.fill_color = Some(v),
            PropertyValue::PenOpacity(v) => self.pen_opacity = Some(v),
            PropertyValue::FillOpacity(v) => self.fill_opacity = Some(v),
            PropertyValue::PenStyle(v) => self.pen_style = Some(v),
            PropertyValue::LineWidth(v) => self.line_width = Some(v),
            PropertyValue::DoubleLine(v) => self.double_line = Some(v),
            PropertyValue::InnerLineWidth(v) => self.inner_line_width = Some(v),
            PropertyValue::InnerLineColor(v) => self.inner_line_color = Some(v),
            PropertyValue::Rotation(v) => self.rotation = Some(v),
            PropertyValue::RadiusX(v) => self.radius_x = Some(v),
            PropertyValue::RadiusY(v) => self.radius_y = Some(v),
            PropertyValue::BendAngle(v) => self.bend_angle = Some(v),
            PropertyValue::Looseness(v) => self.looseness = Some(v),
            PropertyValue::OutAngle(v) => self.out_angle = Some(v),
            PropertyValue::InAngle(v) => self.in_angle = Some(v),
            PropertyValue::ArrowTail(v) => self.arrow_tail = Some(v),
            PropertyValue::ArrowHead(v) => self.arrow_head = Some(v),
            PropertyValue::ShortenStart(v) => self.shorten_start = Some(v),
            PropertyValue::ShortenEnd(v) => self.shorten_end = Some(v),
            PropertyValue::TextAlign(v) => self.text_align = Some(v),
            PropertyValue::Shape(v) => self.shape = Some(v),
            PropertyValue::InnerSep(v) => self.inner_sep = Some(v),
            PropertyValue::OuterSep(v) => self.outer_sep = Some(v),
            PropertyValue::MinimumWidth(v) => self.minimum_width = Some(v),
            PropertyValue::MinimumHeight(v) => self.minimum_height = Some(v),
        }
    }

    /// Clear the set flag of a property
    pub fn unset(&mut self, property: StyleProperty) {
        match property {
            StyleProperty::PenColor => self.pen_color = None,
            StyleProperty::FillColor => self.fill_color = None,
            StyleProperty::PenOpacity => self.pen_opacity = None,
            StyleProperty::FillOpacity => self.fill_opacity = None,
            StyleProperty::PenStyle => self.pen_style = None,
            StyleProperty::LineWidth => self.line_width = None,
            StyleProperty::DoubleLine => self.double_line = None,
            StyleProperty::InnerLineWidth => self.inner_line_width = None,
            StyleProperty::InnerLineColor => self.inner_line_color = None,
            StyleProperty::Rotation => self.rotation = None,
            StyleProperty::RadiusX => self.radius_x = None,
            StyleProperty::RadiusY => self.radius_y = None,
            StyleProperty::BendAngle => self.bend_angle = None,
            StyleProperty::Looseness => self.looseness = None,
            StyleProperty::OutAngle => self.out_angle = None,
            StyleProperty::InAngle => self.in_angle = None,
            StyleProperty::ArrowTail => self.arrow_tail = None,
            StyleProperty::ArrowHead => self.arrow_head = None,
            StyleProperty::ShortenStart => self.shorten_start = None,
            StyleProperty::ShortenEnd => self.shorten_end = None,
            StyleProperty::TextAlign => self.text_align = None,
            StyleProperty::Shape => self.shape = None,
            StyleProperty::InnerSep => self.inner_sep = None,
            StyleProperty::OuterSep => self.outer_sep = None,
            StyleProperty::MinimumWidth => self.minimum_width = None,
            StyleProperty::MinimumHeight => self.minimum_height = None,
        }
    }

    /// Set properties in canonical order
    pub fn iter_set(&self) -> impl Iterator<Item = PropertyValue> + '_ {
        StyleProperty::ALL.into_iter().filter_map(|p| self.get(p))
    }

    /// Check if no property is set
    pub fn is_empty(&self) -> bool {
        self.iter_set().next().is_none()
    }
}
