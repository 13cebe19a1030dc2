//! Typed style setters

use crate::{
    Arrow, Color, Document, LineWidth, PenStyle, PropertyValue, Result, Shape, StyleProperty,
    TextAlignment, Uid, Value,
};

/// Mutable handle on one style, obtained from [`Document::edit_style`].
///
/// Each setter records an undo step and schedules change notifications;
/// setting a property to the value it already holds does nothing. Wrap
/// several calls in a [`Transaction`](crate::Transaction) to make them one
/// undo step.
#[derive(Debug)]
pub struct StyleEditor<'a> {
    document: &'a mut Document,
    style: Uid,
}

impl<'a> StyleEditor<'a> {
    pub(crate) fn new(document: &'a mut Document, style: Uid) -> Self {
        Self { document, style }
    }

    pub fn uid(&self) -> Uid {
        self.style
    }

    pub fn set_property(&mut self, value: PropertyValue) -> Result<()> {
        self.document.set_style_property(self.style, value)
    }

    /// Remove the style's own value so the property is inherited again
    pub fn unset_property(&mut self, property: StyleProperty) -> Result<()> {
        self.document.unset_style_property(self.style, property)
    }

    pub fn set_parent_style(&mut self, parent: Option<Uid>) -> Result<()> {
        self.document.set_parent_style(self.style, parent)
    }

    /// Line width from one of the TikZ presets
    pub fn set_line_width_preset(&mut self, preset: LineWidth) -> Result<()> {
        self.set_line_width(preset.into())
    }

    pub fn set_pen_color(&mut self, value: Color) -> Result<()> {
        self.set_property(PropertyValue::PenColor(value))
    }

    pub fn unset_pen_color(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::PenColor)
    }

    pub fn set_fill_color(&mut self, value: Color) -> Result<()> {
        self.set_property(PropertyValue::FillColor(value))
    }

    pub fn unset_fill_color(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::FillColor)
    }

    /// Value is clamped to [0, 1]
    pub fn set_pen_opacity(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::PenOpacity(value))
    }

    pub fn unset_pen_opacity(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::PenOpacity)
    }

    /// Value is clamped to [0, 1]
    pub fn set_fill_opacity(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::FillOpacity(value))
    }

    pub fn unset_fill_opacity(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::FillOpacity)
    }

    pub fn set_pen_style(&mut self, value: PenStyle) -> Result<()> {
        self.set_property(PropertyValue::PenStyle(value))
    }

    pub fn unset_pen_style(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::PenStyle)
    }

    pub fn set_line_width(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::LineWidth(value))
    }

    pub fn unset_line_width(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::LineWidth)
    }

    pub fn set_double_line(&mut self, value: bool) -> Result<()> {
        self.set_property(PropertyValue::DoubleLine(value))
    }

    pub fn unset_double_line(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::DoubleLine)
    }

    pub fn set_inner_line_width(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::InnerLineWidth(value))
    }

    pub fn unset_inner_line_width(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::InnerLineWidth)
    }

    pub fn set_inner_line_color(&mut self, value: Color) -> Result<()> {
        self.set_property(PropertyValue::InnerLineColor(value))
    }

    pub fn unset_inner_line_color(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::InnerLineColor)
    }

    pub fn set_rotation(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::Rotation(value))
    }

    pub fn unset_rotation(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::Rotation)
    }

    pub fn set_radius_x(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::RadiusX(value))
    }

    pub fn unset_radius_x(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::RadiusX)
    }

    pub fn set_radius_y(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::RadiusY(value))
    }

    pub fn unset_radius_y(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::RadiusY)
    }

    /// Value is normalized into (-180, 180]
    pub fn set_bend_angle(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::BendAngle(value))
    }

    pub fn unset_bend_angle(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::BendAngle)
    }

    pub fn set_looseness(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::Looseness(value))
    }

    pub fn unset_looseness(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::Looseness)
    }

    pub fn set_out_angle(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::OutAngle(value))
    }

    pub fn unset_out_angle(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::OutAngle)
    }

    pub fn set_in_angle(&mut self, value: f64) -> Result<()> {
        self.set_property(PropertyValue::InAngle(value))
    }

    pub fn unset_in_angle(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::InAngle)
    }

    pub fn set_arrow_tail(&mut self, value: Arrow) -> Result<()> {
        self.set_property(PropertyValue::ArrowTail(value))
    }

    pub fn unset_arrow_tail(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::ArrowTail)
    }

    pub fn set_arrow_head(&mut self, value: Arrow) -> Result<()> {
        self.set_property(PropertyValue::ArrowHead(value))
    }

    pub fn unset_arrow_head(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::ArrowHead)
    }

    pub fn set_shorten_start(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::ShortenStart(value))
    }

    pub fn unset_shorten_start(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::ShortenStart)
    }

    pub fn set_shorten_end(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::ShortenEnd(value))
    }

    pub fn unset_shorten_end(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::ShortenEnd)
    }

    pub fn set_text_align(&mut self, value: TextAlignment) -> Result<()> {
        self.set_property(PropertyValue::TextAlign(value))
    }

    pub fn unset_text_align(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::TextAlign)
    }

    pub fn set_shape(&mut self, value: Shape) -> Result<()> {
        self.set_property(PropertyValue::Shape(value))
    }

    pub fn unset_shape(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::Shape)
    }

    pub fn set_inner_sep(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::InnerSep(value))
    }

    pub fn unset_inner_sep(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::InnerSep)
    }

    pub fn set_outer_sep(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::OuterSep(value))
    }

    pub fn unset_outer_sep(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::OuterSep)
    }

    pub fn set_minimum_width(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::MinimumWidth(value))
    }

    pub fn unset_minimum_width(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::MinimumWidth)
    }

    pub fn set_minimum_height(&mut self, value: Value) -> Result<()> {
        self.set_property(PropertyValue::MinimumHeight(value))
    }

    pub fn unset_minimum_height(&mut self) -> Result<()> {
        self.unset_property(StyleProperty::MinimumHeight)
    }
}
