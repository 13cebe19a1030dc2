//! Style system - cascading property bags and resolution
//!
//! A style stores only the properties explicitly set on it. Reading a
//! property walks the parent chain and ends at the hard-coded default:
//!
//! ```text
//! node style --parent--> document style --> PropertyValue::default_for
//! ```

use crate::property::defaults;
use crate::{
    Arrow, Color, Document, Entity, EntityType, PenStyle, PropertyValue, Shape, StyleKind,
    StyleProperties, StyleProperty, TextAlignment, Uid, Value,
};
use serde::{Deserialize, Serialize};

/// Stored state of one style
#[derive(Debug, Clone)]
pub struct Style {
    uid: Uid,
    kind: StyleKind,
    parent: Option<Uid>,
    children: Vec<Uid>,
    properties: StyleProperties,
}

impl Style {
    pub(crate) fn new(uid: Uid, kind: StyleKind) -> Self {
        Self {
            uid,
            kind,
            parent: None,
            children: Vec::new(),
            properties: StyleProperties::default(),
        }
    }

    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    /// The style this one falls back to
    pub fn parent(&self) -> Option<Uid> {
        self.parent
    }

    /// Styles whose parent is this style
    pub fn children(&self) -> &[Uid] {
        &self.children
    }

    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }

    /// Whether this style itself overrides `property`
    pub fn property_set(&self, property: StyleProperty) -> bool {
        self.properties.is_set(property)
    }

    pub(crate) fn properties_mut(&mut self) -> &mut StyleProperties {
        &mut self.properties
    }

    pub(crate) fn set_parent_uid(&mut self, parent: Option<Uid>) {
        self.parent = parent;
    }

    pub(crate) fn add_child(&mut self, child: Uid) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: Uid) {
        self.children.retain(|c| *c != child);
    }
}

impl Entity for Style {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Style
    }
}

/// Where a resolved property value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertySource {
    /// Set on the style itself
    Own,
    /// Inherited from an ancestor style
    Inherited(Uid),
    /// Hard-coded default
    Default,
}

/// Read access to a style with cascading resolution through the document
#[derive(Debug, Clone, Copy)]
pub struct StyleView<'a> {
    document: &'a Document,
    style: &'a Style,
}

impl<'a> StyleView<'a> {
    pub(crate) fn new(document: &'a Document, style: &'a Style) -> Self {
        Self { document, style }
    }

    pub fn uid(&self) -> Uid {
        self.style.uid
    }

    pub fn kind(&self) -> StyleKind {
        self.style.kind
    }

    pub fn style(&self) -> &'a Style {
        self.style
    }

    pub fn properties(&self) -> &'a StyleProperties {
        &self.style.properties
    }

    pub fn property_set(&self, property: StyleProperty) -> bool {
        self.style.property_set(property)
    }

    pub fn parent_style(&self) -> Option<StyleView<'a>> {
        self.style.parent.and_then(|uid| self.document.style_by_uid(uid))
    }

    /// First value found along the parent chain, or `None`
    fn resolve<T>(&self, field: impl Fn(&StyleProperties) -> Option<T>) -> Option<T> {
        let mut current = Some(*self);
        // bounded walk; the chain is acyclic by construction
        let mut remaining = self.document.style_count() + 1;
        while let Some(view) = current {
            if let Some(value) = field(&view.style.properties) {
                return Some(value);
            }
            remaining -= 1;
            if remaining == 0 {
                debug_assert!(false, "style parent chain contains a cycle");
                return None;
            }
            current = view.parent_style();
        }
        None
    }

    /// Resolved value of any property
    pub fn value(&self, property: StyleProperty) -> PropertyValue {
        match self.resolve(|p| p.get(property)) {
            Some(value) => value,
            None if property == StyleProperty::OuterSep => {
                PropertyValue::OuterSep(self.pen_width() * 0.5)
            }
            None => PropertyValue::default_for(property),
        }
    }

    /// Which style in the chain supplies `property`
    pub fn property_source(&self, property: StyleProperty) -> PropertySource {
        if self.property_set(property) {
            return PropertySource::Own;
        }
        let mut current = self.parent_style();
        let mut remaining = self.document.style_count();
        while let Some(view) = current {
            if view.property_set(property) {
                return PropertySource::Inherited(view.uid());
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            current = view.parent_style();
        }
        PropertySource::Default
    }

    pub fn pen_color(&self) -> Color {
        self.resolve(|p| p.pen_color).unwrap_or(defaults::PEN_COLOR)
    }

    pub fn fill_color(&self) -> Color {
        self.resolve(|p| p.fill_color).unwrap_or(defaults::FILL_COLOR)
    }

    pub fn pen_opacity(&self) -> f64 {
        self.resolve(|p| p.pen_opacity).unwrap_or(defaults::PEN_OPACITY)
    }

    pub fn fill_opacity(&self) -> f64 {
        self.resolve(|p| p.fill_opacity).unwrap_or(defaults::FILL_OPACITY)
    }

    pub fn pen_style(&self) -> PenStyle {
        self.resolve(|p| p.pen_style).unwrap_or(defaults::PEN_STYLE)
    }

    pub fn line_width(&self) -> Value {
        self.resolve(|p| p.line_width).unwrap_or(defaults::LINE_WIDTH)
    }

    pub fn double_line(&self) -> bool {
        self.resolve(|p| p.double_line).unwrap_or(defaults::DOUBLE_LINE)
    }

    /// Gap between the two strokes of a double line
    pub fn inner_line_width(&self) -> Value {
        self.resolve(|p| p.inner_line_width).unwrap_or(defaults::INNER_LINE_WIDTH)
    }

    pub fn inner_line_color(&self) -> Color {
        self.resolve(|p| p.inner_line_color).unwrap_or(defaults::INNER_LINE_COLOR)
    }

    /// Total stroke width: a double line is two lines plus the gap between them
    pub fn pen_width(&self) -> Value {
        let line_width = self.line_width();
        if self.double_line() {
            line_width * 2.0 + self.inner_line_width()
        } else {
            line_width
        }
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.resolve(|p| p.rotation).unwrap_or(defaults::ROTATION)
    }

    pub fn radius_x(&self) -> Value {
        self.resolve(|p| p.radius_x).unwrap_or(defaults::RADIUS)
    }

    pub fn radius_y(&self) -> Value {
        self.resolve(|p| p.radius_y).unwrap_or(defaults::RADIUS)
    }

    /// Bend angle in degrees, always in (-180, 180]
    pub fn bend_angle(&self) -> f64 {
        self.resolve(|p| p.bend_angle).unwrap_or(defaults::BEND_ANGLE)
    }

    pub fn looseness(&self) -> f64 {
        self.resolve(|p| p.looseness).unwrap_or(defaults::LOOSENESS)
    }

    pub fn out_angle(&self) -> f64 {
        self.resolve(|p| p.out_angle).unwrap_or(defaults::OUT_ANGLE)
    }

    pub fn in_angle(&self) -> f64 {
        self.resolve(|p| p.in_angle).unwrap_or(defaults::IN_ANGLE)
    }

    pub fn arrow_tail(&self) -> Arrow {
        self.resolve(|p| p.arrow_tail).unwrap_or(defaults::ARROW)
    }

    pub fn arrow_head(&self) -> Arrow {
        self.resolve(|p| p.arrow_head).unwrap_or(defaults::ARROW)
    }

    pub fn shorten_start(&self) -> Value {
        self.resolve(|p| p.shorten_start).unwrap_or(defaults::SHORTEN)
    }

    pub fn shorten_end(&self) -> Value {
        self.resolve(|p| p.shorten_end).unwrap_or(defaults::SHORTEN)
    }

    pub fn text_align(&self) -> TextAlignment {
        self.resolve(|p| p.text_align).unwrap_or(defaults::TEXT_ALIGN)
    }

    pub fn shape(&self) -> Shape {
        self.resolve(|p| p.shape).unwrap_or(defaults::SHAPE)
    }

    pub fn inner_sep(&self) -> Value {
        self.resolve(|p| p.inner_sep).unwrap_or(defaults::INNER_SEP)
    }

    /// Defaults to half the pen width when no style in the chain sets it
    pub fn outer_sep(&self) -> Value {
        self.resolve(|p| p.outer_sep)
            .unwrap_or_else(|| self.pen_width() * 0.5)
    }

    pub fn minimum_width(&self) -> Value {
        self.resolve(|p| p.minimum_width).unwrap_or(defaults::MINIMUM_SIZE)
    }

    pub fn minimum_height(&self) -> Value {
        self.resolve(|p| p.minimum_height).unwrap_or(defaults::MINIMUM_SIZE)
    }
}
