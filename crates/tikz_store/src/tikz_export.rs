//! TikZ code generation

use crate::ExportSettings;
use tikz_model::{
    Anchor, Arrow, Document, EntityRef, LineWidth, MetaPos, Node, Path, PathEndpoint, PathKind,
    PropertySource, StyleProperties, StyleProperty, StyleView, TextAlignment, Uid, Value, Visitor,
};

/// Properties that shape path geometry rather than the picture's look
const GEOMETRY_PROPERTIES: [StyleProperty; 6] = [
    StyleProperty::RadiusX,
    StyleProperty::RadiusY,
    StyleProperty::BendAngle,
    StyleProperty::Looseness,
    StyleProperty::OutAngle,
    StyleProperty::InAngle,
];

/// Writes a `tikzpicture` environment while visiting a document
#[derive(Debug)]
pub struct TikzExporter {
    settings: ExportSettings,
    output: String,
}

impl TikzExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            output: String::new(),
        }
    }

    /// Close the environment and return the code
    pub fn finish(mut self) -> String {
        self.output.push_str("\\end{tikzpicture}\n");
        self.output
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(&" ".repeat(self.settings.indent));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn coordinate(&self, meta: &MetaPos) -> String {
        match meta.node() {
            Some(node) if matches!(meta.anchor(), Anchor::NoAnchor | Anchor::Center) => {
                format!("({})", node.id())
            }
            Some(node) => format!("({}.{})", node.id(), meta.anchor()),
            None => meta
                .literal_pos()
                .convert_to(self.settings.unit)
                .to_fixed(self.settings.precision),
        }
    }

    fn write_document(&mut self, document: &Document) {
        let mut properties = document.style().properties().clone();
        for property in GEOMETRY_PROPERTIES {
            properties.unset(property);
        }
        let options = bracketed(&style_options(&properties));
        self.output.push_str(&format!("\\begin{{tikzpicture}}{}\n", options));
    }

    fn write_node(&mut self, document: &Document, node: &Node) {
        let options = document
            .style_by_uid(node.style_uid())
            .map(|style| style_options(&chain_properties(document, style)))
            .unwrap_or_default();
        let line = format!(
            "\\node{} ({}) at {} {{{}}};",
            bracketed(&options),
            node.id(),
            node.pos()
                .convert_to(self.settings.unit)
                .to_fixed(self.settings.precision),
            node.text()
        );
        self.line(&line);
    }

    fn write_path(&mut self, document: &Document, path: &Path) {
        let Some(style) = document.style_by_uid(path.style_uid()) else {
            tracing::warn!(path = path.id(), "path without style skipped in export");
            return;
        };
        let options = style_options(&chain_properties(document, style));
        let Some(geometry) = self.path_geometry(path, &style) else {
            return;
        };
        let line = format!("\\draw{} {};", bracketed(&options), geometry);
        self.line(&line);
    }

    /// Coordinates and path operations, e.g. `(1) -- (2)`
    fn path_geometry(&self, path: &Path, style: &StyleView<'_>) -> Option<String> {
        if path.kind() == PathKind::Ellipse {
            let center = self.coordinate(path.center()?);
            let (rx, ry) = (style.radius_x(), style.radius_y());
            return Some(if rx == ry {
                format!("{} circle [radius={}]", center, rx)
            } else {
                format!("{} ellipse [x radius={}, y radius={}]", center, rx, ry)
            });
        }

        let start = self.coordinate(path.start()?);
        let end = self.coordinate(path.end()?);
        let operation = match path.kind() {
            PathKind::Line => "--".to_string(),
            PathKind::HVLine => "-|".to_string(),
            PathKind::VHLine => "|-".to_string(),
            PathKind::Rectangle => "rectangle".to_string(),
            PathKind::Grid => "grid".to_string(),
            PathKind::BendCurve => {
                let angle = style.bend_angle();
                // straight; looseness only shapes a bent curve
                if angle == 0.0 {
                    return Some(format!("{} to {}", start, end));
                }
                let mut options = if angle < 0.0 {
                    vec![format!("bend right={}", number(-angle))]
                } else {
                    vec![format!("bend left={}", number(angle))]
                };
                if style.property_source(StyleProperty::Looseness) != PropertySource::Default {
                    options.push(format!("looseness={}", number(style.looseness())));
                }
                format!("to[{}]", options.join(", "))
            }
            PathKind::InOutCurve => {
                let mut options = vec![
                    format!("out={}", number(style.out_angle())),
                    format!("in={}", number(style.in_angle())),
                ];
                if style.property_source(StyleProperty::Looseness) != PropertySource::Default {
                    options.push(format!("looseness={}", number(style.looseness())));
                }
                format!("to[{}]", options.join(", "))
            }
            PathKind::BezierCurve => {
                let control1 = self.coordinate(path.endpoint(PathEndpoint::Control1)?);
                let control2 = self.coordinate(path.endpoint(PathEndpoint::Control2)?);
                format!(".. controls {} and {} ..", control1, control2)
            }
            PathKind::Ellipse => return None,
        };
        Some(format!("{} {} {}", start, operation, end))
    }
}

impl Visitor for TikzExporter {
    fn visit(&mut self, document: &Document, entity: EntityRef<'_>) {
        match entity {
            EntityRef::Document => self.write_document(document),
            EntityRef::Node(node) => self.write_node(document, node),
            EntityRef::Path(path) => self.write_path(document, path),
        }
    }
}

/// Generate the TikZ picture for a document
pub fn tikz_code(document: &Document, settings: &ExportSettings) -> String {
    let mut exporter = TikzExporter::new(settings.clone());
    document.accept(&mut exporter);
    exporter.finish()
}

/// Properties set anywhere along the chain below the document style,
/// nearest style first
fn chain_properties(document: &Document, style: StyleView<'_>) -> StyleProperties {
    let root = document.document_style_uid();
    let mut merged = StyleProperties::new();
    let mut current = Some(style);
    let mut visited: Vec<Uid> = Vec::new();
    while let Some(view) = current {
        if view.uid() == root || visited.contains(&view.uid()) {
            break;
        }
        visited.push(view.uid());
        for value in view.properties().iter_set() {
            if merged.get(value.property()).is_none() {
                merged.set(value);
            }
        }
        current = view.parent_style();
    }
    merged
}

fn bracketed(options: &[String]) -> String {
    if options.is_empty() {
        String::new()
    } else {
        format!("[{}]", options.join(", "))
    }
}

/// Shortest decimal text for a number
fn number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn arrow_name(arrow: Arrow) -> &'static str {
    match arrow {
        Arrow::None => "",
        other => other.as_str(),
    }
}

/// TikZ options for the explicitly set properties of a style
fn style_options(p: &StyleProperties) -> Vec<String> {
    let mut options = Vec::new();

    if let Some(width) = p.line_width {
        options.push(line_width_option(width));
    }
    if let Some(pen_style) = p.pen_style {
        options.push(pen_style.as_str().to_string());
    }
    if let Some(color) = p.pen_color {
        options.push(format!("draw={}", color.to_tikz()));
    }
    if let Some(color) = p.fill_color {
        options.push(format!("fill={}", color.to_tikz()));
    }

    match (p.pen_opacity, p.fill_opacity) {
        (Some(pen), Some(fill)) if pen == fill => {
            options.push(format!("opacity={}", number(pen)));
        }
        (pen, fill) => {
            if let Some(pen) = pen {
                options.push(format!("draw opacity={}", number(pen)));
            }
            if let Some(fill) = fill {
                options.push(format!("fill opacity={}", number(fill)));
            }
        }
    }

    if p.double_line == Some(true) {
        match p.inner_line_color {
            Some(color) => options.push(format!("double={}", color.to_tikz())),
            None => options.push("double".to_string()),
        }
        if let Some(width) = p.inner_line_width {
            options.push(format!("double distance={}", width));
        }
    }

    if let Some(rotation) = p.rotation {
        options.push(format!("rotate={}", number(rotation)));
    }

    if p.arrow_tail.is_some() || p.arrow_head.is_some() {
        let tail = arrow_name(p.arrow_tail.unwrap_or_default());
        let head = arrow_name(p.arrow_head.unwrap_or_default());
        options.push(format!("{}-{}", tail, head));
    }
    if let Some(shorten) = p.shorten_start {
        options.push(format!("shorten <={}", shorten));
    }
    if let Some(shorten) = p.shorten_end {
        options.push(format!("shorten >={}", shorten));
    }

    if let Some(shape) = p.shape {
        options.push(shape.as_str().to_string());
    }
    if let Some(align) = p.text_align {
        if align != TextAlignment::NoAlign {
            options.push(format!("align={}", align.as_str()));
        }
    }
    if let Some(sep) = p.inner_sep {
        options.push(format!("inner sep={}", sep));
    }
    if let Some(sep) = p.outer_sep {
        options.push(format!("outer sep={}", sep));
    }

    match (p.minimum_width, p.minimum_height) {
        (Some(width), Some(height)) if width == height => {
            options.push(format!("minimum size={}", width));
        }
        (width, height) => {
            if let Some(width) = width {
                options.push(format!("minimum width={}", width));
            }
            if let Some(height) = height {
                options.push(format!("minimum height={}", height));
            }
        }
    }

    options
}

fn line_width_option(width: Value) -> String {
    match LineWidth::from_value(width) {
        Some(preset) => preset.tikz_name().to_string(),
        None => format!("line width={}", width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tikz_model::{Color, PropertyValue, Pos, Shape, Unit};

    fn settings() -> ExportSettings {
        ExportSettings::default()
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert_eq!(
            tikz_code(&doc, &settings()),
            "\\begin{tikzpicture}\n\\end{tikzpicture}\n"
        );
    }

    #[test]
    fn test_node_line() {
        let mut doc = Document::new();
        let node = doc.create_node();
        doc.set_node_pos(node, Pos::cm(-3.0, 3.0)).unwrap();
        doc.set_node_text(node, "$x$").unwrap();
        doc.edit_style(node).unwrap().set_shape(Shape::Circle).unwrap();

        let code = tikz_code(&doc, &settings());
        assert!(code.contains("  \\node[circle] (1) at (-3.00cm,3.00cm) {$x$};\n"));
    }

    #[test]
    fn test_coordinates_follow_unit_and_precision() {
        let mut doc = Document::new();
        let node = doc.create_node();
        doc.set_node_pos(node, Pos::cm(2.54, 0.0)).unwrap();
        let settings = ExportSettings {
            precision: 1,
            indent: 0,
            unit: Unit::Inch,
        };
        let code = tikz_code(&doc, &settings);
        assert!(code.contains("\\node (1) at (1.0in,0.0in) {};"));
    }

    #[test]
    fn test_document_options_skip_geometry() {
        let mut doc = Document::new();
        let root = doc.document_style_uid();
        doc.set_style_property(root, PropertyValue::LineWidth(LineWidth::SemiThick.value()))
            .unwrap();
        doc.set_style_property(root, PropertyValue::BendAngle(30.0)).unwrap();
        let code = tikz_code(&doc, &settings());
        assert!(code.starts_with("\\begin{tikzpicture}[semithick]\n"));
    }

    #[test]
    fn test_bend_direction() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        let edge = doc
            .create_edge(
                PathKind::BendCurve,
                MetaPos::on_node(a, Anchor::NoAnchor),
                MetaPos::on_node(b, Anchor::East),
            )
            .unwrap();
        doc.set_style_property(edge, PropertyValue::BendAngle(-30.0)).unwrap();
        let code = tikz_code(&doc, &settings());
        assert!(code.contains("(1) to[bend right=30] (2.east);"));

        doc.set_style_property(edge, PropertyValue::BendAngle(45.0)).unwrap();
        doc.set_style_property(edge, PropertyValue::Looseness(1.5)).unwrap();
        let code = tikz_code(&doc, &settings());
        assert!(code.contains("(1) to[bend left=45, looseness=1.5] (2.east);"));

        doc.set_style_property(edge, PropertyValue::BendAngle(0.0)).unwrap();
        let code = tikz_code(&doc, &settings());
        assert!(code.contains("\\draw (1) to (2.east);"));
        assert!(!code.contains("bend"));
    }

    #[test]
    fn test_path_operators() {
        let mut doc = Document::new();
        let hv = doc.create_path(PathKind::HVLine);
        doc.set_path_start(hv, MetaPos::at(Pos::cm(0.0, 0.0))).unwrap();
        doc.set_path_end(hv, MetaPos::at(Pos::cm(1.0, 1.0))).unwrap();
        let grid = doc.create_path(PathKind::Grid);
        doc.set_path_end(grid, MetaPos::at(Pos::cm(2.0, 2.0))).unwrap();

        let code = tikz_code(&doc, &settings());
        assert!(code.contains("\\draw (0.00cm,0.00cm) -| (1.00cm,1.00cm);"));
        assert!(code.contains("\\draw (0.00cm,0.00cm) grid (2.00cm,2.00cm);"));
    }

    #[test]
    fn test_ellipse_and_circle() {
        let mut doc = Document::new();
        let ellipse = doc.create_path(PathKind::Ellipse);
        doc.set_path_center(ellipse, MetaPos::at(Pos::cm(1.0, 0.0))).unwrap();
        doc.set_style_property(ellipse, PropertyValue::RadiusX(Value::cm(1.0))).unwrap();
        doc.set_style_property(ellipse, PropertyValue::RadiusY(Value::cm(1.0))).unwrap();
        let code = tikz_code(&doc, &settings());
        assert!(code.contains("\\draw (1.00cm,0.00cm) circle [radius=1cm];"));

        doc.set_style_property(ellipse, PropertyValue::RadiusY(Value::cm(0.5))).unwrap();
        let code = tikz_code(&doc, &settings());
        assert!(code.contains("ellipse [x radius=1cm, y radius=0.5cm];"));
    }

    #[test]
    fn test_shorthand_options() {
        let mut p = StyleProperties::new();
        p.pen_opacity = Some(0.5);
        p.fill_opacity = Some(0.5);
        p.minimum_width = Some(Value::cm(1.0));
        p.minimum_height = Some(Value::cm(1.0));
        assert_eq!(style_options(&p), vec!["opacity=0.5", "minimum size=1cm"]);

        p.fill_opacity = Some(0.2);
        p.minimum_height = Some(Value::cm(2.0));
        assert_eq!(
            style_options(&p),
            vec![
                "draw opacity=0.5",
                "fill opacity=0.2",
                "minimum width=1cm",
                "minimum height=2cm",
            ]
        );
    }

    #[test]
    fn test_colors_arrows_and_double_lines() {
        let mut p = StyleProperties::new();
        p.line_width = Some(Value::points(1.0));
        p.pen_color = Some(Color::RED);
        p.fill_color = Some(Color::rgb(10, 20, 30));
        p.double_line = Some(true);
        p.inner_line_color = Some(Color::WHITE);
        p.arrow_head = Some(Arrow::Stealth);
        assert_eq!(
            style_options(&p),
            vec![
                "line width=1pt",
                "draw=red",
                "fill={rgb,255:red,10;green,20;blue,30}",
                "double=white",
                "-stealth",
            ]
        );
    }

    #[test]
    fn test_inherited_options_stop_at_document_style() {
        let mut doc = Document::new();
        let root = doc.document_style_uid();
        doc.set_style_property(root, PropertyValue::PenColor(Color::BLUE)).unwrap();
        let a = doc.create_node();
        let b = doc.create_node();
        doc.set_style_property(a, PropertyValue::Shape(Shape::Circle)).unwrap();
        doc.set_parent_style(b, Some(a)).unwrap();

        let code = tikz_code(&doc, &settings());
        assert!(code.starts_with("\\begin{tikzpicture}[draw=blue]\n"));
        assert!(code.contains("\\node[circle] (2) at"));
    }
}
