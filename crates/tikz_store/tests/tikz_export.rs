//! End-to-end TikZ export of small pictures built through the public API

use tikz_model::{Anchor, Arrow, Document, Entity, LineWidth, MetaPos, PathKind, Pos};
use tikz_store::{DocumentIo, ExportSettings};

/// Two nodes joined by an edge, the way an editor session would build them
fn two_node_picture() -> Document {
    let mut doc = Document::new();
    let (a, b, edge) = {
        let mut tx = doc.transaction("Create Edge");
        let a = tx.create_node();
        tx.set_node_pos(a, Pos::cm(-3.0, 3.0)).unwrap();
        let b = tx.create_node();
        tx.set_node_pos(b, Pos::cm(3.0, 3.0)).unwrap();
        let edge = tx
            .create_edge(
                PathKind::Line,
                MetaPos::on_node(a, Anchor::NoAnchor),
                MetaPos::on_node(b, Anchor::NoAnchor),
            )
            .unwrap();
        (a, b, edge)
    };
    doc.edit_style(edge)
        .unwrap()
        .set_line_width_preset(LineWidth::SemiThick)
        .unwrap();
    assert_ne!(a, b);
    doc
}

#[test]
fn test_two_nodes_and_an_edge() {
    let doc = two_node_picture();
    let code = doc.tikz_code(&ExportSettings::default());

    assert_eq!(
        code,
        "\\begin{tikzpicture}\n\
         \x20 \\node (1) at (-3.00cm,3.00cm) {};\n\
         \x20 \\node (2) at (3.00cm,3.00cm) {};\n\
         \x20 \\draw[semithick] (1) -- (2);\n\
         \\end{tikzpicture}\n"
    );
}

#[test]
fn test_node_lines_carry_coordinates() {
    let doc = two_node_picture();
    let code = doc.tikz_code(&ExportSettings::default());

    let node_lines: Vec<&str> = code.lines().filter(|l| l.trim_start().starts_with("\\node")).collect();
    assert_eq!(node_lines.len(), 2);
    assert!(node_lines[0].contains("(1) at (-3.00cm,3.00cm)"));
    assert!(node_lines[1].contains("(2) at (3.00cm,3.00cm)"));

    let draw = code
        .lines()
        .find(|l| l.trim_start().starts_with("\\draw"))
        .expect("draw line");
    assert!(draw.contains("semithick"));
    assert!(draw.contains("(1) -- (2)"));
}

#[test]
fn test_export_follows_undo() {
    let mut doc = two_node_picture();
    doc.undo().unwrap();
    let code = doc.tikz_code(&ExportSettings::default());
    assert!(code.contains("\\draw (1) -- (2);"));

    doc.undo().unwrap();
    let code = doc.tikz_code(&ExportSettings::default());
    assert_eq!(code, "\\begin{tikzpicture}\n\\end{tikzpicture}\n");
}

#[test]
fn test_deleted_node_detaches_edge() {
    let mut doc = two_node_picture();
    let first = doc.node_from_id(1).map(Entity::uid).unwrap();
    doc.delete_node(first).unwrap();

    let code = doc.tikz_code(&ExportSettings::default());
    assert!(!code.contains("\\node (1)"));
    assert!(code.contains("\\draw[semithick] (-3.00cm,3.00cm) -- (2);"));
}

#[test]
fn test_arrows_and_bezier() {
    let mut doc = Document::new();
    let curve = doc.create_path(PathKind::BezierCurve);
    {
        let mut config = doc.config_transaction(curve);
        config.set_path_end(curve, MetaPos::at(Pos::cm(4.0, 0.0))).unwrap();
        config.set_path_control1(curve, MetaPos::at(Pos::cm(1.0, 1.0))).unwrap();
        config.set_path_control2(curve, MetaPos::at(Pos::cm(3.0, 1.0))).unwrap();
        let mut style = config.edit_style(curve).unwrap();
        style.set_arrow_tail(Arrow::Latex).unwrap();
        style.set_arrow_head(Arrow::Stealth).unwrap();
    }

    let code = doc.tikz_code(&ExportSettings::default());
    assert!(code.contains(
        "\\draw[latex-stealth] (0.00cm,0.00cm) .. controls (1.00cm,1.00cm) and (3.00cm,1.00cm) .. (4.00cm,0.00cm);"
    ));
}
