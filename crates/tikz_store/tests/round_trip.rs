//! Save/load round trips through the file system and the JSON format

use proptest::prelude::*;
use tempfile::TempDir;
use tikz_model::{
    Anchor, Color, Document, MetaPos, PathKind, PenStyle, Pos, PropertyValue, Shape, Uid, Value,
};
use tikz_store::{deserialize, serialize, DocumentIo, StoreError, FILE_EXTENSION};

fn sample_document() -> Document {
    let mut doc = Document::new();
    let root = doc.document_style_uid();
    doc.set_style_property(root, PropertyValue::PenStyle(PenStyle::Dashed)).unwrap();

    let a = doc.create_node();
    doc.set_node_pos(a, Pos::cm(-3.0, 3.0)).unwrap();
    doc.set_node_text(a, "A").unwrap();
    doc.set_style_property(a, PropertyValue::Shape(Shape::Circle)).unwrap();

    let b = doc.create_node();
    doc.set_node_pos(b, Pos::new(Value::mm(30.0), Value::points(12.5))).unwrap();
    doc.set_parent_style(b, Some(a)).unwrap();

    let edge = doc
        .create_edge(
            PathKind::InOutCurve,
            MetaPos::on_node(a, Anchor::SouthEast),
            MetaPos::on_node(b, Anchor::NoAnchor),
        )
        .unwrap();
    doc.set_style_property(edge, PropertyValue::OutAngle(45.0)).unwrap();
    doc.set_style_property(edge, PropertyValue::PenColor(Color::rgba(1, 2, 3, 128))).unwrap();

    let ellipse = doc.create_path(PathKind::Ellipse);
    doc.set_path_center(ellipse, MetaPos::on_node(b, Anchor::North)).unwrap();
    doc
}

fn path_file(dir: &TempDir, name: &str) -> std::path::PathBuf {
    dir.path().join(format!("{}.{}", name, FILE_EXTENSION))
}

#[test]
fn test_save_clear_load_restores_ids() {
    let temp_dir = TempDir::new().unwrap();
    let path = path_file(&temp_dir, "sample");
    let mut doc = sample_document();
    let before = serialize(&doc).unwrap();
    doc.save(&path).unwrap();

    doc.clear();
    assert!(doc.is_empty());
    doc.load(&path).unwrap();

    assert_eq!(doc.node_count(), 2);
    assert_eq!(doc.path_count(), 2);
    assert!(doc.node_from_id(1).is_some());
    assert!(doc.node_from_id(2).is_some());
    assert!(doc.path_from_id(3).is_some());
    assert!(doc.path_from_id(4).is_some());
    assert_eq!(serialize(&doc).unwrap(), before);
}

#[test]
fn test_loaded_references_resolve_in_new_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = path_file(&temp_dir, "refs");
    sample_document().save(&path).unwrap();

    let mut doc = Document::new();
    doc.load(&path).unwrap();

    let edge = doc.path_from_id(3).unwrap();
    let start = edge.start().unwrap();
    assert_eq!(start.anchor(), Anchor::SouthEast);
    let node: Uid = start.node().unwrap();
    assert_eq!(node.document(), doc.id());
    assert_eq!(doc.meta_pos_point(start), Pos::cm(-3.0, 3.0));

    let b = doc.node_from_id(2).unwrap();
    let style = doc.style_by_uid(b.style_uid()).unwrap();
    assert_eq!(style.shape(), Shape::Circle);
    assert_eq!(style.pen_style(), PenStyle::Dashed);
}

#[test]
fn test_load_then_edit_continues_ids() {
    let temp_dir = TempDir::new().unwrap();
    let path = path_file(&temp_dir, "ids");
    sample_document().save(&path).unwrap();

    let mut doc = Document::new();
    doc.load(&path).unwrap();
    let next = doc.create_node();
    assert_eq!(next.id(), 5);
    doc.undo().unwrap();
    assert!(!doc.can_undo());
}

#[test]
fn test_truncated_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = path_file(&temp_dir, "truncated");
    let json = serialize(&sample_document()).unwrap();
    std::fs::write(&path, &json[..json.len() / 2]).unwrap();

    let mut doc = sample_document();
    let err = doc.load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
    assert!(doc.is_empty());
}

proptest! {
    #[test]
    fn prop_json_round_trip_is_stable(
        positions in prop::collection::vec((-200i32..200, -200i32..200), 1..8),
        bend in -720i32..720,
    ) {
        let mut doc = Document::new();
        let nodes: Vec<Uid> = positions
            .iter()
            .map(|&(x, y)| {
                let node = doc.create_node();
                doc.set_node_pos(node, Pos::cm(x as f64 / 4.0, y as f64 / 4.0)).unwrap();
                node
            })
            .collect();
        for pair in nodes.windows(2) {
            let edge = doc
                .create_edge(
                    PathKind::BendCurve,
                    MetaPos::on_node(pair[0], Anchor::East),
                    MetaPos::on_node(pair[1], Anchor::West),
                )
                .unwrap();
            doc.set_style_property(edge, PropertyValue::BendAngle(bend as f64)).unwrap();
        }

        let json = serialize(&doc).unwrap();
        let mut loaded = Document::new();
        deserialize(&json, &mut loaded).unwrap();
        prop_assert_eq!(loaded.node_count(), nodes.len());
        prop_assert_eq!(loaded.path_count(), nodes.len() - 1);
        prop_assert_eq!(serialize(&loaded).unwrap(), json);
    }
}
