//! Document deserialization
//!
//! Rebuilds a document in three passes: create every node and path under
//! its stored id, then apply the document style, then fill in node and path
//! data. Ids must exist before any style parent or path endpoint can refer
//! to them.

use crate::format::{node_key, parse_ids, path_key, NO_PARENT};
use crate::{DocumentFile, PathRecord, Result, StoreError, StyleRecord};
use std::collections::BTreeMap;
use tikz_model::{Document, MetaPos, PathEndpoint, PathKind, StyleProperty, Uid};

/// Replace the contents of `document` with the JSON in `json`.
///
/// On failure the document is left empty. The undo history is cleared
/// either way.
pub fn deserialize(json: &str, document: &mut Document) -> Result<()> {
    document.clear();
    let result = serde_json::from_str::<DocumentFile>(json)
        .map_err(StoreError::from)
        .and_then(|file| apply_document_file(&file, document));
    if let Err(err) = &result {
        tracing::debug!(error = %err, "load failed, clearing document");
        document.clear();
    }
    document.clear_undo_history();
    result
}

/// Rebuild `document` from parsed file records. The document must be empty.
pub fn apply_document_file(file: &DocumentFile, document: &mut Document) -> Result<()> {
    let node_ids = parse_ids(&file.node_ids)?;
    let path_ids = parse_ids(&file.path_ids)?;
    let root = document.document_style_uid();
    let mut config = document.config_transaction(root);

    for id in &node_ids {
        if !file.nodes.contains_key(&node_key(*id)) {
            return Err(StoreError::MissingRecord { entity: "node", id: *id });
        }
        config.create_node_with_id(*id)?;
    }
    let mut paths = Vec::with_capacity(path_ids.len());
    for id in &path_ids {
        let record = file
            .paths
            .get(&path_key(*id))
            .ok_or(StoreError::MissingRecord { entity: "path", id: *id })?;
        let kind: PathKind = record.kind.parse()?;
        let uid = config.create_path_with_id(*id, kind)?;
        paths.push((uid, record));
    }

    apply_properties(&mut config, root, &file.document_style.properties)?;

    for id in &node_ids {
        let record = &file.nodes[&node_key(*id)];
        let uid = Uid::new(*id, config.id());
        config.set_node_pos(uid, record.pos.parse()?)?;
        config.set_node_text(uid, record.text.as_str())?;
        apply_style(&mut config, uid, &record.style)?;
    }

    for (uid, record) in paths {
        apply_endpoints(&mut config, uid, record)?;
        apply_style(&mut config, uid, &record.style)?;
    }

    config.finish();
    tracing::debug!(
        nodes = node_ids.len(),
        paths = path_ids.len(),
        "document loaded"
    );
    Ok(())
}

fn apply_style(document: &mut Document, uid: Uid, record: &StyleRecord) -> Result<()> {
    let parent = match record.parent {
        NO_PARENT => None,
        id if id >= 0 => Some(Uid::new(id, document.id())),
        parent => {
            return Err(StoreError::InvalidParent { style: uid.id(), parent });
        }
    };
    document.set_parent_style(uid, parent)?;
    apply_properties(document, uid, &record.properties)
}

fn apply_properties(
    document: &mut Document,
    style: Uid,
    properties: &BTreeMap<String, String>,
) -> Result<()> {
    for (key, text) in properties {
        let property = StyleProperty::from_key(key)
            .ok_or_else(|| StoreError::InvalidFormat(format!("unknown property '{}'", key)))?;
        let value = property.parse_value(text)?;
        document.set_style_property(style, value)?;
    }
    Ok(())
}

fn apply_endpoints(document: &mut Document, uid: Uid, record: &PathRecord) -> Result<()> {
    let slots = [
        (PathEndpoint::Start, &record.start),
        (PathEndpoint::End, &record.end),
        (PathEndpoint::Control1, &record.control1),
        (PathEndpoint::Control2, &record.control2),
        (PathEndpoint::Center, &record.center),
    ];
    let kind = document
        .path(uid)
        .map(|path| path.kind())
        .ok_or(tikz_model::ModelError::PathNotFound(uid))?;
    for endpoint in kind.endpoints() {
        let text = slots
            .iter()
            .find(|(slot, _)| slot == endpoint)
            .and_then(|(_, text)| text.as_deref())
            .ok_or(StoreError::MissingEndpoint {
                path: uid.id(),
                endpoint: endpoint.key(),
            })?;
        let meta = MetaPos::parse(text, document.id())?;
        document.set_path_endpoint(uid, *endpoint, meta)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize;
    use tikz_model::{Anchor, Color, Pos, PropertyValue, Shape};

    const TWO_NODES: &str = r#"{
        "node-ids": "1,2",
        "path-ids": "5",
        "document-style": { "properties": { "line-width": "0.6pt" } },
        "nodes": {
            "node-1": { "pos": "(-3cm, 3cm)", "text": "a", "style": { "parent": 0, "properties": { "shape": "circle" } } },
            "node-2": { "pos": "(3cm, 3cm)", "text": "b", "style": { "parent": 1, "properties": {} } }
        },
        "paths": {
            "path-5": { "type": "bend-curve", "start": "(1.east)", "end": "(2)",
                        "style": { "parent": 0, "properties": { "bend-angle": "30", "pen-color": "red" } } }
        }
    }"#;

    #[test]
    fn test_load_recreates_ids_and_links() {
        let mut doc = Document::new();
        deserialize(TWO_NODES, &mut doc).unwrap();

        let a = Uid::new(1, doc.id());
        let b = Uid::new(2, doc.id());
        let edge = Uid::new(5, doc.id());
        assert_eq!(doc.node(a).unwrap().pos(), Pos::cm(-3.0, 3.0));
        assert_eq!(doc.node(b).unwrap().text(), "b");
        assert_eq!(doc.style_by_uid(b).unwrap().shape(), Shape::Circle);

        let path = doc.path(edge).unwrap();
        assert_eq!(path.start().unwrap().node(), Some(a));
        assert_eq!(path.start().unwrap().anchor(), Anchor::East);
        let style = doc.style_by_uid(edge).unwrap();
        assert_eq!(style.bend_angle(), 30.0);
        assert_eq!(style.pen_color(), Color::RED);
        assert_eq!(
            doc.style().value(tikz_model::StyleProperty::LineWidth),
            PropertyValue::LineWidth(tikz_model::Value::points(0.6))
        );

        assert!(!doc.can_undo());
        assert_eq!(doc.create_node().id(), 6);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let mut doc = Document::new();
        deserialize(TWO_NODES, &mut doc).unwrap();
        let first = serialize(&doc).unwrap();

        let mut again = Document::new();
        deserialize(&first, &mut again).unwrap();
        assert_eq!(serialize(&again).unwrap(), first);
    }

    #[test]
    fn test_unknown_property_fails_and_clears() {
        let mut doc = Document::new();
        doc.create_node();
        let json = TWO_NODES.replace("\"shape\"", "\"font-size\"");
        let err = deserialize(&json, &mut doc).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat(_)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_bad_canonical_value_fails() {
        let mut doc = Document::new();
        let json = TWO_NODES.replace("\"circle\"", "\"blob\"");
        assert!(matches!(
            deserialize(&json, &mut doc),
            Err(StoreError::Model(_))
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_dangling_reference_fails() {
        let mut doc = Document::new();
        let json = TWO_NODES.replace("\"(2)\"", "\"(9)\"");
        assert!(deserialize(&json, &mut doc).is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_missing_record_fails() {
        let mut doc = Document::new();
        let json = TWO_NODES.replace("\"1,2\"", "\"1,2,3\"");
        assert!(matches!(
            deserialize(&json, &mut doc),
            Err(StoreError::MissingRecord { entity: "node", id: 3 })
        ));
    }

    #[test]
    fn test_missing_endpoint_fails() {
        let mut doc = Document::new();
        let json = TWO_NODES.replace("\"end\": \"(2)\",", "");
        assert!(matches!(
            deserialize(&json, &mut doc),
            Err(StoreError::MissingEndpoint { path: 5, endpoint: "end" })
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_negative_parent_fails() {
        let mut doc = Document::new();
        let json = TWO_NODES.replace("\"parent\": 1,", "\"parent\": -7,");
        assert!(matches!(
            deserialize(&json, &mut doc),
            Err(StoreError::InvalidParent { style: 2, parent: -7 })
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_malformed_json_fails() {
        let mut doc = Document::new();
        assert!(matches!(
            deserialize("{ not json", &mut doc),
            Err(StoreError::Serialization(_))
        ));
    }
}
