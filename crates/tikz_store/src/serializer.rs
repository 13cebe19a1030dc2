//! Document serialization

use crate::format::{format_ids, node_key, path_key, NO_PARENT};
use crate::{DocumentFile, NodeRecord, PathRecord, Result, StyleRecord};
use std::collections::BTreeMap;
use tikz_model::{Document, EntityRef, PathEndpoint, StyleView, Visitor};

/// Builds a [`DocumentFile`] while visiting a document
#[derive(Debug, Default)]
pub struct Serializer {
    file: DocumentFile,
    node_ids: Vec<i64>,
    path_ids: Vec<i64>,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the finished file contents
    pub fn finish(mut self) -> DocumentFile {
        self.file.node_ids = format_ids(&self.node_ids);
        self.file.path_ids = format_ids(&self.path_ids);
        self.file
    }
}

fn properties_of(style: &StyleView<'_>) -> BTreeMap<String, String> {
    style
        .properties()
        .iter_set()
        .map(|value| (value.property().key().to_string(), value.to_canonical_string()))
        .collect()
}

fn style_record(style: Option<StyleView<'_>>) -> StyleRecord {
    match style {
        Some(style) => StyleRecord {
            parent: style.style().parent().map_or(NO_PARENT, |uid| uid.id()),
            properties: properties_of(&style),
        },
        None => StyleRecord::default(),
    }
}

impl Visitor for Serializer {
    fn visit(&mut self, document: &Document, entity: EntityRef<'_>) {
        match entity {
            EntityRef::Document => {
                self.file.document_style.properties = properties_of(&document.style());
            }
            EntityRef::Node(node) => {
                self.node_ids.push(node.id());
                let record = NodeRecord {
                    pos: node.pos().to_string(),
                    text: node.text().to_string(),
                    style: style_record(document.style_by_uid(node.style_uid())),
                };
                self.file.nodes.insert(node_key(node.id()), record);
            }
            EntityRef::Path(path) => {
                self.path_ids.push(path.id());
                let endpoint = |e: PathEndpoint| path.endpoint(e).map(|meta| meta.to_string());
                let record = PathRecord {
                    kind: path.kind().as_str().to_string(),
                    start: endpoint(PathEndpoint::Start),
                    end: endpoint(PathEndpoint::End),
                    control1: endpoint(PathEndpoint::Control1),
                    control2: endpoint(PathEndpoint::Control2),
                    center: endpoint(PathEndpoint::Center),
                    style: style_record(document.style_by_uid(path.style_uid())),
                };
                self.file.paths.insert(path_key(path.id()), record);
            }
        }
    }
}

/// Capture a document as file records
pub fn to_document_file(document: &Document) -> DocumentFile {
    let mut serializer = Serializer::new();
    document.accept(&mut serializer);
    serializer.finish()
}

/// Serialize a document to JSON
pub fn serialize(document: &Document) -> Result<String> {
    let file = to_document_file(document);
    let json = serde_json::to_string_pretty(&file)?;
    Ok(json)
}
