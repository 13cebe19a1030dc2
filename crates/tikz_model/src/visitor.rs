//! Visitor traversal over a document's entities

use crate::{Document, Node, Path};

/// One entity handed to a [`Visitor`]
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    /// The document itself, carrying the document style
    Document,
    Node(&'a Node),
    Path(&'a Path),
}

/// Receives the document, then every node, then every path, each in
/// creation order
pub trait Visitor {
    fn visit(&mut self, document: &Document, entity: EntityRef<'_>);
}

impl Document {
    /// Walk the document with `visitor`
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit(self, EntityRef::Document);
        for node in self.nodes() {
            visitor.visit(self, EntityRef::Node(node));
        }
        for path in self.paths() {
            visitor.visit(self, EntityRef::Path(path));
        }
    }
}
