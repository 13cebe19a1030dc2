//! Node - a positioned text label

use crate::{Entity, EntityType, Pos, Uid};

/// A node in the diagram.
///
/// The node's style lives in the document's style arena and shares the
/// node's uid; resolve it with [`Document::style_by_uid`](crate::Document::style_by_uid).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    uid: Uid,
    pos: Pos,
    text: String,
}

impl Node {
    pub(crate) fn new(uid: Uid) -> Self {
        Self {
            uid,
            pos: Pos::default(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.uid.id()
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Uid of this node's style
    pub fn style_uid(&self) -> Uid {
        self.uid
    }

    pub(crate) fn set_pos(&mut self, pos: Pos) {
        self.pos = pos;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

impl Entity for Node {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Node
    }
}
