//! MetaPos - a location that is either a literal point or bound to a node

use crate::{Anchor, DocumentId, ModelError, Pos, Result, Uid};
use std::fmt;

/// A position that either is a fixed point or follows a node's anchor.
///
/// When attached, the literal `pos` is ignored; the document resolves the
/// live node position on every read (see
/// [`Document::meta_pos_point`](crate::Document::meta_pos_point)).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetaPos {
    node: Option<Uid>,
    pos: Pos,
    anchor: Anchor,
}

impl MetaPos {
    /// A literal point
    pub fn at(pos: Pos) -> Self {
        Self {
            node: None,
            pos,
            anchor: Anchor::NoAnchor,
        }
    }

    /// Attached to `node` at `anchor`
    pub fn on_node(node: Uid, anchor: Anchor) -> Self {
        Self {
            node: Some(node),
            pos: Pos::default(),
            anchor,
        }
    }

    pub fn node(&self) -> Option<Uid> {
        self.node
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The stored literal point; meaningless while attached
    pub fn literal_pos(&self) -> Pos {
        self.pos
    }

    pub fn is_attached(&self) -> bool {
        self.node.is_some()
    }

    /// Detach from any node and pin to `pos`
    pub fn set_pos(&mut self, pos: Pos) {
        self.node = None;
        self.anchor = Anchor::NoAnchor;
        self.pos = pos;
    }

    /// Attach to a node, or detach with `None` (which resets the anchor)
    pub fn set_node(&mut self, node: Option<Uid>) {
        self.node = node;
        if node.is_none() {
            self.anchor = Anchor::NoAnchor;
        }
    }

    /// Anchors only make sense on attached positions
    pub fn set_anchor(&mut self, anchor: Anchor) {
        if self.node.is_some() {
            self.anchor = anchor;
        }
    }

    /// Parse the persisted text form: `(x, y)`, `(id)` or `(id.anchor)`
    pub fn parse(text: &str, document: DocumentId) -> Result<MetaPos> {
        let trimmed = text.trim();
        if trimmed.contains(',') {
            return Ok(MetaPos::at(trimmed.parse()?));
        }
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ModelError::InvalidValue(format!("not a position: '{}'", text)))?;
        let (id, anchor) = match inner.split_once('.') {
            Some((id, anchor)) => (id, anchor.parse::<Anchor>()?),
            None => (inner, Anchor::NoAnchor),
        };
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidValue(format!("not a node reference: '{}'", text)))?;
        if id < 0 {
            return Err(ModelError::InvalidValue(format!("not a node reference: '{}'", text)));
        }
        Ok(MetaPos::on_node(Uid::new(id, document), anchor))
    }
}

impl fmt::Display for MetaPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(node) if self.anchor == Anchor::NoAnchor => write!(f, "({})", node.id()),
            Some(node) => write!(f, "({}.{})", node.id(), self.anchor),
            None => write!(f, "{}", self.pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_detaching_resets_anchor() {
        let doc = DocumentId::new();
        let mut meta = MetaPos::on_node(Uid::new(4, doc), Anchor::North);
        assert_eq!(meta.anchor(), Anchor::North);

        meta.set_node(None);
        assert!(!meta.is_attached());
        assert_eq!(meta.anchor(), Anchor::NoAnchor);

        meta.set_anchor(Anchor::East);
        assert_eq!(meta.anchor(), Anchor::NoAnchor);
    }

    #[test]
    fn test_text_forms() {
        let doc = DocumentId::new();
        let literal = MetaPos::at(Pos::new(Value::cm(1.0), Value::cm(-2.5)));
        assert_eq!(literal.to_string(), "(1cm, -2.5cm)");
        assert_eq!(MetaPos::parse(&literal.to_string(), doc).unwrap(), literal);

        let attached = MetaPos::on_node(Uid::new(7, doc), Anchor::SouthWest);
        assert_eq!(attached.to_string(), "(7.south west)");
        assert_eq!(MetaPos::parse("(7.south west)", doc).unwrap(), attached);

        let plain = MetaPos::parse("(3)", doc).unwrap();
        assert_eq!(plain.node(), Some(Uid::new(3, doc)));
        assert_eq!(plain.anchor(), Anchor::NoAnchor);
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        let doc = DocumentId::new();
        assert!(MetaPos::parse("7", doc).is_err());
        assert!(MetaPos::parse("(x)", doc).is_err());
        assert!(MetaPos::parse("(7.upwards)", doc).is_err());
        assert!(MetaPos::parse("(-1)", doc).is_err());
    }
}
