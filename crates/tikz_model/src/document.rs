//! Document - owner of nodes, paths and styles
//!
//! Every mutation goes through the document so that it can be recorded on
//! the undo stack and announced to listeners. Change notifications are
//! deferred while a transaction or config transaction is open and flushed
//! when the outermost one closes.

use crate::events::{EventBus, PendingChanges};
use crate::undo::{StyleSnapshot, UndoCommand, UndoGroup, UndoStack};
use crate::{
    ConfigTransaction, DocumentEvent, DocumentId, Entity, EntityType, ListenerId, MetaPos,
    ModelError, Node, Path, PathEndpoint, PathKind, Pos, PropertyValue, Result, Style,
    StyleEditor, StyleKind, StyleProperties, StyleProperty, StyleView, Transaction, Uid,
};
use std::collections::HashMap;

/// Default number of undo groups kept
pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// A TikZ diagram: nodes, paths, their styles and the edit history
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    /// Last id handed out; ids are never reused within one document
    last_id: i64,
    document_style: Style,
    styles: HashMap<i64, Style>,
    nodes: HashMap<i64, Node>,
    node_order: Vec<i64>,
    paths: HashMap<i64, Path>,
    path_order: Vec<i64>,
    undo: UndoStack,
    pending: PendingChanges,
    events: EventBus,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::with_undo_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Create an empty document keeping at most `limit` undo groups
    /// (0 keeps everything)
    pub fn with_undo_limit(limit: usize) -> Self {
        let id = DocumentId::new();
        Self {
            id,
            last_id: 0,
            document_style: Style::new(Uid::new(Uid::DOCUMENT_STYLE_ID, id), StyleKind::Document),
            styles: HashMap::new(),
            nodes: HashMap::new(),
            node_order: Vec::new(),
            paths: HashMap::new(),
            path_order: Vec::new(),
            undo: UndoStack::with_limit(limit),
            pending: PendingChanges::default(),
            events: EventBus::default(),
        }
    }

    /// Get the identity of this document. Changes on every `clear()`.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// The highest id handed out so far
    pub fn last_id(&self) -> i64 {
        self.last_id
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.paths.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of styles including the document style
    pub fn style_count(&self) -> usize {
        self.styles.len() + 1
    }

    fn make_uid(&self, id: i64) -> Uid {
        Uid::new(id, self.id)
    }

    fn local_id(&self, uid: Uid) -> Result<i64> {
        if uid.document() != self.id {
            return Err(ModelError::ForeignDocument(uid));
        }
        Ok(uid.id())
    }

    fn allocate_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn node(&self, uid: Uid) -> Option<&Node> {
        if uid.document() != self.id {
            return None;
        }
        self.nodes.get(&uid.id())
    }

    pub fn node_from_id(&self, id: i64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn path(&self, uid: Uid) -> Option<&Path> {
        if uid.document() != self.id {
            return None;
        }
        self.paths.get(&uid.id())
    }

    pub fn path_from_id(&self, id: i64) -> Option<&Path> {
        self.paths.get(&id)
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Paths in creation order
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.path_order.iter().filter_map(|id| self.paths.get(id))
    }

    /// Whether `uid` names a live node or path of this document
    pub fn contains(&self, uid: Uid) -> bool {
        self.entity_type(uid).is_some()
    }

    /// Type of the live entity behind `uid`
    pub fn entity_type(&self, uid: Uid) -> Option<EntityType> {
        if uid.document() != self.id {
            return None;
        }
        if self.nodes.contains_key(&uid.id()) {
            Some(EntityType::Node)
        } else if self.paths.contains_key(&uid.id()) {
            Some(EntityType::Path)
        } else {
            None
        }
    }

    /// Where `meta` currently is: the node position when attached to a live
    /// node, the literal point otherwise
    pub fn meta_pos_point(&self, meta: &MetaPos) -> Pos {
        match meta.node().and_then(|uid| self.node(uid)) {
            Some(node) => node.pos(),
            None => meta.literal_pos(),
        }
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    pub fn document_style_uid(&self) -> Uid {
        self.document_style.uid()
    }

    /// The shared document style
    pub fn style(&self) -> StyleView<'_> {
        StyleView::new(self, &self.document_style)
    }

    /// Style owned by the entity `uid`, or the document style for id 0
    pub fn style_by_uid(&self, uid: Uid) -> Option<StyleView<'_>> {
        if uid.document() != self.id {
            return None;
        }
        self.style_entry(uid.id()).map(|style| StyleView::new(self, style))
    }

    fn style_entry(&self, id: i64) -> Option<&Style> {
        if id == Uid::DOCUMENT_STYLE_ID {
            Some(&self.document_style)
        } else {
            self.styles.get(&id)
        }
    }

    fn style_entry_mut(&mut self, id: i64) -> Option<&mut Style> {
        if id == Uid::DOCUMENT_STYLE_ID {
            Some(&mut self.document_style)
        } else {
            self.styles.get_mut(&id)
        }
    }

    /// Typed setters for the style `uid`
    pub fn edit_style(&mut self, uid: Uid) -> Result<StyleEditor<'_>> {
        let id = self.local_id(uid)?;
        if self.style_entry(id).is_none() {
            return Err(ModelError::StyleNotFound(uid));
        }
        Ok(StyleEditor::new(self, uid))
    }

    /// Set a property on a style. Setting the value it already has is a no-op.
    pub fn set_style_property(&mut self, style: Uid, value: PropertyValue) -> Result<()> {
        if !value.is_finite() {
            return Err(ModelError::InvalidValue(format!(
                "{} must be finite",
                value.property()
            )));
        }
        let value = value.normalized();
        self.change_style_property(style, value.property(), Some(value))
    }

    /// Remove a property from a style so it is inherited again
    pub fn unset_style_property(&mut self, style: Uid, property: StyleProperty) -> Result<()> {
        self.change_style_property(style, property, None)
    }

    fn change_style_property(
        &mut self,
        style: Uid,
        property: StyleProperty,
        new: Option<PropertyValue>,
    ) -> Result<()> {
        let id = self.local_id(style)?;
        let entry = self.style_entry(id).ok_or(ModelError::StyleNotFound(style))?;
        if !property.applies_to(entry.kind()) {
            return Err(ModelError::PropertyNotApplicable {
                property,
                kind: entry.kind(),
            });
        }
        let old = entry.properties().get(property);
        if old == new {
            return Ok(());
        }

        self.begin_transaction("Change Style");
        self.apply_style_property(id, property, new);
        self.undo.record(UndoCommand::SetStyleProperty {
            style,
            property,
            old,
            new,
        });
        self.end_transaction();
        Ok(())
    }

    /// Re-parent a style. `None` makes it fall straight through to the
    /// hard-coded defaults.
    pub fn set_parent_style(&mut self, style: Uid, parent: Option<Uid>) -> Result<()> {
        let id = self.local_id(style)?;
        let old = self
            .style_entry(id)
            .ok_or(ModelError::StyleNotFound(style))?
            .parent();
        if let Some(parent) = parent {
            let parent_id = self.local_id(parent)?;
            if self.style_entry(parent_id).is_none() {
                return Err(ModelError::StyleNotFound(parent));
            }
            if self.is_style_ancestor(style, parent) {
                return Err(ModelError::CyclicStyleParent { style, parent });
            }
        }
        if old == parent {
            return Ok(());
        }

        self.begin_transaction("Change Parent Style");
        self.apply_style_parent(id, parent);
        self.undo.record(UndoCommand::SetStyleParent {
            style,
            old,
            new: parent,
        });
        self.end_transaction();
        Ok(())
    }

    /// Whether `ancestor` is `style` or on the parent chain starting at it
    fn is_style_ancestor(&self, ancestor: Uid, style: Uid) -> bool {
        let mut current = Some(style);
        let mut remaining = self.style_count() + 1;
        while let Some(uid) = current {
            if uid == ancestor {
                return true;
            }
            remaining -= 1;
            if remaining == 0 {
                return true;
            }
            current = self.style_entry(uid.id()).and_then(Style::parent);
        }
        false
    }

    fn apply_style_property(&mut self, id: i64, property: StyleProperty, value: Option<PropertyValue>) {
        let Some(style) = self.style_entry_mut(id) else {
            tracing::warn!(id, "property change on missing style");
            return;
        };
        match value {
            Some(value) => style.properties_mut().set(value),
            None => style.properties_mut().unset(property),
        }
        let uid = style.uid();
        self.pending.mark_style(uid);
    }

    fn apply_style_parent(&mut self, id: i64, parent: Option<Uid>) {
        let Some(style) = self.style_entry_mut(id) else {
            tracing::warn!(id, "parent change on missing style");
            return;
        };
        let uid = style.uid();
        let old = style.parent();
        style.set_parent_uid(parent);
        if let Some(old) = old.and_then(|old| self.style_entry_mut(old.id())) {
            old.remove_child(uid);
        }
        if let Some(new) = parent.and_then(|new| self.style_entry_mut(new.id())) {
            new.add_child(uid);
        }
        self.pending.mark_style(uid);
    }

    /// Hand the children of `style` to its parent, recording each move
    fn reparent_children(&mut self, style: Uid) {
        let Some(entry) = self.style_entry(style.id()) else {
            return;
        };
        let new_parent = entry.parent();
        let children = entry.children().to_vec();
        for child in children {
            self.apply_style_parent(child.id(), new_parent);
            self.undo.record(UndoCommand::SetStyleParent {
                style: child,
                old: Some(style),
                new: new_parent,
            });
        }
    }

    fn default_style_snapshot(&self) -> StyleSnapshot {
        StyleSnapshot {
            parent: Some(self.document_style_uid()),
            properties: StyleProperties::default(),
        }
    }

    fn insert_style(&mut self, uid: Uid, kind: StyleKind, snapshot: StyleSnapshot) {
        let parent = match snapshot.parent {
            Some(parent) if self.style_entry(parent.id()).is_some() => Some(parent),
            Some(parent) => {
                tracing::warn!(%parent, "parent style is gone, falling back to document style");
                Some(self.document_style_uid())
            }
            None => None,
        };
        let mut style = Style::new(uid, kind);
        *style.properties_mut() = snapshot.properties;
        style.set_parent_uid(parent);
        if let Some(parent) = parent.and_then(|p| self.style_entry_mut(p.id())) {
            parent.add_child(uid);
        }
        self.styles.insert(uid.id(), style);
    }

    fn remove_style(&mut self, id: i64) -> Option<StyleSnapshot> {
        let style = self.styles.remove(&id)?;
        let uid = style.uid();
        if let Some(parent) = style.parent().and_then(|p| self.style_entry_mut(p.id())) {
            parent.remove_child(uid);
        }
        // children left behind fall back to our parent without being recorded
        for child in style.children() {
            self.apply_style_parent(child.id(), style.parent());
        }
        Some(StyleSnapshot {
            parent: style.parent(),
            properties: style.properties().clone(),
        })
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Create a node with a fresh id at the origin
    pub fn create_node(&mut self) -> Uid {
        let id = self.allocate_id();
        let uid = self.make_uid(id);
        self.begin_transaction("Create Node");
        let snapshot = self.default_style_snapshot();
        self.insert_node(Node::new(uid), snapshot, None);
        self.undo.record(UndoCommand::CreateNode { uid });
        self.end_transaction();
        tracing::debug!(id = uid.id(), "created node");
        uid
    }

    /// Create a node with a caller-chosen id without recording undo.
    /// Used when rebuilding a document from a file.
    pub fn create_node_with_id(&mut self, id: i64) -> Result<Uid> {
        self.check_free_id(id)?;
        self.last_id = self.last_id.max(id);
        let uid = self.make_uid(id);
        let snapshot = self.default_style_snapshot();
        self.insert_node(Node::new(uid), snapshot, None);
        Ok(uid)
    }

    fn check_free_id(&self, id: i64) -> Result<()> {
        if id <= Uid::DOCUMENT_STYLE_ID {
            return Err(ModelError::ReservedId(id));
        }
        if self.nodes.contains_key(&id) || self.paths.contains_key(&id) {
            return Err(ModelError::DuplicateId(id));
        }
        Ok(())
    }

    fn insert_node(&mut self, node: Node, style: StyleSnapshot, index: Option<usize>) {
        let uid = node.uid();
        self.insert_style(uid, StyleKind::Node, style);
        self.nodes.insert(uid.id(), node);
        match index {
            Some(index) if index <= self.node_order.len() => self.node_order.insert(index, uid.id()),
            _ => self.node_order.push(uid.id()),
        }
        self.events.emit(DocumentEvent::NodeCreated(uid));
    }

    fn remove_node(&mut self, id: i64) -> Option<(Node, StyleSnapshot, usize)> {
        let node = self.nodes.remove(&id)?;
        let index = self.node_order.iter().position(|n| *n == id).unwrap_or(self.node_order.len());
        self.node_order.retain(|n| *n != id);
        let style = self
            .remove_style(id)
            .unwrap_or_else(|| self.default_style_snapshot());
        self.events.emit(DocumentEvent::NodeDeleted(node.uid()));
        Some((node, style, index))
    }

    /// Delete a node. Path positions attached to it are pinned to its
    /// current position first, so undo restores the attachment.
    pub fn delete_node(&mut self, uid: Uid) -> Result<()> {
        let id = self.local_id(uid)?;
        let pos = self.nodes.get(&id).ok_or(ModelError::NodeNotFound(uid))?.pos();

        self.begin_transaction("Delete Node");
        let attached: Vec<(Uid, PathEndpoint, MetaPos)> = self
            .paths()
            .flat_map(|path| {
                path.endpoints()
                    .filter(move |(_, meta)| meta.node() == Some(uid))
                    .map(move |(endpoint, meta)| (path.uid(), endpoint, *meta))
            })
            .collect();
        for (path, endpoint, old) in attached {
            let mut new = old;
            new.set_pos(pos);
            self.record_path_endpoint(path, endpoint, old, new);
        }
        self.reparent_children(uid);
        if let Some((node, style, index)) = self.remove_node(id) {
            self.undo.record(UndoCommand::DeleteNode { node, style, index });
        }
        self.end_transaction();
        tracing::debug!(id, "deleted node");
        Ok(())
    }

    pub fn set_node_pos(&mut self, uid: Uid, pos: Pos) -> Result<()> {
        let id = self.local_id(uid)?;
        if !pos.is_valid() {
            return Err(ModelError::InvalidValue(format!("non-finite position {}", pos)));
        }
        let old = self.nodes.get(&id).ok_or(ModelError::NodeNotFound(uid))?.pos();
        if old == pos {
            return Ok(());
        }
        self.begin_transaction("Move Node");
        self.apply_node_pos(id, pos);
        self.undo.record(UndoCommand::SetNodePos { node: uid, old, new: pos });
        self.end_transaction();
        Ok(())
    }

    pub fn set_node_text(&mut self, uid: Uid, text: impl Into<String>) -> Result<()> {
        let id = self.local_id(uid)?;
        let text = text.into();
        let old = self.nodes.get(&id).ok_or(ModelError::NodeNotFound(uid))?.text().to_string();
        if old == text {
            return Ok(());
        }
        self.begin_transaction("Change Node Text");
        self.apply_node_text(id, text.clone());
        self.undo.record(UndoCommand::SetNodeText { node: uid, old, new: text });
        self.end_transaction();
        Ok(())
    }

    fn apply_node_pos(&mut self, id: i64, pos: Pos) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.set_pos(pos);
        let uid = node.uid();
        self.pending.mark_entity(uid);
        let attached: Vec<Uid> = self
            .paths()
            .filter(|path| path.references_node(uid))
            .map(Path::uid)
            .collect();
        for path in attached {
            self.pending.mark_entity(path);
        }
    }

    fn apply_node_text(&mut self, id: i64, text: String) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_text(text);
            let uid = node.uid();
            self.pending.mark_entity(uid);
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Create a path of `kind` with a fresh id; all positions start at the origin
    pub fn create_path(&mut self, kind: PathKind) -> Uid {
        let id = self.allocate_id();
        let uid = self.make_uid(id);
        self.begin_transaction("Create Path");
        let snapshot = self.default_style_snapshot();
        self.insert_path(Path::new(uid, kind), snapshot, None);
        self.undo.record(UndoCommand::CreatePath { uid, kind });
        self.end_transaction();
        tracing::debug!(id = uid.id(), %kind, "created path");
        uid
    }

    /// Create an edge from `start` to `end` as one undo step
    pub fn create_edge(&mut self, kind: PathKind, start: MetaPos, end: MetaPos) -> Result<Uid> {
        if !kind.is_edge() {
            return Err(ModelError::InvalidEndpoint {
                kind,
                endpoint: PathEndpoint::Start.key(),
            });
        }
        self.begin_transaction("Create Edge");
        let uid = self.create_path(kind);
        let result = self
            .set_path_endpoint(uid, PathEndpoint::Start, start)
            .and_then(|_| self.set_path_endpoint(uid, PathEndpoint::End, end));
        if result.is_err() {
            self.undo.cancel();
        }
        self.end_transaction();
        result.map(|_| uid)
    }

    /// Create a path with a caller-chosen id without recording undo
    pub fn create_path_with_id(&mut self, id: i64, kind: PathKind) -> Result<Uid> {
        self.check_free_id(id)?;
        self.last_id = self.last_id.max(id);
        let uid = self.make_uid(id);
        let snapshot = self.default_style_snapshot();
        self.insert_path(Path::new(uid, kind), snapshot, None);
        Ok(uid)
    }

    fn insert_path(&mut self, path: Path, style: StyleSnapshot, index: Option<usize>) {
        let uid = path.uid();
        self.insert_style(uid, StyleKind::Edge, style);
        self.paths.insert(uid.id(), path);
        match index {
            Some(index) if index <= self.path_order.len() => self.path_order.insert(index, uid.id()),
            _ => self.path_order.push(uid.id()),
        }
        self.events.emit(DocumentEvent::PathCreated(uid));
    }

    fn remove_path(&mut self, id: i64) -> Option<(Path, StyleSnapshot, usize)> {
        let path = self.paths.remove(&id)?;
        let index = self.path_order.iter().position(|p| *p == id).unwrap_or(self.path_order.len());
        self.path_order.retain(|p| *p != id);
        let style = self
            .remove_style(id)
            .unwrap_or_else(|| self.default_style_snapshot());
        self.events.emit(DocumentEvent::PathDeleted(path.uid()));
        Some((path, style, index))
    }

    /// Detach every position of a path from its node, pinning each to
    /// where it currently resolves
    pub fn deconstruct_path(&mut self, uid: Uid) -> Result<()> {
        let id = self.local_id(uid)?;
        let path = self.paths.get(&id).ok_or(ModelError::PathNotFound(uid))?;
        let attached: Vec<(PathEndpoint, MetaPos)> = path
            .endpoints()
            .filter(|(_, meta)| meta.is_attached())
            .map(|(endpoint, meta)| (endpoint, *meta))
            .collect();
        if attached.is_empty() {
            return Ok(());
        }

        self.begin_transaction("Detach Path");
        for (endpoint, old) in attached {
            let mut new = old;
            new.set_pos(self.meta_pos_point(&old));
            self.record_path_endpoint(uid, endpoint, old, new);
        }
        self.end_transaction();
        Ok(())
    }

    /// Delete a path. Its node attachments are released first so undo
    /// rebuilds them step by step.
    pub fn delete_path(&mut self, uid: Uid) -> Result<()> {
        let id = self.local_id(uid)?;
        if !self.paths.contains_key(&id) {
            return Err(ModelError::PathNotFound(uid));
        }

        self.begin_transaction("Delete Path");
        let result = self.deconstruct_path(uid);
        self.reparent_children(uid);
        if let Some((path, style, index)) = self.remove_path(id) {
            self.undo.record(UndoCommand::DeletePath { path, style, index });
        }
        self.end_transaction();
        tracing::debug!(id, "deleted path");
        result
    }

    /// Set one of a path's positions. Attaching requires a live node of
    /// this document.
    pub fn set_path_endpoint(&mut self, uid: Uid, endpoint: PathEndpoint, meta: MetaPos) -> Result<()> {
        let id = self.local_id(uid)?;
        let path = self.paths.get(&id).ok_or(ModelError::PathNotFound(uid))?;
        let old = *path.endpoint(endpoint).ok_or(ModelError::InvalidEndpoint {
            kind: path.kind(),
            endpoint: endpoint.key(),
        })?;
        if !meta.literal_pos().is_valid() {
            return Err(ModelError::InvalidValue(format!(
                "non-finite {} position",
                endpoint.key()
            )));
        }
        if let Some(node) = meta.node() {
            let node_id = self.local_id(node)?;
            if !self.nodes.contains_key(&node_id) {
                return Err(ModelError::NodeNotFound(node));
            }
        }
        if old == meta {
            return Ok(());
        }
        self.begin_transaction("Change Path");
        self.record_path_endpoint(uid, endpoint, old, meta);
        self.end_transaction();
        Ok(())
    }

    pub fn set_path_start(&mut self, uid: Uid, meta: MetaPos) -> Result<()> {
        self.set_path_endpoint(uid, PathEndpoint::Start, meta)
    }

    pub fn set_path_end(&mut self, uid: Uid, meta: MetaPos) -> Result<()> {
        self.set_path_endpoint(uid, PathEndpoint::End, meta)
    }

    /// Center of an ellipse
    pub fn set_path_center(&mut self, uid: Uid, meta: MetaPos) -> Result<()> {
        self.set_path_endpoint(uid, PathEndpoint::Center, meta)
    }

    pub fn set_path_control1(&mut self, uid: Uid, meta: MetaPos) -> Result<()> {
        self.set_path_endpoint(uid, PathEndpoint::Control1, meta)
    }

    pub fn set_path_control2(&mut self, uid: Uid, meta: MetaPos) -> Result<()> {
        self.set_path_endpoint(uid, PathEndpoint::Control2, meta)
    }

    fn record_path_endpoint(&mut self, path: Uid, endpoint: PathEndpoint, old: MetaPos, new: MetaPos) {
        self.apply_path_endpoint(path.id(), endpoint, new);
        self.undo.record(UndoCommand::SetPathEndpoint { path, endpoint, old, new });
    }

    fn apply_path_endpoint(&mut self, id: i64, endpoint: PathEndpoint, meta: MetaPos) {
        let Some(path) = self.paths.get_mut(&id) else {
            return;
        };
        match path.endpoint_mut(endpoint) {
            Ok(slot) => *slot = meta,
            Err(err) => {
                tracing::warn!(id, error = %err, "ignoring endpoint change");
                return;
            }
        }
        let uid = path.uid();
        self.pending.mark_entity(uid);
    }

    // ------------------------------------------------------------------
    // Transactions and notifications
    // ------------------------------------------------------------------

    /// Open a transaction; see [`Transaction`]
    pub fn transaction(&mut self, name: &str) -> Transaction<'_> {
        Transaction::new(self, name)
    }

    /// Open a config transaction for `entity`; see [`ConfigTransaction`]
    pub fn config_transaction(&mut self, entity: Uid) -> ConfigTransaction<'_> {
        ConfigTransaction::new(self, entity)
    }

    /// Whether an undo group is currently being recorded
    pub fn is_transaction_running(&self) -> bool {
        self.undo.is_open()
    }

    pub(crate) fn begin_transaction(&mut self, name: &str) {
        self.undo.begin(name);
        self.begin_config();
    }

    pub(crate) fn cancel_transaction(&mut self) {
        self.undo.cancel();
    }

    pub(crate) fn end_transaction(&mut self) {
        if let Some(group) = self.undo.end() {
            tracing::debug!(name = group.name(), "rolling back cancelled transaction");
            self.replay(&group, false);
        }
        self.end_config();
    }

    pub(crate) fn begin_config(&mut self) {
        self.pending.depth += 1;
    }

    pub(crate) fn end_config(&mut self) {
        if self.pending.depth == 0 {
            tracing::warn!("config transaction closed without being opened");
            return;
        }
        self.pending.depth -= 1;
        if self.pending.depth == 0 {
            self.flush_changes();
        }
    }

    /// Queue a change notification for a node, path or the document style
    pub(crate) fn mark_changed(&mut self, uid: Uid) {
        if uid.document() != self.id {
            return;
        }
        if uid.id() == Uid::DOCUMENT_STYLE_ID {
            self.pending.mark_style(uid);
        } else if self.contains(uid) {
            self.pending.mark_entity(uid);
        }
    }

    fn flush_changes(&mut self) {
        if self.pending.styles.is_empty() && self.pending.entities.is_empty() {
            return;
        }
        let dirty_styles = std::mem::take(&mut self.pending.styles);
        let dirty_entities = std::mem::take(&mut self.pending.entities);

        let mut styles = Vec::new();
        for uid in dirty_styles {
            self.collect_style_tree(uid, &mut styles);
        }
        let mut entities: Vec<Uid> = Vec::new();
        for uid in styles.iter().chain(dirty_entities.iter()) {
            if self.contains(*uid) && !entities.contains(uid) {
                entities.push(*uid);
            }
        }

        let events: Vec<DocumentEvent> = styles
            .into_iter()
            .map(DocumentEvent::StyleChanged)
            .chain(entities.into_iter().map(DocumentEvent::EntityChanged))
            .collect();
        if events.is_empty() {
            return;
        }
        for event in events {
            self.events.emit(event);
        }
        self.events.emit(DocumentEvent::Changed);
    }

    /// `root` and every live style below it, each once
    fn collect_style_tree(&self, root: Uid, out: &mut Vec<Uid>) {
        let mut stack = vec![root];
        while let Some(uid) = stack.pop() {
            if uid.document() != self.id || out.contains(&uid) {
                continue;
            }
            let Some(style) = self.style_entry(uid.id()) else {
                continue;
            };
            out.push(uid);
            stack.extend(style.children().iter().rev().copied());
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DocumentEvent) + 'static) -> ListenerId {
        self.events.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Undo / redo
    // ------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Name of the group `undo()` would revert
    pub fn undo_text(&self) -> Option<&str> {
        self.undo.undo_name()
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.undo.redo_name()
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        self.undo.set_max_entries(limit);
    }

    /// Forget all undo and redo history
    pub fn clear_undo_history(&mut self) {
        self.undo.clear();
    }

    /// Revert the most recent group
    pub fn undo(&mut self) -> Result<()> {
        if self.undo.is_open() {
            return Err(ModelError::TransactionOpen("undo"));
        }
        let group = self.undo.pop_undo().ok_or(ModelError::UndoStackEmpty)?;
        tracing::debug!(name = group.name(), "undo");
        self.begin_config();
        self.replay(&group, false);
        self.end_config();
        self.undo.push_redo(group);
        Ok(())
    }

    /// Re-apply the most recently undone group
    pub fn redo(&mut self) -> Result<()> {
        if self.undo.is_open() {
            return Err(ModelError::TransactionOpen("redo"));
        }
        let group = self.undo.pop_redo().ok_or(ModelError::RedoStackEmpty)?;
        tracing::debug!(name = group.name(), "redo");
        self.begin_config();
        self.replay(&group, true);
        self.end_config();
        self.undo.push_undo(group);
        Ok(())
    }

    /// Run a group forwards (redo) or backwards (undo)
    fn replay(&mut self, group: &UndoGroup, forward: bool) {
        self.undo.set_replaying(true);
        if forward {
            for command in &group.commands {
                self.apply_command(command, true);
            }
        } else {
            for command in group.commands.iter().rev() {
                self.apply_command(command, false);
            }
        }
        self.undo.set_replaying(false);
    }

    fn apply_command(&mut self, command: &UndoCommand, forward: bool) {
        match (command, forward) {
            (UndoCommand::CreateNode { uid }, true) => {
                let snapshot = self.default_style_snapshot();
                self.insert_node(Node::new(*uid), snapshot, None);
            }
            (UndoCommand::CreateNode { uid }, false) => {
                self.remove_node(uid.id());
            }
            (UndoCommand::DeleteNode { node, .. }, true) => {
                self.remove_node(node.id());
            }
            (UndoCommand::DeleteNode { node, style, index }, false) => {
                self.insert_node(node.clone(), style.clone(), Some(*index));
            }
            (UndoCommand::CreatePath { uid, kind }, true) => {
                let snapshot = self.default_style_snapshot();
                self.insert_path(Path::new(*uid, *kind), snapshot, None);
            }
            (UndoCommand::CreatePath { uid, .. }, false) => {
                self.remove_path(uid.id());
            }
            (UndoCommand::DeletePath { path, .. }, true) => {
                self.remove_path(path.id());
            }
            (UndoCommand::DeletePath { path, style, index }, false) => {
                self.insert_path(path.clone(), style.clone(), Some(*index));
            }
            (UndoCommand::SetNodePos { node, old, new }, _) => {
                self.apply_node_pos(node.id(), if forward { *new } else { *old });
            }
            (UndoCommand::SetNodeText { node, old, new }, _) => {
                let text = if forward { new } else { old };
                self.apply_node_text(node.id(), text.clone());
            }
            (UndoCommand::SetPathEndpoint { path, endpoint, old, new }, _) => {
                self.apply_path_endpoint(path.id(), *endpoint, if forward { *new } else { *old });
            }
            (UndoCommand::SetStyleProperty { style, property, old, new }, _) => {
                self.apply_style_property(style.id(), *property, if forward { *new } else { *old });
            }
            (UndoCommand::SetStyleParent { style, old, new }, _) => {
                self.apply_style_parent(style.id(), if forward { *new } else { *old });
            }
        }
    }

    // ------------------------------------------------------------------
    // Clearing
    // ------------------------------------------------------------------

    /// Remove every entity, reset the id counter and the undo history.
    /// The document gets a new identity, so uids from before are foreign.
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.nodes.len(), paths = self.paths.len(), "clearing document");
        self.events.emit(DocumentEvent::AboutToClear);

        let nodes: Vec<Uid> = self.nodes().map(Node::uid).collect();
        let paths: Vec<Uid> = self.paths().map(Path::uid).collect();
        self.nodes.clear();
        self.node_order.clear();
        for uid in nodes {
            self.events.emit(DocumentEvent::NodeDeleted(uid));
        }
        self.paths.clear();
        self.path_order.clear();
        for uid in paths {
            self.events.emit(DocumentEvent::PathDeleted(uid));
        }

        self.id = DocumentId::new();
        self.last_id = 0;
        self.styles.clear();
        self.document_style = Style::new(self.make_uid(Uid::DOCUMENT_STYLE_ID), StyleKind::Document);
        self.undo.clear();
        self.pending.clear();

        self.events.emit(DocumentEvent::Cleared);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Anchor, Color, Shape, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record_events(doc: &mut Document) -> Rc<RefCell<Vec<DocumentEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        doc.subscribe(move |event| sink.borrow_mut().push(*event));
        events
    }

    fn edge_between(doc: &mut Document, a: Uid, b: Uid) -> Uid {
        doc.create_edge(
            PathKind::Line,
            MetaPos::on_node(a, Anchor::NoAnchor),
            MetaPos::on_node(b, Anchor::NoAnchor),
        )
        .unwrap()
    }

    #[test]
    fn test_ids_start_at_one_and_are_never_reused() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_path(PathKind::Line);
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);

        doc.undo().unwrap();
        let c = doc.create_node();
        assert_eq!(c.id(), 3);
        assert_eq!(doc.last_id(), 3);
    }

    #[test]
    fn test_create_with_id_checks_and_bumps_counter() {
        let mut doc = Document::new();
        doc.create_node_with_id(7).unwrap();
        assert!(matches!(doc.create_node_with_id(7), Err(ModelError::DuplicateId(7))));
        assert!(matches!(
            doc.create_path_with_id(7, PathKind::Line),
            Err(ModelError::DuplicateId(7))
        ));
        assert!(matches!(doc.create_node_with_id(0), Err(ModelError::ReservedId(0))));
        assert!(matches!(doc.create_node_with_id(-1), Err(ModelError::ReservedId(-1))));

        assert!(!doc.can_undo());
        assert_eq!(doc.create_node().id(), 8);
        doc.undo().unwrap();
        assert!(!doc.can_undo());
        assert!(doc.node_from_id(7).is_some());
    }

    #[test]
    fn test_foreign_uid_is_rejected() {
        let mut doc = Document::new();
        let mut other = Document::new();
        let foreign = other.create_node();
        doc.create_node();

        assert!(doc.node(foreign).is_none());
        assert!(matches!(
            doc.set_node_pos(foreign, Pos::cm(1.0, 1.0)),
            Err(ModelError::ForeignDocument(_))
        ));
        assert!(matches!(doc.delete_node(foreign), Err(ModelError::ForeignDocument(_))));
    }

    #[test]
    fn test_undo_redo_recreates_same_id() {
        let mut doc = Document::new();
        let node = doc.create_node();
        doc.set_node_pos(node, Pos::cm(-3.0, 3.0)).unwrap();
        doc.set_node_text(node, "a").unwrap();

        doc.undo().unwrap();
        doc.undo().unwrap();
        doc.undo().unwrap();
        assert!(doc.node(node).is_none());
        assert!(matches!(doc.undo(), Err(ModelError::UndoStackEmpty)));

        doc.redo().unwrap();
        doc.redo().unwrap();
        doc.redo().unwrap();
        let restored = doc.node(node).unwrap();
        assert_eq!(restored.uid(), node);
        assert_eq!(restored.pos(), Pos::cm(-3.0, 3.0));
        assert_eq!(restored.text(), "a");
        assert!(matches!(doc.redo(), Err(ModelError::RedoStackEmpty)));
    }

    #[test]
    fn test_node_style_falls_back_to_document_style() {
        let mut doc = Document::new();
        let node = doc.create_node();
        doc.set_style_property(doc.document_style_uid(), PropertyValue::PenColor(Color::RED))
            .unwrap();

        let style = doc.style_by_uid(node).unwrap();
        assert_eq!(style.parent_style().unwrap().uid(), doc.document_style_uid());
        assert_eq!(style.pen_color(), Color::RED);
    }

    #[test]
    fn test_delete_node_detaches_paths_and_undo_reattaches() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        doc.set_node_pos(a, Pos::cm(-3.0, 3.0)).unwrap();
        doc.set_node_pos(b, Pos::cm(3.0, 3.0)).unwrap();
        let edge = edge_between(&mut doc, a, b);

        doc.delete_node(a).unwrap();
        let start = *doc.path(edge).unwrap().start().unwrap();
        assert!(!start.is_attached());
        assert_eq!(start.anchor(), Anchor::NoAnchor);
        assert_eq!(start.literal_pos(), Pos::cm(-3.0, 3.0));
        assert_eq!(doc.undo_text(), Some("Delete Node"));

        doc.undo().unwrap();
        assert!(doc.node(a).is_some());
        assert_eq!(doc.path(edge).unwrap().start().unwrap().node(), Some(a));
        assert_eq!(doc.nodes().map(Node::id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_delete_path_undo_restores_attachments() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        let edge = edge_between(&mut doc, a, b);
        doc.set_style_property(edge, PropertyValue::BendAngle(30.0)).unwrap();

        doc.delete_path(edge).unwrap();
        assert!(doc.path(edge).is_none());
        assert_eq!(doc.style_count(), 3);

        doc.undo().unwrap();
        let path = doc.path(edge).unwrap();
        assert_eq!(path.start().unwrap().node(), Some(a));
        assert_eq!(path.end().unwrap().node(), Some(b));
        assert_eq!(doc.style_by_uid(edge).unwrap().bend_angle(), 30.0);
    }

    #[test]
    fn test_delete_reparents_child_styles() {
        let mut doc = Document::new();
        let base = doc.create_node();
        let derived = doc.create_node();
        doc.set_parent_style(derived, Some(base)).unwrap();
        doc.set_style_property(base, PropertyValue::Shape(Shape::Circle)).unwrap();
        assert_eq!(doc.style_by_uid(derived).unwrap().shape(), Shape::Circle);

        doc.delete_node(base).unwrap();
        let style = doc.style_by_uid(derived).unwrap();
        assert_eq!(style.style().parent(), Some(doc.document_style_uid()));
        assert_eq!(style.shape(), Shape::Rectangle);

        doc.undo().unwrap();
        assert_eq!(doc.style_by_uid(derived).unwrap().style().parent(), Some(base));
        assert_eq!(doc.style_by_uid(base).unwrap().style().children(), &[derived]);
        assert_eq!(doc.style_by_uid(derived).unwrap().shape(), Shape::Circle);
    }

    #[test]
    fn test_cyclic_parent_is_rejected() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        doc.set_parent_style(b, Some(a)).unwrap();

        assert!(matches!(
            doc.set_parent_style(a, Some(b)),
            Err(ModelError::CyclicStyleParent { .. })
        ));
        assert!(matches!(
            doc.set_parent_style(a, Some(a)),
            Err(ModelError::CyclicStyleParent { .. })
        ));
        let root = doc.document_style_uid();
        assert!(matches!(
            doc.set_parent_style(root, Some(b)),
            Err(ModelError::CyclicStyleParent { .. })
        ));
    }

    #[test]
    fn test_foreign_parent_style_is_rejected() {
        let mut doc = Document::new();
        let mut other = Document::new();
        let a = doc.create_node();
        let foreign = other.create_node();
        doc.clear_undo_history();

        assert!(matches!(
            doc.set_parent_style(a, Some(foreign)),
            Err(ModelError::ForeignDocument(_))
        ));
        assert!(matches!(
            doc.set_parent_style(a, Some(other.document_style_uid())),
            Err(ModelError::ForeignDocument(_))
        ));
        assert_eq!(doc.style_by_uid(a).unwrap().style().parent(), Some(doc.document_style_uid()));
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_redo_delete_node_detaches_and_reparents_again() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        doc.set_node_pos(a, Pos::cm(-3.0, 3.0)).unwrap();
        doc.set_parent_style(b, Some(a)).unwrap();
        let edge = edge_between(&mut doc, a, b);
        let root = doc.document_style_uid();

        doc.delete_node(a).unwrap();
        doc.undo().unwrap();
        doc.redo().unwrap();

        assert!(doc.node(a).is_none());
        let start = *doc.path(edge).unwrap().start().unwrap();
        assert!(!start.is_attached());
        assert_eq!(start.literal_pos(), Pos::cm(-3.0, 3.0));
        assert_eq!(doc.style_by_uid(b).unwrap().style().parent(), Some(root));

        doc.undo().unwrap();
        assert!(doc.node(a).is_some());
        assert_eq!(doc.path(edge).unwrap().start().unwrap().node(), Some(a));
        assert_eq!(doc.style_by_uid(b).unwrap().style().parent(), Some(a));
        assert_eq!(doc.style_by_uid(a).unwrap().style().children(), &[b]);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let edge = doc.create_path(PathKind::Line);
        doc.clear_undo_history();

        assert!(matches!(
            doc.set_style_property(node, PropertyValue::Rotation(f64::NAN)),
            Err(ModelError::InvalidValue(_))
        ));
        assert!(matches!(
            doc.set_style_property(node, PropertyValue::LineWidth(Value::points(f64::INFINITY))),
            Err(ModelError::InvalidValue(_))
        ));
        assert!(matches!(
            doc.edit_style(node).unwrap().set_pen_opacity(f64::NAN),
            Err(ModelError::InvalidValue(_))
        ));
        assert!(matches!(
            doc.set_node_pos(node, Pos::new(Value::cm(f64::INFINITY), Value::cm(0.0))),
            Err(ModelError::InvalidValue(_))
        ));
        assert!(matches!(
            doc.set_path_end(edge, MetaPos::at(Pos::cm(f64::NAN, 1.0))),
            Err(ModelError::InvalidValue(_))
        ));

        assert!(!doc.can_undo());
        assert_eq!(doc.node(node).unwrap().pos(), Pos::default());
        assert!(!doc.style_by_uid(node).unwrap().property_set(StyleProperty::Rotation));
    }

    #[test]
    fn test_inapplicable_property_is_rejected() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let edge = doc.create_path(PathKind::BendCurve);

        assert!(matches!(
            doc.set_style_property(node, PropertyValue::BendAngle(10.0)),
            Err(ModelError::PropertyNotApplicable { .. })
        ));
        assert!(matches!(
            doc.edit_style(edge).unwrap().set_shape(Shape::Circle),
            Err(ModelError::PropertyNotApplicable { .. })
        ));
        doc.edit_style(doc.document_style_uid())
            .unwrap()
            .set_bend_angle(10.0)
            .unwrap();
    }

    #[test]
    fn test_setting_current_value_is_a_noop() {
        let mut doc = Document::new();
        let node = doc.create_node();
        doc.clear_undo_history();
        let events = record_events(&mut doc);

        doc.set_node_pos(node, Pos::default()).unwrap();
        doc.unset_style_property(node, StyleProperty::PenColor).unwrap();
        doc.set_style_property(node, PropertyValue::LineWidth(Value::points(0.6)))
            .unwrap();
        events.borrow_mut().clear();
        doc.set_style_property(node, PropertyValue::LineWidth(Value::points(0.6)))
            .unwrap();

        assert!(events.borrow().is_empty());
        assert_eq!(doc.undo.undo_len(), 1);
    }

    #[test]
    fn test_bend_angle_is_normalized_on_set() {
        let mut doc = Document::new();
        let edge = doc.create_path(PathKind::BendCurve);
        doc.edit_style(edge).unwrap().set_bend_angle(200.0).unwrap();
        assert_eq!(doc.style_by_uid(edge).unwrap().bend_angle(), -160.0);
    }

    #[test]
    fn test_transaction_is_one_undo_step() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        doc.clear_undo_history();

        {
            let mut tx = doc.transaction("Align");
            tx.set_node_pos(a, Pos::cm(0.0, 1.0)).unwrap();
            tx.set_node_pos(b, Pos::cm(2.0, 1.0)).unwrap();
            tx.edit_style(a).unwrap().set_pen_color(Color::BLUE).unwrap();
        }

        assert_eq!(doc.undo_text(), Some("Align"));
        doc.undo().unwrap();
        assert!(!doc.can_undo());
        assert_eq!(doc.node(a).unwrap().pos(), Pos::default());
        assert_eq!(doc.node(b).unwrap().pos(), Pos::default());
        assert!(!doc.style_by_uid(a).unwrap().property_set(StyleProperty::PenColor));
    }

    #[test]
    fn test_nested_transactions_join_outermost() {
        let mut doc = Document::new();
        {
            let mut outer = doc.transaction("Outer");
            outer.create_node();
            {
                let mut inner = outer.transaction("Inner");
                inner.create_node();
                assert!(inner.is_transaction_running());
            }
            assert!(matches!(outer.undo(), Err(ModelError::TransactionOpen(_))));
            outer.finish();
            outer.finish();
        }
        assert!(!doc.is_transaction_running());
        assert_eq!(doc.undo_text(), Some("Outer"));
        doc.undo().unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_cancelled_transaction_rolls_back() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let events = record_events(&mut doc);
        {
            let mut tx = doc.transaction("Try");
            tx.set_node_text(node, "draft").unwrap();
            tx.create_node();
            tx.cancel();
        }
        assert_eq!(doc.node(node).unwrap().text(), "");
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.undo_text(), Some("Create Node"));
        assert!(events.borrow().contains(&DocumentEvent::NodeDeleted(Uid::new(2, doc.id()))));
    }

    #[test]
    fn test_notifications_wait_for_outermost_close() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let events = record_events(&mut doc);

        {
            let mut tx = doc.transaction("Restyle");
            tx.edit_style(node).unwrap().set_pen_color(Color::RED).unwrap();
            tx.edit_style(node).unwrap().set_fill_color(Color::BLUE).unwrap();
            assert!(events.borrow().is_empty());
        }

        assert_eq!(
            *events.borrow(),
            vec![
                DocumentEvent::StyleChanged(node),
                DocumentEvent::EntityChanged(node),
                DocumentEvent::Changed,
            ]
        );
    }

    #[test]
    fn test_document_style_change_reaches_every_entity() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let path = doc.create_path(PathKind::Line);
        let events = record_events(&mut doc);

        doc.set_style_property(doc.document_style_uid(), PropertyValue::PenOpacity(0.5))
            .unwrap();

        let events = events.borrow();
        let root = doc.document_style_uid();
        for expected in [
            DocumentEvent::StyleChanged(root),
            DocumentEvent::StyleChanged(node),
            DocumentEvent::StyleChanged(path),
            DocumentEvent::EntityChanged(node),
            DocumentEvent::EntityChanged(path),
        ] {
            assert_eq!(events.iter().filter(|e| **e == expected).count(), 1);
        }
        assert_eq!(events.last(), Some(&DocumentEvent::Changed));
    }

    #[test]
    fn test_moving_node_notifies_attached_paths() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        let edge = edge_between(&mut doc, a, b);
        let events = record_events(&mut doc);

        doc.set_node_pos(a, Pos::cm(1.0, 0.0)).unwrap();
        assert!(events.borrow().contains(&DocumentEvent::EntityChanged(edge)));
        assert_eq!(
            doc.meta_pos_point(doc.path(edge).unwrap().start().unwrap()),
            Pos::cm(1.0, 0.0)
        );
    }

    #[test]
    fn test_config_transaction_marks_entity() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let events = record_events(&mut doc);
        {
            let mut config = doc.config_transaction(node);
            config.set_node_text(node, "x").unwrap();
            assert!(events.borrow().is_empty());
        }
        assert_eq!(
            *events.borrow(),
            vec![DocumentEvent::EntityChanged(node), DocumentEvent::Changed]
        );
    }

    #[test]
    fn test_attaching_requires_live_node() {
        let mut doc = Document::new();
        let edge = doc.create_path(PathKind::Line);
        let ghost = Uid::new(42, doc.id());
        assert!(matches!(
            doc.set_path_endpoint(edge, PathEndpoint::Start, MetaPos::on_node(ghost, Anchor::North)),
            Err(ModelError::NodeNotFound(_))
        ));
        assert!(matches!(
            doc.set_path_endpoint(edge, PathEndpoint::Center, MetaPos::default()),
            Err(ModelError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_failed_create_edge_leaves_nothing() {
        let mut doc = Document::new();
        let ghost = Uid::new(42, doc.id());
        let result = doc.create_edge(
            PathKind::Line,
            MetaPos::at(Pos::cm(0.0, 0.0)),
            MetaPos::on_node(ghost, Anchor::NoAnchor),
        );
        assert!(result.is_err());
        assert_eq!(doc.path_count(), 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut doc = Document::new();
        let node = doc.create_node();
        doc.create_path(PathKind::Ellipse);
        let old_id = doc.id();
        let events = record_events(&mut doc);

        doc.clear();

        assert!(doc.is_empty());
        assert_eq!(doc.style_count(), 1);
        assert_eq!(doc.last_id(), 0);
        assert!(!doc.can_undo());
        assert_ne!(doc.id(), old_id);
        assert!(doc.node(node).is_none());
        {
            let events = events.borrow();
            assert_eq!(events.first(), Some(&DocumentEvent::AboutToClear));
            assert_eq!(events.last(), Some(&DocumentEvent::Cleared));
            assert!(events.contains(&DocumentEvent::NodeDeleted(node)));
        }
        assert_eq!(doc.create_node().id(), 1);
    }

    #[test]
    fn test_undo_limit() {
        let mut doc = Document::with_undo_limit(2);
        for _ in 0..5 {
            doc.create_node();
        }
        doc.undo().unwrap();
        doc.undo().unwrap();
        assert!(!doc.can_undo());
        assert_eq!(doc.node_count(), 3);
    }
}
