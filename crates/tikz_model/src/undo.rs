//! Undo/redo stack with named command groups
//!
//! Commands address entities by uid, never by reference, so a group stays
//! valid while the entities it touches are deleted and recreated by other
//! groups on the stack.

use crate::{
    MetaPos, Node, Path, PathEndpoint, PathKind, Pos, PropertyValue, StyleProperties, StyleProperty,
    Uid,
};

/// State needed to recreate a deleted style
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StyleSnapshot {
    pub parent: Option<Uid>,
    pub properties: StyleProperties,
}

/// One reversible document mutation
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UndoCommand {
    CreateNode {
        uid: Uid,
    },
    DeleteNode {
        node: Node,
        style: StyleSnapshot,
        index: usize,
    },
    CreatePath {
        uid: Uid,
        kind: PathKind,
    },
    DeletePath {
        path: Path,
        style: StyleSnapshot,
        index: usize,
    },
    SetNodePos {
        node: Uid,
        old: Pos,
        new: Pos,
    },
    SetNodeText {
        node: Uid,
        old: String,
        new: String,
    },
    SetPathEndpoint {
        path: Uid,
        endpoint: PathEndpoint,
        old: MetaPos,
        new: MetaPos,
    },
    SetStyleProperty {
        style: Uid,
        property: StyleProperty,
        old: Option<PropertyValue>,
        new: Option<PropertyValue>,
    },
    SetStyleParent {
        style: Uid,
        old: Option<Uid>,
        new: Option<Uid>,
    },
}

impl UndoCommand {
    /// Fold `next` into `self` when both change the same slot
    fn merge_with(&mut self, next: &UndoCommand) -> bool {
        match (self, next) {
            (
                UndoCommand::SetNodePos { node, new, .. },
                UndoCommand::SetNodePos { node: next_node, new: next_new, .. },
            ) if node == next_node => {
                *new = *next_new;
                true
            }
            (
                UndoCommand::SetNodeText { node, new, .. },
                UndoCommand::SetNodeText { node: next_node, new: next_new, .. },
            ) if node == next_node => {
                new.clone_from(next_new);
                true
            }
            (
                UndoCommand::SetStyleProperty { style, property, new, .. },
                UndoCommand::SetStyleProperty {
                    style: next_style,
                    property: next_property,
                    new: next_new,
                    ..
                },
            ) if style == next_style && property == next_property => {
                *new = *next_new;
                true
            }
            _ => false,
        }
    }
}

/// A named batch of commands undone and redone as one step
#[derive(Debug, Clone, PartialEq)]
pub struct UndoGroup {
    name: String,
    pub(crate) commands: Vec<UndoCommand>,
}

impl UndoGroup {
    fn new(name: String) -> Self {
        Self {
            name,
            commands: Vec::new(),
        }
    }

    /// Get the user-visible name of this group
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn push(&mut self, command: UndoCommand) {
        if let Some(last) = self.commands.last_mut() {
            if last.merge_with(&command) {
                return;
            }
        }
        self.commands.push(command);
    }
}

/// Undo and redo stacks plus the group currently being recorded
#[derive(Debug)]
pub(crate) struct UndoStack {
    undo_stack: Vec<UndoGroup>,
    redo_stack: Vec<UndoGroup>,
    /// Maximum number of undo groups, 0 for unlimited
    max_entries: usize,
    open: Option<UndoGroup>,
    depth: usize,
    cancelled: bool,
    /// Set while undo/redo replays commands so they are not re-recorded
    replaying: bool,
}

impl UndoStack {
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
            open: None,
            depth: 0,
            cancelled: false,
            replaying: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// Open a group; nested calls join the outermost one
    pub fn begin(&mut self, name: &str) {
        self.depth += 1;
        if self.depth == 1 {
            self.open = Some(UndoGroup::new(name.to_string()));
            self.cancelled = false;
        }
    }

    /// Roll back the outermost group when it closes
    pub fn cancel(&mut self) {
        if self.is_open() {
            self.cancelled = true;
        }
    }

    /// Close one nesting level. Returns the group when the outermost
    /// level closes cancelled so the caller can revert it.
    pub fn end(&mut self) -> Option<UndoGroup> {
        if self.depth == 0 {
            tracing::warn!("undo group closed without being opened");
            return None;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return None;
        }
        let group = self.open.take()?;
        if self.cancelled {
            self.cancelled = false;
            return Some(group);
        }
        if !group.is_empty() {
            self.push(group);
        }
        None
    }

    pub fn record(&mut self, command: UndoCommand) {
        if self.replaying {
            return;
        }
        match self.open.as_mut() {
            Some(group) => group.push(command),
            None => {
                let mut group = UndoGroup::new(String::from("Edit"));
                group.push(command);
                self.push(group);
            }
        }
    }

    fn push(&mut self, group: UndoGroup) {
        self.redo_stack.clear();
        self.undo_stack.push(group);
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        if self.max_entries > 0 && self.undo_stack.len() > self.max_entries {
            let excess = self.undo_stack.len() - self.max_entries;
            self.undo_stack.drain(..excess);
        }
    }

    pub fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }

    pub fn pop_undo(&mut self) -> Option<UndoGroup> {
        self.undo_stack.pop()
    }

    pub fn pop_redo(&mut self) -> Option<UndoGroup> {
        self.redo_stack.pop()
    }

    pub fn push_redo(&mut self, group: UndoGroup) {
        self.redo_stack.push(group);
    }

    /// Put a redone group back without discarding the rest of the redo stack
    pub fn push_undo(&mut self, group: UndoGroup) {
        self.undo_stack.push(group);
        self.enforce_limit();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(UndoGroup::name)
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(UndoGroup::name)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.enforce_limit();
    }

    /// Drop all history. An open group keeps its nesting level but loses
    /// what it recorded so far.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        if let Some(group) = self.open.as_mut() {
            group.commands.clear();
        }
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::with_limit(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentId;

    fn move_command(node: Uid, x: f64) -> UndoCommand {
        UndoCommand::SetNodePos {
            node,
            old: Pos::cm(x - 1.0, 0.0),
            new: Pos::cm(x, 0.0),
        }
    }

    #[test]
    fn test_nested_groups_record_once() {
        let node = Uid::new(1, DocumentId::new());
        let mut stack = UndoStack::default();
        stack.begin("Outer");
        stack.begin("Inner");
        stack.record(UndoCommand::CreateNode { uid: node });
        assert!(stack.end().is_none());
        assert!(!stack.can_undo());
        assert!(stack.end().is_none());

        assert_eq!(stack.undo_len(), 1);
        assert_eq!(stack.undo_name(), Some("Outer"));
    }

    #[test]
    fn test_consecutive_moves_merge() {
        let node = Uid::new(1, DocumentId::new());
        let mut stack = UndoStack::default();
        stack.begin("Move");
        stack.record(move_command(node, 1.0));
        stack.record(move_command(node, 2.0));
        stack.record(move_command(node, 3.0));
        stack.end();

        let group = stack.pop_undo().unwrap();
        assert_eq!(
            group.commands,
            vec![UndoCommand::SetNodePos {
                node,
                old: Pos::cm(0.0, 0.0),
                new: Pos::cm(3.0, 0.0),
            }]
        );
    }

    #[test]
    fn test_cancelled_group_is_returned() {
        let node = Uid::new(1, DocumentId::new());
        let mut stack = UndoStack::default();
        stack.begin("Doomed");
        stack.record(UndoCommand::CreateNode { uid: node });
        stack.cancel();
        let group = stack.end().expect("cancelled group");
        assert_eq!(group.len(), 1);
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let mut stack = UndoStack::default();
        stack.begin("Nothing");
        stack.end();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_replaying_is_not_recorded() {
        let node = Uid::new(1, DocumentId::new());
        let mut stack = UndoStack::default();
        stack.set_replaying(true);
        stack.record(UndoCommand::CreateNode { uid: node });
        stack.set_replaying(false);
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_limit_discards_oldest() {
        let doc = DocumentId::new();
        let mut stack = UndoStack::with_limit(2);
        for id in 1..=3 {
            stack.begin(&format!("Create {}", id));
            stack.record(UndoCommand::CreateNode { uid: Uid::new(id, doc) });
            stack.end();
        }
        assert_eq!(stack.undo_len(), 2);
        assert_eq!(stack.undo_name(), Some("Create 3"));
    }

    #[test]
    fn test_new_group_clears_redo() {
        let doc = DocumentId::new();
        let mut stack = UndoStack::default();
        stack.record(UndoCommand::CreateNode { uid: Uid::new(1, doc) });
        let group = stack.pop_undo().unwrap();
        stack.push_redo(group);
        assert!(stack.can_redo());

        stack.record(UndoCommand::CreateNode { uid: Uid::new(2, doc) });
        assert!(!stack.can_redo());
    }
}
