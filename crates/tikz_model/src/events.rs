//! Document change notifications

use crate::Uid;

/// Something that happened to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// `clear()` is about to remove every entity
    AboutToClear,
    /// `clear()` finished
    Cleared,
    NodeCreated(Uid),
    NodeDeleted(Uid),
    PathCreated(Uid),
    PathDeleted(Uid),
    /// A style or one of its ancestors changed
    StyleChanged(Uid),
    /// A node or path changed, including through its style
    EntityChanged(Uid),
    /// Emitted once after a batch of `StyleChanged`/`EntityChanged`
    Changed,
}

/// Handle returned by [`Document::subscribe`](crate::Document::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&DocumentEvent)>;

/// Broadcasts document events to registered listeners
#[derive(Default)]
pub(crate) struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &format!("<{} listeners>", self.listeners.len()))
            .finish()
    }
}

impl EventBus {
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: DocumentEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

/// Entities touched while notifications are deferred
#[derive(Debug, Default)]
pub(crate) struct PendingChanges {
    /// Open config scopes; notifications flush when this returns to zero
    pub depth: usize,
    pub styles: Vec<Uid>,
    pub entities: Vec<Uid>,
}

impl PendingChanges {
    pub fn mark_style(&mut self, uid: Uid) {
        if !self.styles.contains(&uid) {
            self.styles.push(uid);
        }
    }

    pub fn mark_entity(&mut self, uid: Uid) {
        if !self.entities.contains(&uid) {
            self.entities.push(uid);
        }
    }

    pub fn clear(&mut self) {
        self.styles.clear();
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentId;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::default();
        let sink = seen.clone();
        let id = bus.subscribe(Box::new(move |event| sink.borrow_mut().push(*event)));

        bus.emit(DocumentEvent::Changed);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(DocumentEvent::Cleared);

        assert_eq!(*seen.borrow(), vec![DocumentEvent::Changed]);
    }

    #[test]
    fn test_pending_changes_deduplicate() {
        let doc = DocumentId::new();
        let mut pending = PendingChanges::default();
        pending.mark_style(Uid::new(1, doc));
        pending.mark_style(Uid::new(1, doc));
        pending.mark_entity(Uid::new(2, doc));
        assert_eq!(pending.styles.len(), 1);
        assert_eq!(pending.entities.len(), 1);
        pending.clear();
        assert!(pending.styles.is_empty());
    }
}
