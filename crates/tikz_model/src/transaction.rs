//! Scoped guards that batch document edits

use crate::{Document, Uid};
use std::ops::{Deref, DerefMut};

/// Groups every edit made through it into one named undo step.
///
/// Transactions nest: inner ones join the outermost group, and change
/// notifications are held back until the outermost one finishes. Dropping
/// the guard finishes it.
///
/// ```ignore
/// let mut tx = document.transaction("Align Nodes");
/// tx.set_node_pos(a, Pos::cm(0.0, 1.0))?;
/// tx.set_node_pos(b, Pos::cm(2.0, 1.0))?;
/// tx.finish();
/// ```
#[derive(Debug)]
pub struct Transaction<'a> {
    document: &'a mut Document,
    running: bool,
}

impl<'a> Transaction<'a> {
    pub fn new(document: &'a mut Document, name: &str) -> Self {
        document.begin_transaction(name);
        Self {
            document,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Discard everything recorded in the outermost group once it finishes.
    /// The edits are reverted, not kept.
    pub fn cancel(&mut self) {
        if self.running {
            self.document.cancel_transaction();
        }
    }

    /// Close this level. Calling it again does nothing.
    pub fn finish(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.document.end_transaction();
    }
}

impl Deref for Transaction<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.document
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.document
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Defers change notifications while several properties of one entity are
/// edited. On finish the entity is marked changed; listeners hear about it
/// when the last open config transaction or transaction closes.
#[derive(Debug)]
pub struct ConfigTransaction<'a> {
    document: &'a mut Document,
    entity: Uid,
    running: bool,
}

impl<'a> ConfigTransaction<'a> {
    pub fn new(document: &'a mut Document, entity: Uid) -> Self {
        document.begin_config();
        Self {
            document,
            entity,
            running: true,
        }
    }

    pub fn entity(&self) -> Uid {
        self.entity
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn finish(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.document.mark_changed(self.entity);
        self.document.end_config();
    }
}

impl Deref for ConfigTransaction<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.document
    }
}

impl DerefMut for ConfigTransaction<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.document
    }
}

impl Drop for ConfigTransaction<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
