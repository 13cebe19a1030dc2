//! Document-scoped entity identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one live document instance.
/// Every `Document::new()` and every `clear()` gets a fresh one, so uids
/// handed out before a clear no longer resolve afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of an entity inside one document.
///
/// A `Uid` is a plain value: it stays meaningful across undo/redo, which may
/// destroy and recreate the entity it names. Always resolve it through the
/// owning [`Document`](crate::Document) before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uid {
    id: i64,
    document: DocumentId,
}

impl Uid {
    /// Sentinel id meaning "no entity"
    pub const INVALID_ID: i64 = -1;

    /// Id reserved for the document's default style
    pub const DOCUMENT_STYLE_ID: i64 = 0;

    pub fn new(id: i64, document: DocumentId) -> Self {
        Self { id, document }
    }

    /// A uid that never resolves to an entity
    pub fn invalid(document: DocumentId) -> Self {
        Self::new(Self::INVALID_ID, document)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// Whether the id can name an entity at all. Liveness is checked by
    /// the document.
    pub fn is_valid(&self) -> bool {
        self.id >= 0
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
