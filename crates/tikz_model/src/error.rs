//! Error types for document model operations

use crate::{PathKind, StyleKind, StyleProperty, Uid};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(Uid),

    #[error("Path not found: {0}")]
    PathNotFound(Uid),

    #[error("Style not found: {0}")]
    StyleNotFound(Uid),

    #[error("Id {0} is already in use")]
    DuplicateId(i64),

    #[error("Id {0} is reserved")]
    ReservedId(i64),

    #[error("Uid {0} belongs to a different document")]
    ForeignDocument(Uid),

    #[error("Setting parent of style {style} to {parent} would create a cycle")]
    CyclicStyleParent { style: Uid, parent: Uid },

    #[error("Property {property} does not apply to {kind:?} styles")]
    PropertyNotApplicable {
        property: StyleProperty,
        kind: StyleKind,
    },

    #[error("Path kind {kind:?} has no {endpoint} position")]
    InvalidEndpoint { kind: PathKind, endpoint: &'static str },

    #[error("Cannot {0} while a transaction is open")]
    TransactionOpen(&'static str),

    #[error("Nothing to undo")]
    UndoStackEmpty,

    #[error("Nothing to redo")]
    RedoStackEmpty,

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
