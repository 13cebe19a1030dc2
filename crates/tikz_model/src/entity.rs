//! Core entity trait and types

use crate::Uid;
use serde::{Deserialize, Serialize};

/// Enumeration of all uniquely addressable things in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Document,
    Style,
    Node,
    Path,
}

/// Common interface for document entities
pub trait Entity: std::fmt::Debug {
    /// Get the unique ID of this entity
    fn uid(&self) -> Uid;

    /// Get the type of this entity
    fn entity_type(&self) -> EntityType;
}
