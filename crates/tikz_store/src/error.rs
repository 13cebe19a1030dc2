//! Error types for storage operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document model error: {0}")]
    Model(#[from] tikz_model::ModelError),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Id list names {entity} {id} but the file has no record for it")]
    MissingRecord { entity: &'static str, id: i64 },

    #[error("Path {path} has no {endpoint} position")]
    MissingEndpoint { path: i64, endpoint: &'static str },

    #[error("Style of {style} names invalid parent {parent}")]
    InvalidParent { style: i64, parent: i64 },

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
