//! File I/O operations

use crate::{deserialize, serialize, tikz_code, ExportSettings, Result, StoreError};
use std::path::Path;
use tikz_model::Document;

fn check_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Save a document to a file
pub async fn save_document(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = serialize(document)?;
    tokio::fs::write(path.as_ref(), json).await?;
    tracing::debug!(path = %path.as_ref().display(), "document saved");
    Ok(())
}

/// Load a document from a file, replacing its current contents. The
/// document is cleared first, so it stays empty if the file is missing or
/// unreadable.
pub async fn load_document(document: &mut Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    document.clear();
    check_exists(path)?;
    let json = tokio::fs::read_to_string(path).await?;
    deserialize(&json, document)?;
    tracing::debug!(path = %path.display(), nodes = document.node_count(), "document loaded");
    Ok(())
}

pub fn save_document_sync(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = serialize(document)?;
    std::fs::write(path.as_ref(), json)?;
    tracing::debug!(path = %path.as_ref().display(), "document saved");
    Ok(())
}

pub fn load_document_sync(document: &mut Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    document.clear();
    check_exists(path)?;
    let json = std::fs::read_to_string(path)?;
    deserialize(&json, document)?;
    tracing::debug!(path = %path.display(), nodes = document.node_count(), "document loaded");
    Ok(())
}

/// Persistence and export entry points on [`Document`]
pub trait DocumentIo {
    /// Replace the contents with a saved file. A failed load leaves the
    /// document empty.
    fn load(&mut self, path: impl AsRef<Path>) -> Result<()>;

    fn save(&self, path: impl AsRef<Path>) -> Result<()>;

    /// TikZ picture for the current contents
    fn tikz_code(&self, settings: &ExportSettings) -> String;
}

impl DocumentIo for Document {
    fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        load_document_sync(self, path)
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_document_sync(self, path)
    }

    fn tikz_code(&self, settings: &ExportSettings) -> String {
        tikz_code(self, settings)
    }
}
