//! Plain-text corpus loader

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Document;

/// Read a UTF-8 text file as a single document
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let source = path.display().to_string();

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::corpus(source.clone(), e.to_string()))?;

    tracing::info!("Loaded corpus {} ({} bytes)", source, content.len());

    Ok(Document::new(source, content))
}
