//! poems.json の読み込み

use crate::error::{ArchiveError, Result};
use poetry_archive_common::RawCollection;
use std::path::Path;

pub fn load_poems(path: &Path) -> Result<RawCollection> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let collection: RawCollection = serde_json::from_str(&content)?;

    tracing::debug!(
        path = %path.display(),
        groups = collection.groups.len(),
        poems = collection.poem_count(),
        "loaded poems"
    );

    Ok(collection)
}
