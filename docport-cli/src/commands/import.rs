//! Import command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use docport::{backend::StoreBackend, store::DocumentStore, tree::TreeFormat};

/// Run the import command.
pub async fn run_import<B: StoreBackend>(
    store: &DocumentStore<B>,
    file: &Path,
    format: TreeFormat,
) -> Result<()> {
    tracing::info!("Importing {} in {} format", file.display(), format);

    let summary = store
        .import_file(file, format)
        .await
        .with_context(|| format!("Failed to import {}", file.display()))?;

    tracing::info!(
        collections = summary.collections,
        documents = summary.documents,
        "Import complete"
    );

    Ok(())
}
