//! Export command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use docport::{backend::StoreBackend, store::DocumentStore, tree::TreeFormat};

/// Run the export command.
pub async fn run_export<B: StoreBackend>(
    store: &DocumentStore<B>,
    collection: &str,
    output: &Path,
    format: TreeFormat,
) -> Result<()> {
    tracing::info!("Exporting collection '{}' in {} format", collection, format);

    let documents = store
        .export_to_file(collection, output, format)
        .await
        .with_context(|| format!("Failed to export collection '{collection}'"))?;

    tracing::info!(documents, "Export complete: {}", output.display());

    Ok(())
}
