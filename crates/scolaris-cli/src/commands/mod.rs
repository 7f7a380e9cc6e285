//! CLI subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};

use scolaris_core::store::{MemoryStore, Snapshot};

pub mod board;
pub mod import;
pub mod recommend;
pub mod schedule;
pub mod transcript;
pub mod validate;

/// Load the school data file into an in-memory store.
pub(crate) fn load_store(path: &Path) -> Result<MemoryStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read school data: {}", path.display()))?;
    let snapshot: Snapshot =
        serde_json::from_str(&content).context("failed to parse school data")?;
    Ok(MemoryStore::from_snapshot(snapshot))
}

/// Write the store back to the school data file.
pub(crate) fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.snapshot())
        .context("failed to serialize school data")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write school data: {}", path.display()))?;
    Ok(())
}
