//! JSON fixture IO.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use reelfeed_model::{InteractionState, VideoRecord};
use serde::de::DeserializeOwned;
use tracing::warn;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid {what} json in {}", path.display()))
}

/// Load a video pool. Records that can neither play nor redirect are
/// dropped with a warning.
pub fn load_pool(path: &Path) -> Result<Vec<VideoRecord>> {
    let records: Vec<VideoRecord> = read_json(path, "video pool")?;
    let total = records.len();
    let pool: Vec<VideoRecord> = records
        .into_iter()
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %record.id, error = %err, "dropping unusable record");
                false
            }
        })
        .collect();
    if total > 0 && pool.is_empty() {
        bail!("no usable records in {}", path.display());
    }
    Ok(pool)
}

pub fn load_interactions(path: Option<&Path>) -> Result<InteractionState> {
    match path {
        Some(path) => read_json(path, "interaction state"),
        None => Ok(InteractionState::default()),
    }
}
