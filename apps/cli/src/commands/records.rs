use dnabar_store::RecordStore;

use crate::dto::RecordRow;
use crate::error::CommandError;

/// Saved barcodes, newest first, optionally capped at `limit`
pub fn list(store: &RecordStore, limit: Option<usize>) -> Result<Vec<RecordRow>, CommandError> {
    let listed = store.list_recent()?;
    let take = limit.unwrap_or(listed.len());
    Ok(listed.iter().take(take).map(RecordRow::from).collect())
}
