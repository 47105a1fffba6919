//! Edit command implementation.

use super::{emit, record_block, CliError, Store};
use kvcatalog_core::{Record, RecordId, RecordPatch};

/// Runs the edit command.
pub fn run(
    store: &Store,
    id: RecordId,
    patch: RecordPatch,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = edit(store, id, patch)?;
    emit(&record, format, |r| format!("Updated record {}\n{}", r.id, record_block(r)))
}

/// Merges `patch` into the current record and writes the result back.
pub fn edit(
    store: &Store,
    id: RecordId,
    patch: RecordPatch,
) -> Result<Record, Box<dyn std::error::Error>> {
    if patch.is_empty() {
        return Err(CliError::EmptyEdit.into());
    }

    let current = store.read(id)?;
    let draft = patch.apply(&current);
    draft.validate()?;
    Ok(store.update(id, draft)?)
}
