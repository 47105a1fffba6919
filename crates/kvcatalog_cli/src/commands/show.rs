//! Show command implementation.

use super::{emit, record_block, Store};
use kvcatalog_core::RecordId;

/// Runs the show command.
pub fn run(store: &Store, id: RecordId, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let record = store.read(id)?;
    emit(&record, format, record_block)
}
