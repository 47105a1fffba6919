//! Delete command implementation.

use super::Store;
use kvcatalog_core::RecordId;

/// Runs the delete command.
pub fn run(store: &Store, id: RecordId) -> Result<(), Box<dyn std::error::Error>> {
    store.delete(id)?;
    println!("Deleted record {id}");
    Ok(())
}
