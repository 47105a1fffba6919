//! List command implementation.

use super::{count_label, emit, record_table, Store};

/// Runs the list command.
pub fn run(store: &Store, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let records = store.list_all()?;
    emit(records.as_slice(), format, |records| {
        if records.is_empty() {
            "No records in the catalog".to_string()
        } else {
            format!(
                "{}\n\n{}",
                record_table(records),
                count_label(records.len(), "record")
            )
        }
    })
}
