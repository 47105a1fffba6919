//! Search command implementation.

use super::{count_label, emit, record_table, Store};

/// Runs the search command.
pub fn run(store: &Store, term: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let records = store.search(term)?;
    let term = term.trim();
    emit(records.as_slice(), format, |records| {
        let summary = if term.is_empty() {
            count_label(records.len(), "result")
        } else {
            format!("{} for '{term}'", count_label(records.len(), "result"))
        };
        if records.is_empty() {
            summary
        } else {
            format!("{}\n\n{summary}", record_table(records))
        }
    })
}
