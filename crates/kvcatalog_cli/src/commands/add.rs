//! Add command implementation.

use super::{emit, record_block, Store};
use kvcatalog_core::{Record, RecordDraft, Status};

/// Runs the add command.
pub fn run(
    store: &Store,
    title: String,
    author: String,
    genre: String,
    status: Status,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = add(store, RecordDraft::new(title, author, genre, status))?;
    emit(&record, format, |r| format!("Added record {}\n{}", r.id, record_block(r)))
}

/// Validates `draft` and creates it.
pub fn add(store: &Store, draft: RecordDraft) -> Result<Record, Box<dyn std::error::Error>> {
    draft.validate()?;
    Ok(store.create(draft)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::memory_store;

    #[test]
    fn add_assigns_next_id() {
        let store = memory_store();
        let dune = RecordDraft::new("Dune", "Herbert", "Sci-Fi", Status::Pending);
        let emma = RecordDraft::new("Emma", "Austen", "Romance", Status::Read);
        let first = add(&store, dune).unwrap();
        let second = add(&store, emma).unwrap();
        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
    }

    #[test]
    fn blank_fields_are_rejected_before_any_write() {
        let store = memory_store();
        let draft = RecordDraft::new("Dune", "  ", "Sci-Fi", Status::Pending);
        let err = add(&store, draft).unwrap_err();
        assert!(err.to_string().contains("author"));
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(store.next_id().unwrap().get(), 1);
    }
}
