//! Test fixtures and catalog helpers.
//!
//! Provides convenience functions for setting up test catalogs
//! and common test scenarios.

use crate::faulty::FaultyBackend;
use kvcatalog_backend::{FileBackend, InMemoryBackend};
use kvcatalog_core::{CatalogStore, Config, RecordDraft, Status};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A catalog over a shared fault-injecting in-memory backend.
pub type FaultyStore = CatalogStore<Arc<FaultyBackend>>;

/// Creates a connected catalog over a fresh in-memory backend.
pub fn memory_store() -> CatalogStore<InMemoryBackend> {
    CatalogStore::connect(InMemoryBackend::new(), Config::default())
}

/// Creates a connected catalog whose backend the test can still reach.
pub fn faulty_store() -> (Arc<FaultyBackend>, FaultyStore) {
    let backend = Arc::new(FaultyBackend::in_memory());
    let store = CatalogStore::connect(Arc::clone(&backend), Config::default());
    (backend, store)
}

/// Creates a catalog whose backend was down during the startup probe.
///
/// The backend is healed again before returning, so any request the store
/// still makes would succeed and be counted.
pub fn degraded_store() -> (Arc<FaultyBackend>, FaultyStore) {
    let backend = Arc::new(FaultyBackend::in_memory());
    backend.set_down(true);
    let store = CatalogStore::connect(Arc::clone(&backend), Config::default());
    backend.heal();
    (backend, store)
}

/// A temporary directory holding a file-backed catalog.
///
/// Each call to [`TempFileCatalog::open`] opens a new store over the same
/// file, which simulates a process restart once the previous store is
/// dropped.
pub struct TempFileCatalog {
    dir: TempDir,
}

impl TempFileCatalog {
    /// Creates an empty temporary directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Path of the catalog data file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("catalog.json")
    }

    /// Opens a store over the data file.
    pub fn open(&self) -> CatalogStore<FileBackend> {
        let backend = FileBackend::open(&self.path()).expect("Failed to open file backend");
        CatalogStore::connect(backend, Config::default())
    }

    /// Directory holding the data file.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TempFileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use kvcatalog_backend::KvBackend;
    use kvcatalog_core::{KeyLayout, Record, RecordId};

    /// A handful of well-known books with mixed statuses.
    pub fn sample_drafts() -> Vec<RecordDraft> {
        vec![
            RecordDraft::new("Dune", "Frank Herbert", "Sci-Fi", Status::Pending),
            RecordDraft::new("Emma", "Jane Austen", "Romance", Status::Read),
            RecordDraft::new("Neuromancer", "William Gibson", "Sci-Fi", Status::InProgress),
            RecordDraft::new("Persuasion", "Jane Austen", "Romance", Status::Pending),
            RecordDraft::new("The Hobbit", "J. R. R. Tolkien", "Fantasy", Status::Read),
        ]
    }

    /// Creates every sample draft through the store.
    pub fn populated_store() -> CatalogStore<InMemoryBackend> {
        let store = memory_store();
        for draft in sample_drafts() {
            store.create(draft).expect("Failed to create sample record");
        }
        store
    }

    /// Writes records straight into `backend` under the given ids, in the
    /// given order, bypassing the store and its sequence.
    pub fn seed_records<B: KvBackend>(backend: &B, prefix: &str, ids: &[u64]) -> Vec<Record> {
        let keys = KeyLayout::new(prefix);
        ids.iter()
            .map(|&n| {
                let id = RecordId::new(n).expect("seed ids must be positive");
                let record = Record::from_draft(
                    id,
                    RecordDraft::new(format!("Title {n}"), "Seed", "Seeded", Status::Pending),
                );
                let payload = serde_json::to_string(&record).expect("Failed to encode seed");
                backend
                    .set(&keys.record_key(id), &payload)
                    .expect("Failed to seed record");
                record
            })
            .collect()
    }
}
