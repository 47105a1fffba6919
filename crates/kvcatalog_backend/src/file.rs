//! File-based key-value backend for local persistent catalogs.

use crate::backend::KvBackend;
use crate::error::{BackendError, BackendResult};
use crate::memory::{incr_entry, matching_keys};
use fs2::FileExt;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A key-value backend persisted to a single JSON object file.
///
/// The whole key space is held in memory and written through to disk on
/// every mutation. Data survives process restarts, including the identifier
/// counter, so a catalog can run without a server.
///
/// # Durability
///
/// Each mutation rewrites the file with the write-then-rename pattern:
/// 1. Write the snapshot to `<file>.tmp`
/// 2. Sync the temporary file
/// 3. Rename it over the data file
///
/// # Locking
///
/// An advisory lock on `<file>.lock` is held for the lifetime of the
/// backend, so only one process can open a given file at a time.
///
/// # Example
///
/// ```no_run
/// use kvcatalog_backend::{KvBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("catalog.json")).unwrap();
/// backend.set("book:1", "{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
    _lock_file: File,
}

impl FileBackend {
    /// Opens or creates a file backend at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another process holds the lock (returns `Locked`)
    /// - The existing file is not a JSON object of strings (returns `Corrupted`)
    /// - I/O errors occur
    pub fn open(path: &Path) -> BackendResult<Self> {
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(sibling(path, "lock"))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(BackendError::Locked);
        }

        let entries = load_entries(path)?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file backend");

        Ok(Self {
            path: path.to_path_buf(),
            entries: RwLock::new(entries),
            _lock_file: lock_file,
        })
    }

    /// Opens or creates a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be opened.
    pub fn open_with_create_dirs(path: &Path) -> BackendResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Applies `change` to a copy of the map, persists the copy, and only
    /// then makes it visible. A failed write leaves the map untouched.
    fn commit<T, F>(&self, change: F) -> BackendResult<T>
    where
        F: FnOnce(&mut HashMap<String, String>) -> BackendResult<T>,
    {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        let result = change(&mut next)?;
        self.persist(&next)?;
        *entries = next;
        Ok(result)
    }

    fn persist(&self, entries: &HashMap<String, String>) -> BackendResult<()> {
        let ordered: BTreeMap<&String, &String> = entries.iter().collect();
        let data = serde_json::to_vec_pretty(&ordered)
            .map_err(|e| BackendError::corrupted(e.to_string()))?;

        let temp_path = sibling(&self.path, "tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// `catalog.json` -> `catalog.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn load_entries(path: &Path) -> BackendResult<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let data = fs::read(path)?;
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }

    serde_json::from_slice(&data).map_err(|e| {
        BackendError::corrupted(format!("{}: {}", path.display(), e))
    })
}

impl KvBackend for FileBackend {
    fn ping(&self) -> BackendResult<()> {
        if self
            .path
            .parent()
            .is_none_or(|p| p.as_os_str().is_empty() || p.is_dir())
        {
            Ok(())
        } else {
            Err(BackendError::connection(format!(
                "data directory for {} is gone",
                self.path.display()
            )))
        }
    }

    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn del(&self, key: &str) -> BackendResult<bool> {
        if !self.entries.read().contains_key(key) {
            return Ok(false);
        }
        self.commit(|entries| Ok(entries.remove(key).is_some()))
    }

    fn incr(&self, key: &str) -> BackendResult<i64> {
        self.commit(|entries| incr_entry(entries, key))
    }

    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>> {
        Ok(matching_keys(&self.entries.read(), pattern))
    }

    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>> {
        let entries = self.entries.read();
        Ok(keys.iter().map(|key| entries.get(key).cloned()).collect())
    }
}
