//! In-memory key-value backend for testing.

use crate::backend::KvBackend;
use crate::error::{BackendError, BackendResult};
use crate::pattern::glob_match;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory key-value backend.
///
/// This backend keeps all keys in a hash map and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral catalogs that don't need persistence
///
/// Like a real server, `keys` returns matches in hash order, not
/// insertion or lexical order.
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use kvcatalog_backend::{KvBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.set("book:1", "{}").unwrap();
/// assert_eq!(backend.keys("book:*").unwrap(), vec!["book:1".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with pre-existing entries.
    ///
    /// Useful for seeding hand-written keys in tests.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().clone()
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

    /// Removes every key.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Applies `INCR` semantics to a map entry.
pub(crate) fn incr_entry(
    entries: &mut HashMap<String, String>,
    key: &str,
) -> BackendResult<i64> {
    let current = match entries.get(key) {
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| BackendError::protocol("value is not an integer or out of range"))?,
        None => 0,
    };
    let next = current
        .checked_add(1)
        .ok_or_else(|| BackendError::protocol("increment or decrement would overflow"))?;
    entries.insert(key.to_string(), next.to_string());
    Ok(next)
}

pub(crate) fn matching_keys(entries: &HashMap<String, String>, pattern: &str) -> Vec<String> {
    entries
        .keys()
        .filter(|key| glob_match(pattern, key))
        .cloned()
        .collect()
}

impl KvBackend for InMemoryBackend {
    fn ping(&self) -> BackendResult<()> {
        Ok(())
    }

    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn del(&self, key: &str) -> BackendResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn incr(&self, key: &str) -> BackendResult<i64> {
        incr_entry(&mut self.entries.write(), key)
    }

    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>> {
        Ok(matching_keys(&self.entries.read(), pattern))
    }

    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>> {
        let entries = self.entries.read();
        Ok(keys.iter().map(|key| entries.get(key).cloned()).collect())
    }
}
