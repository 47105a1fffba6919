//! Key-value backend trait definition.

use crate::error::BackendResult;
use std::sync::Arc;

/// A key-value backend for the catalog.
///
/// Backends are **opaque text stores** with the command surface of a
/// Redis-style server. The catalog owns all interpretation of keys and
/// values - backends do not understand records or identifier sequences.
///
/// # Invariants
///
/// - `get` returns exactly the value most recently passed to `set`
/// - `del` reports whether a key was actually removed
/// - `incr` is atomic and treats a missing key as `0`
/// - `keys` gives no ordering guarantee
/// - `mget` answers positionally, with `None` for missing keys
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For a local persistent catalog
pub trait KvBackend: Send + Sync {
    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn ping(&self) -> BackendResult<()>;

    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get(&self, key: &str) -> BackendResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn set(&self, key: &str, value: &str) -> BackendResult<()>;

    /// Removes `key`. Returns `true` if the key existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn del(&self, key: &str) -> BackendResult<bool>;

    /// Atomically increments the integer stored under `key` and returns the
    /// new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the stored value is not an
    /// integer.
    fn incr(&self, key: &str) -> BackendResult<i64>;

    /// Returns every key matching a glob-style `pattern`, in no particular
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>>;

    /// Fetches several keys at once. The result has one entry per key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>>;
}

impl<B: KvBackend + ?Sized> KvBackend for Arc<B> {
    fn ping(&self) -> BackendResult<()> {
        (**self).ping()
    }

    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        (**self).set(key, value)
    }

    fn del(&self, key: &str) -> BackendResult<bool> {
        (**self).del(key)
    }

    fn incr(&self, key: &str) -> BackendResult<i64> {
        (**self).incr(key)
    }

    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>> {
        (**self).keys(pattern)
    }

    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>> {
        (**self).mget(keys)
    }
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn ping(&self) -> BackendResult<()> {
        (**self).ping()
    }

    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        (**self).set(key, value)
    }

    fn del(&self, key: &str) -> BackendResult<bool> {
        (**self).del(key)
    }

    fn incr(&self, key: &str) -> BackendResult<i64> {
        (**self).incr(key)
    }

    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>> {
        (**self).keys(pattern)
    }

    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>> {
        (**self).mget(keys)
    }
}
