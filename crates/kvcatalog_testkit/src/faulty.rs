//! Fault-injecting backend.
//!
//! Wraps another backend, counts every request, and can be told to fail
//! all requests (an outage) or only specific commands.

use kvcatalog_backend::{BackendError, BackendResult, InMemoryBackend, KvBackend};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A backend command, for targeted fault injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `PING`
    Ping,
    /// `GET`
    Get,
    /// `SET`
    Set,
    /// `DEL`
    Del,
    /// `INCR`
    Incr,
    /// `KEYS`
    Keys,
    /// `MGET`
    Mget,
}

/// A backend wrapper that counts requests and injects failures.
#[derive(Debug, Default)]
pub struct FaultyBackend<B = InMemoryBackend> {
    inner: B,
    calls: AtomicUsize,
    per_command: Mutex<HashMap<Command, usize>>,
    down: AtomicBool,
    failing: Mutex<HashSet<Command>>,
}

impl FaultyBackend<InMemoryBackend> {
    /// Creates a healthy wrapper around a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }
}

impl<B: KvBackend> FaultyBackend<B> {
    /// Creates a healthy wrapper around `inner`.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            per_command: Mutex::new(HashMap::new()),
            down: AtomicBool::new(false),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Returns the wrapped backend, bypassing counting and faults.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Simulates an outage (`true`) or recovery (`false`).
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Makes every future `command` fail until [`FaultyBackend::heal`].
    pub fn fail_command(&self, command: Command) {
        self.failing.lock().insert(command);
    }

    /// Clears the outage and all targeted failures.
    pub fn heal(&self) {
        self.set_down(false);
        self.failing.lock().clear();
    }

    /// Total requests received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received for one command.
    pub fn calls_to(&self, command: Command) -> usize {
        self.per_command.lock().get(&command).copied().unwrap_or(0)
    }

    /// Resets all counters.
    pub fn reset_counts(&self) {
        self.calls.store(0, Ordering::SeqCst);
        self.per_command.lock().clear();
    }

    fn attempt(&self, command: Command) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.per_command.lock().entry(command).or_insert(0) += 1;

        if self.down.load(Ordering::SeqCst) {
            return Err(BackendError::connection("injected outage"));
        }
        if self.failing.lock().contains(&command) {
            return Err(BackendError::connection(format!("injected {command:?} failure")));
        }
        Ok(())
    }
}

impl<B: KvBackend> KvBackend for FaultyBackend<B> {
    fn ping(&self) -> BackendResult<()> {
        self.attempt(Command::Ping)?;
        self.inner.ping()
    }

    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        self.attempt(Command::Get)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.attempt(Command::Set)?;
        self.inner.set(key, value)
    }

    fn del(&self, key: &str) -> BackendResult<bool> {
        self.attempt(Command::Del)?;
        self.inner.del(key)
    }

    fn incr(&self, key: &str) -> BackendResult<i64> {
        self.attempt(Command::Incr)?;
        self.inner.incr(key)
    }

    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>> {
        self.attempt(Command::Keys)?;
        self.inner.keys(pattern)
    }

    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>> {
        self.attempt(Command::Mget)?;
        self.inner.mget(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_request() {
        let backend = FaultyBackend::in_memory();
        backend.set("a", "1").unwrap();
        backend.get("a").unwrap();
        backend.get("b").unwrap();

        assert_eq!(backend.call_count(), 3);
        assert_eq!(backend.calls_to(Command::Get), 2);
        assert_eq!(backend.calls_to(Command::Del), 0);

        backend.reset_counts();
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn outage_fails_and_still_counts() {
        let backend = FaultyBackend::in_memory();
        backend.set_down(true);

        let err = backend.ping().unwrap_err();
        assert!(err.is_connectivity());
        assert_eq!(backend.call_count(), 1);

        backend.heal();
        assert!(backend.ping().is_ok());
    }

    #[test]
    fn targeted_failure() {
        let backend = FaultyBackend::in_memory();
        backend.fail_command(Command::Set);

        assert!(backend.set("a", "1").is_err());
        assert!(backend.incr("n").is_ok());
        assert_eq!(backend.inner().get("a").unwrap(), None);
    }
}
