//! Catalog store for CRUD, listing and search.

use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};
use crate::keys::KeyLayout;
use crate::record::{self, Record, RecordDraft, RecordId};
use kvcatalog_backend::KvBackend;
use parking_lot::RwLock;

/// Whether the store will talk to its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The liveness probe succeeded; operations reach the backend.
    Connected,
    /// The liveness probe failed; operations fail fast without a request.
    Degraded,
}

/// Record-oriented operations over a key-value backend.
///
/// The store keeps no cache: every read is a live backend fetch, and
/// records are only held for the duration of a call. There is no locking
/// or transaction around writes; concurrent writers to the same id race and
/// the last `SET` wins.
///
/// # Connection state
///
/// [`CatalogStore::connect`] probes the backend once. If the probe fails
/// the store is [`ConnectionState::Degraded`] and every operation returns
/// [`CatalogError::BackendUnavailable`] without issuing a request, until
/// [`CatalogStore::reconnect`] succeeds. A request that fails while
/// connected only fails that call.
pub struct CatalogStore<B> {
    backend: B,
    config: Config,
    keys: KeyLayout,
    state: RwLock<ConnectionState>,
}

impl<B: KvBackend> CatalogStore<B> {
    /// Creates a store over `backend`, probing it for liveness.
    ///
    /// This never fails; an unreachable backend yields a degraded store.
    pub fn connect(backend: B, config: Config) -> Self {
        let state = probe(&backend);
        let keys = KeyLayout::new(config.key_prefix.clone());
        tracing::info!(prefix = %keys.prefix(), ?state, "catalog store ready");
        Self {
            backend,
            config,
            keys,
            state: RwLock::new(state),
        }
    }

    /// Re-runs the liveness probe and returns the resulting state.
    pub fn reconnect(&self) -> ConnectionState {
        let state = probe(&self.backend);
        *self.state.write() = state;
        state
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the key layout.
    pub fn keys(&self) -> &KeyLayout {
        &self.keys
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn backend_if_connected(&self) -> CatalogResult<&B> {
        match self.state() {
            ConnectionState::Connected => Ok(&self.backend),
            ConnectionState::Degraded => Err(CatalogError::backend_unavailable(
                "store is degraded: backend failed its liveness check",
            )),
        }
    }

    /// Checks that the backend still answers.
    ///
    /// Unlike [`CatalogStore::reconnect`] this leaves the connection state
    /// alone, and a degraded store fails without issuing the probe.
    ///
    /// # Errors
    ///
    /// `BackendUnavailable` if degraded or if the probe fails.
    pub fn ping(&self) -> CatalogResult<()> {
        self.backend_if_connected()?.ping()?;
        Ok(())
    }

    /// Draws the next identifier from the persisted sequence.
    ///
    /// # Errors
    ///
    /// `BackendUnavailable` if the counter cannot be advanced, `Malformed`
    /// if the counter produced a non-positive value.
    pub fn next_id(&self) -> CatalogResult<RecordId> {
        let backend = self.backend_if_connected()?;
        let counter = self.keys.counter_key();
        let value = backend.incr(&counter)?;
        RecordId::try_from(value).map_err(|_| {
            CatalogError::malformed(counter, format!("sequence produced {value}"))
        })
    }

    /// Creates a record and returns it as stored.
    ///
    /// The sequence is advanced before the record is written and is not
    /// rolled back if the write fails, so a failed create leaves a gap.
    ///
    /// # Errors
    ///
    /// `BackendUnavailable` if either backend request fails.
    pub fn create(&self, draft: RecordDraft) -> CatalogResult<Record> {
        let id = self.next_id()?;
        let record = Record::from_draft(id, draft);
        let key = self.keys.record_key(id);

        self.backend_if_connected()?
            .set(&key, &record::encode(&record)?)
            .map_err(|e| {
                tracing::warn!(%id, error = %e, "record write failed after id was drawn");
                CatalogError::from(e)
            })?;

        tracing::debug!(%id, "created record");
        Ok(record)
    }

    /// Reads the record with `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such record exists, `Malformed` if the stored value
    /// does not decode, `BackendUnavailable` on backend failure.
    pub fn read(&self, id: RecordId) -> CatalogResult<Record> {
        let key = self.keys.record_key(id);
        match self.backend_if_connected()?.get(&key)? {
            Some(payload) => record::decode(&key, id, &payload),
            None => {
                tracing::debug!(%id, "record not found");
                Err(CatalogError::NotFound { id })
            }
        }
    }

    /// Replaces the four mutable fields of the record with `id`.
    ///
    /// The id and any extension fields are kept.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such record exists, `Malformed` if the stored value
    /// does not decode, `BackendUnavailable` on backend failure.
    pub fn update(&self, id: RecordId, draft: RecordDraft) -> CatalogResult<Record> {
        let mut record = self.read(id)?;
        record.apply(draft);

        let key = self.keys.record_key(id);
        self.backend_if_connected()?
            .set(&key, &record::encode(&record)?)?;

        tracing::debug!(%id, "updated record");
        Ok(record)
    }

    /// Deletes the record with `id`. The id is never reissued.
    ///
    /// # Errors
    ///
    /// `NotFound` if there was nothing to delete (including a second delete
    /// of the same id), `BackendUnavailable` on backend failure.
    pub fn delete(&self, id: RecordId) -> CatalogResult<()> {
        let key = self.keys.record_key(id);
        if self.backend_if_connected()?.del(&key)? {
            tracing::debug!(%id, "deleted record");
            Ok(())
        } else {
            tracing::debug!(%id, "delete of missing record");
            Err(CatalogError::NotFound { id })
        }
    }

    /// Returns every record, ordered by ascending id.
    ///
    /// Keys are enumerated and then fetched in a second request; the two are
    /// not atomic. Keys that vanish in between, and values that fail to
    /// decode, are skipped with a warning rather than failing the listing.
    ///
    /// # Errors
    ///
    /// `BackendUnavailable` if either request fails.
    pub fn list_all(&self) -> CatalogResult<Vec<Record>> {
        let backend = self.backend_if_connected()?;
        let ids_and_keys = self.record_keys(backend)?;
        if ids_and_keys.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids_and_keys.iter().map(|(_, key)| key.clone()).collect();
        let payloads = backend.mget(&keys)?;

        let mut records: Vec<Record> = ids_and_keys
            .into_iter()
            .zip(payloads)
            .filter_map(|((id, key), payload)| {
                let Some(payload) = payload else {
                    tracing::debug!(%key, "key vanished between enumeration and fetch");
                    return None;
                };
                match record::decode(&key, id, &payload) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        tracing::warn!(%key, error = %err, "skipping malformed record");
                        None
                    }
                }
            })
            .collect();

        // Key enumeration order is unspecified
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    /// Returns the records whose title, author or genre contains `term`,
    /// ignoring case, ordered by ascending id.
    ///
    /// A blank term returns every record. This is a full scan of
    /// [`CatalogStore::list_all`] with no index.
    ///
    /// # Errors
    ///
    /// `BackendUnavailable` on backend failure.
    pub fn search(&self, term: &str) -> CatalogResult<Vec<Record>> {
        let needle = term.trim().to_lowercase();
        let records = self.list_all()?;
        if needle.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|record| record.matches(&needle))
            .collect())
    }

    /// Returns the number of records [`CatalogStore::list_all`] would return.
    ///
    /// Malformed and vanished values are not counted.
    ///
    /// # Errors
    ///
    /// `BackendUnavailable` on backend failure.
    pub fn count(&self) -> CatalogResult<usize> {
        Ok(self.list_all()?.len())
    }

    fn record_keys(&self, backend: &B) -> CatalogResult<Vec<(RecordId, String)>> {
        Ok(backend
            .keys(&self.keys.list_pattern())?
            .into_iter()
            .filter_map(|key| self.keys.parse_record_key(&key).map(|id| (id, key)))
            .collect())
    }
}

fn probe<B: KvBackend>(backend: &B) -> ConnectionState {
    match backend.ping() {
        Ok(()) => ConnectionState::Connected,
        Err(err) => {
            tracing::warn!(error = %err, "backend liveness check failed, entering degraded mode");
            ConnectionState::Degraded
        }
    }
}

impl<B> std::fmt::Debug for CatalogStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("prefix", &self.keys.prefix())
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
