//! Networked backend speaking to a Redis-compatible server (Redis, KeyDB).

use crate::backend::KvBackend;
use crate::config::BackendConfig;
use crate::error::{BackendError, BackendResult};
use parking_lot::Mutex;
use redis::{Client, Connection, FromRedisValue, RedisError};

/// A backend backed by a single blocking connection to a Redis-compatible
/// server.
///
/// The connection is opened lazily on first use and dropped whenever a
/// request fails at the connection level, so the next request dials again.
/// There is no retry within a request.
///
/// # Thread Safety
///
/// Requests are serialized through one connection guarded by a mutex.
pub struct RedisBackend {
    client: Client,
    config: BackendConfig,
    connection: Mutex<Option<Connection>>,
}

impl RedisBackend {
    /// Creates a backend for the given configuration without connecting.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not form a valid
    /// connection URL.
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let client = Client::open(config.url())
            .map_err(|e| BackendError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            client,
            config,
            connection: Mutex::new(None),
        })
    }

    /// Creates a backend from a `redis://` URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the URL cannot be parsed.
    pub fn from_url(url: &str) -> BackendResult<Self> {
        let client =
            Client::open(url).map_err(|e| BackendError::InvalidConfig(e.to_string()))?;
        let info = client.get_connection_info();
        let config = BackendConfig {
            host: match &info.addr {
                redis::ConnectionAddr::Tcp(host, _) => host.clone(),
                other => other.to_string(),
            },
            port: match &info.addr {
                redis::ConnectionAddr::Tcp(_, port) => *port,
                _ => 0,
            },
            password: info.redis.password.clone(),
            database: info.redis.db,
            ..BackendConfig::default()
        };
        Ok(Self {
            client,
            config,
            connection: Mutex::new(None),
        })
    }

    /// Returns the configuration this backend was built from.
    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn connect(&self) -> BackendResult<Connection> {
        tracing::debug!(endpoint = %self.config.endpoint(), "connecting to key-value server");
        let connection = self
            .client
            .get_connection_with_timeout(self.config.timeout)
            .map_err(map_error)?;
        connection
            .set_read_timeout(Some(self.config.timeout))
            .map_err(map_error)?;
        connection
            .set_write_timeout(Some(self.config.timeout))
            .map_err(map_error)?;
        Ok(connection)
    }

    /// Runs one command on the shared connection, dialing first if needed.
    fn query<T: FromRedisValue>(&self, command: &redis::Cmd) -> BackendResult<T> {
        let mut guard = self.connection.lock();
        if guard.is_none() {
            *guard = Some(self.connect()?);
        }

        let Some(connection) = guard.as_mut() else {
            return Err(BackendError::connection("no connection"));
        };

        match command.query::<T>(connection) {
            Ok(value) => Ok(value),
            Err(err) => {
                let err = map_error(err);
                if err.is_connectivity() {
                    *guard = None;
                }
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("endpoint", &self.config.endpoint())
            .field("connected", &self.connection.lock().is_some())
            .finish_non_exhaustive()
    }
}

fn map_error(err: RedisError) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        BackendError::Connection(err.to_string())
    } else {
        BackendError::Protocol(err.to_string())
    }
}

impl KvBackend for RedisBackend {
    fn ping(&self) -> BackendResult<()> {
        let reply: String = self.query(&redis::cmd("PING"))?;
        if reply.eq_ignore_ascii_case("PONG") {
            Ok(())
        } else {
            Err(BackendError::protocol(format!("unexpected PING reply: {reply}")))
        }
    }

    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        self.query(redis::cmd("GET").arg(key))
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.query(redis::cmd("SET").arg(key).arg(value))
    }

    fn del(&self, key: &str) -> BackendResult<bool> {
        let removed: i64 = self.query(redis::cmd("DEL").arg(key))?;
        Ok(removed > 0)
    }

    fn incr(&self, key: &str) -> BackendResult<i64> {
        self.query(redis::cmd("INCR").arg(key))
    }

    fn keys(&self, pattern: &str) -> BackendResult<Vec<String>> {
        self.query(redis::cmd("KEYS").arg(pattern))
    }

    fn mget(&self, keys: &[String]) -> BackendResult<Vec<Option<String>>> {
        // MGET with no arguments is a server error
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.query(redis::cmd("MGET").arg(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_does_not_connect() {
        let backend = RedisBackend::new(BackendConfig::new().with_port(1)).unwrap();
        assert_eq!(backend.config().port, 1);
        assert!(format!("{backend:?}").contains("connected: false"));
    }

    #[test]
    fn from_url_parses_endpoint() {
        let backend = RedisBackend::from_url("redis://:pw@127.0.0.1:6390/3").unwrap();
        assert_eq!(backend.config().host, "127.0.0.1");
        assert_eq!(backend.config().port, 6390);
        assert_eq!(backend.config().database, 3);
        assert_eq!(backend.config().password.as_deref(), Some("pw"));
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(matches!(
            RedisBackend::from_url("not a url"),
            Err(BackendError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unreachable_server_is_a_connectivity_error() {
        // Port 1 on loopback is never a Redis server
        let config = BackendConfig::new()
            .with_host("127.0.0.1")
            .with_port(1)
            .with_timeout(Duration::from_millis(200));
        let backend = RedisBackend::new(config).unwrap();

        let err = backend.ping().unwrap_err();
        assert!(err.is_connectivity(), "unexpected error: {err}");
    }
}
