//! Connection settings for networked backends.

use std::time::Duration;

/// Environment variable naming the backend host.
pub const ENV_HOST: &str = "KEYDB_HOST";
/// Environment variable naming the backend port.
pub const ENV_PORT: &str = "KEYDB_PORT";
/// Environment variable holding the backend password.
pub const ENV_PASSWORD: &str = "KEYDB_PASSWORD";

/// Configuration for connecting to a Redis-compatible server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Optional password for `AUTH`.
    pub password: Option<String>,
    /// Logical database index.
    pub database: i64,
    /// Socket timeout for connecting, reading and writing.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: None,
            database: 0,
            timeout: Duration::from_secs(5),
        }
    }
}

impl BackendConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `KEYDB_HOST`, `KEYDB_PORT` and
    /// `KEYDB_PASSWORD`, falling back to defaults for unset variables.
    ///
    /// An unparsable port is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(%port, "ignoring invalid {ENV_PORT}"),
            }
        }

        config.password = lookup(ENV_PASSWORD).filter(|p| !p.is_empty());
        config
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the logical database index.
    #[must_use]
    pub const fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    /// Sets the socket timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Renders the configuration as a `redis://` connection URL.
    #[must_use]
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.database
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.database),
        }
    }

    /// Host and port, without credentials, for log output.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
