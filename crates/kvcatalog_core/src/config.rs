//! Catalog configuration.

/// Default prefix for record and counter keys.
pub const DEFAULT_KEY_PREFIX: &str = "book:";

/// Configuration for a catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix shared by record keys (`<prefix><id>`) and the counter key
    /// (`<prefix>next_id`).
    pub key_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key prefix.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.key_prefix, "book:");
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().key_prefix("libro:");
        assert_eq!(config.key_prefix, "libro:");
    }
}
