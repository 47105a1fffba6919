//! CLI command implementations.

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod ping;
pub mod search;
pub mod show;

use kvcatalog_backend::{BackendConfig, FileBackend, KvBackend, RedisBackend};
use kvcatalog_core::{CatalogStore, Config, ConnectionState, Record};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Store type used by every command.
pub type Store = CatalogStore<Box<dyn KvBackend>>;

/// Errors raised by the CLI itself rather than the catalog.
#[derive(Debug, Error)]
pub enum CliError {
    /// `--file` was combined with server options.
    #[error("--file cannot be combined with --url, --host, --port or --password")]
    ConflictingBackends,

    /// An edit named no field to change.
    #[error("nothing to change: pass at least one of --title, --author, --genre, --status")]
    EmptyEdit,

    /// The liveness probe failed.
    #[error("backend at {0} is unreachable")]
    Unreachable(String),
}

/// Backend selection shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct BackendArgs {
    /// Full connection URL.
    pub url: Option<String>,
    /// Host override.
    pub host: Option<String>,
    /// Port override.
    pub port: Option<u16>,
    /// Password override.
    pub password: Option<String>,
    /// Local data file.
    pub file: Option<PathBuf>,
    /// Key prefix.
    pub prefix: String,
}

impl BackendArgs {
    /// Server settings: environment first, then flags on top.
    pub fn server_config(&self) -> BackendConfig {
        let mut config = BackendConfig::from_env();
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(password) = &self.password {
            config = config.with_password(password.clone());
        }
        config
    }

    /// Human-readable description of where records live.
    pub fn describe(&self) -> String {
        match (&self.file, &self.url) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(url)) => url.clone(),
            (None, None) => self.server_config().endpoint(),
        }
    }

    /// Builds the selected backend without probing it.
    pub fn backend(&self) -> Result<Box<dyn KvBackend>, Box<dyn std::error::Error>> {
        if let Some(path) = &self.file {
            if self.url.is_some()
                || self.host.is_some()
                || self.port.is_some()
                || self.password.is_some()
            {
                return Err(CliError::ConflictingBackends.into());
            }
            return Ok(Box::new(FileBackend::open_with_create_dirs(path)?));
        }

        let backend = match &self.url {
            Some(url) => RedisBackend::from_url(url)?,
            None => RedisBackend::new(self.server_config())?,
        };
        Ok(Box::new(backend))
    }

    /// Opens a catalog store over the selected backend.
    ///
    /// A store that fails its liveness probe is still returned; its
    /// operations then fail with a backend-unavailable error.
    pub fn open(&self) -> Result<Store, Box<dyn std::error::Error>> {
        tracing::debug!(location = %self.describe(), prefix = %self.prefix, "opening catalog");
        let store = CatalogStore::connect(self.backend()?, Config::new().key_prefix(&self.prefix));
        if store.state() == ConnectionState::Degraded {
            eprintln!("warning: {} is unreachable, catalog is unavailable", self.describe());
        }
        Ok(store)
    }
}

/// Prints a value in the requested output format.
pub fn emit<T, F>(value: &T, format: &str, text: F) -> Result<(), Box<dyn std::error::Error>>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(value)?),
        _ => println!("{}", text(value)),
    }
    Ok(())
}

/// Renders one record as a labelled block.
pub fn record_block(record: &Record) -> String {
    let mut out = format!(
        "ID:     {}\nTitle:  {}\nAuthor: {}\nGenre:  {}\nStatus: {}",
        record.id,
        record.title,
        record.author,
        record.genre,
        record.status.label()
    );
    for (name, value) in &record.extensions {
        out.push_str(&format!("\n{name}: {value}"));
    }
    out
}

/// Renders records as an aligned table.
pub fn record_table(records: &[Record]) -> String {
    const HEADERS: [&str; 5] = ["ID", "Title", "Author", "Genre", "Status"];

    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.title.clone(),
                r.author.clone(),
                r.genre.clone(),
                r.status.label().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 5]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(HEADERS)];
    out.extend(rows.iter().map(|[id, title, author, genre, status]| {
        line([id, title, author, genre, status].map(String::as_str))
    }));
    out.join("\n")
}

/// Singular or plural noun for a count.
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use kvcatalog_backend::InMemoryBackend;
    use kvcatalog_core::{RecordDraft, RecordId, Status};

    pub(crate) fn memory_store() -> Store {
        CatalogStore::connect(Box::new(InMemoryBackend::new()), Config::default())
    }

    fn record(id: u64, title: &str) -> Record {
        Record::from_draft(
            RecordId::new(id).unwrap(),
            RecordDraft::new(title, "Herbert", "Sci-Fi", Status::InProgress),
        )
    }

    #[test]
    fn table_aligns_columns() {
        let table = record_table(&[record(1, "Dune"), record(12, "Dune Messiah")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Title         Author"));
        assert!(lines[1].starts_with("1   Dune          Herbert"));
        assert!(lines[2].ends_with("In progress"));
    }

    #[test]
    fn table_with_no_rows_is_header_only() {
        assert_eq!(record_table(&[]), "ID  Title  Author  Genre  Status");
    }

    #[test]
    fn block_includes_extensions() {
        let mut r = record(3, "Dune");
        r.extensions
            .insert("isbn".to_string(), serde_json::json!("978-0441172719"));
        let block = record_block(&r);
        assert!(block.contains("Status: In progress"));
        assert!(block.ends_with("isbn: \"978-0441172719\""));
    }

    #[test]
    fn count_labels() {
        assert_eq!(count_label(0, "record"), "0 records");
        assert_eq!(count_label(1, "record"), "1 record");
        assert_eq!(count_label(2, "result"), "2 results");
    }

    #[test]
    fn file_and_server_options_conflict() {
        let args = BackendArgs {
            file: Some(PathBuf::from("catalog.json")),
            host: Some("db".to_string()),
            ..BackendArgs::default()
        };
        let err = args.backend().err().unwrap();
        assert_eq!(err.to_string(), CliError::ConflictingBackends.to_string());
    }

    #[test]
    fn file_backend_is_opened_and_connected() {
        let dir = tempfile::tempdir().unwrap();
        let args = BackendArgs {
            file: Some(dir.path().join("nested").join("catalog.json")),
            prefix: "book:".to_string(),
            ..BackendArgs::default()
        };
        let store = args.open().unwrap();
        assert_eq!(store.state(), ConnectionState::Connected);
        assert!(args.describe().ends_with("catalog.json"));
    }

    #[test]
    fn flags_override_server_settings() {
        let args = BackendArgs {
            host: Some("catalog.internal".to_string()),
            port: Some(6380),
            ..BackendArgs::default()
        };
        let config = args.server_config();
        assert_eq!(config.host, "catalog.internal");
        assert_eq!(config.port, 6380);
    }
}
