//! # kvcatalog Core
//!
//! A record catalog over a key-value backend.
//!
//! This crate provides:
//! - The [`Record`] schema with a strict [`Status`] and an extensions side-channel
//! - A persisted, monotonically increasing identifier sequence
//! - Create / read / update / delete, ordered listing and substring search
//! - A connected/degraded connection state decided at startup
//! - An error taxonomy that never leaks backend-specific failures
//!
//! ## Example
//!
//! ```rust
//! use kvcatalog_backend::InMemoryBackend;
//! use kvcatalog_core::{CatalogStore, Config, RecordDraft, Status};
//!
//! let store = CatalogStore::connect(InMemoryBackend::new(), Config::default());
//! let dune = store
//!     .create(RecordDraft::new("Dune", "Herbert", "Sci-Fi", Status::Pending))
//!     .unwrap();
//! assert_eq!(dune.id.get(), 1);
//! assert_eq!(store.search("herb").unwrap(), vec![dune]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod keys;
mod record;
mod store;

pub use config::{Config, DEFAULT_KEY_PREFIX};
pub use error::{CatalogError, CatalogResult};
pub use keys::KeyLayout;
pub use record::{Record, RecordDraft, RecordId, RecordPatch, Status};
pub use store::{CatalogStore, ConnectionState};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
