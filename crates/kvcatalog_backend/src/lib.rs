//! # kvcatalog Backend
//!
//! Key-value backend trait and implementations for kvcatalog.
//!
//! This crate provides the lowest-level storage abstraction for the catalog.
//! Backends are **opaque text stores** - they do not interpret the values
//! they hold.
//!
//! ## Design Principles
//!
//! - Backends expose the primitives of a Redis-style server
//!   (PING, GET, SET, DEL, INCR, KEYS, MGET) and nothing else
//! - No knowledge of record layout, key prefixes or the identifier sequence
//! - Must be `Send + Sync` for concurrent access
//! - The catalog owns all interpretation of keys and values
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral catalogs
//! - [`FileBackend`] - A JSON snapshot file that survives restarts
//! - `RedisBackend` - A networked Redis/KeyDB server (feature `redis`)
//!
//! ## Example
//!
//! ```rust
//! use kvcatalog_backend::{KvBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.set("greeting", "hello").unwrap();
//! assert_eq!(backend.get("greeting").unwrap().as_deref(), Some("hello"));
//! assert_eq!(backend.incr("counter").unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod file;
mod memory;
mod pattern;
#[cfg(feature = "redis")]
mod redis;

pub use backend::KvBackend;
pub use config::BackendConfig;
pub use error::{BackendError, BackendResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
pub use pattern::glob_match;
#[cfg(feature = "redis")]
pub use crate::redis::RedisBackend;
