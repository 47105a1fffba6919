//! # kvcatalog Testkit
//!
//! Test utilities for kvcatalog.
//!
//! This crate provides:
//! - Catalog fixtures over in-memory and temporary file backends
//! - A fault-injecting backend that counts every request it receives
//! - Property-based test generators using proptest
//! - Concurrency stress helpers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kvcatalog_testkit::prelude::*;
//!
//! #[test]
//! fn degraded_store_makes_no_calls() {
//!     let (backend, store) = degraded_store();
//!     backend.reset_counts();
//!     assert!(store.list_all().is_err());
//!     assert_eq!(backend.call_count(), 0);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faulty;
pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faulty::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use faulty::*;
pub use fixtures::*;
pub use generators::*;
pub use stress::*;
