//! Reading status.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reading status of a record.
///
/// Stored as one of the canonical tokens `pending`, `in_progress`, `read`.
/// Parsing accepts those tokens case-insensitively (and `in-progress`);
/// anything else is a validation error rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    /// Not started.
    Pending,
    /// Currently being read.
    InProgress,
    /// Finished.
    Read,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Read];

    /// Canonical storage token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Read => "read",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In progress",
            Status::Read => "Read",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in_progress" | "in-progress" => Ok(Status::InProgress),
            "read" => Ok(Status::Read),
            _ => Err(CatalogError::validation(format!(
                "unknown status {s:?}, expected one of pending, in_progress, read"
            ))),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}
