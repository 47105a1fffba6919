//! Record identifier.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Unique identifier for a record.
///
/// Record IDs are positive integers that are:
/// - Drawn from the persisted identifier sequence
/// - Immutable once assigned
/// - Never reused, even after the record is deleted
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RecordId(NonZeroU64);

impl RecordId {
    /// Creates a record ID. Returns `None` for zero.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for RecordId {
    type Error = CatalogError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| CatalogError::validation("record id must be positive"))
    }
}

impl TryFrom<i64> for RecordId {
    type Error = CatalogError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                CatalogError::validation(format!("record id must be positive, got {value}"))
            })
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.get()
    }
}

impl FromStr for RecordId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u64>()
            .map_err(|_| CatalogError::validation(format!("not a record id: {trimmed:?}")))?;
        Self::try_from(value)
    }
}
