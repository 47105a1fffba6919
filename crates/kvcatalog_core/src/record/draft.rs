//! Caller-supplied record fields.

use super::{Record, Status};
use crate::error::{CatalogError, CatalogResult};

/// The mutable fields of a record, as supplied to create and update.
///
/// The store treats the text fields as opaque. Callers that want to insist
/// on non-blank input run [`RecordDraft::validate`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Genre.
    pub genre: String,
    /// Reading status.
    pub status: Status,
}

impl RecordDraft {
    /// Creates a draft.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            status,
        }
    }

    /// Checks that title, author and genre are not blank.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first blank field.
    pub fn validate(&self) -> CatalogResult<()> {
        for (name, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Per-field overrides for an existing record.
///
/// The store only does full replacement; a patch is resolved against the
/// current record by the caller, with omitted fields keeping their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    /// New title, if any.
    pub title: Option<String>,
    /// New author, if any.
    pub author: Option<String>,
    /// New genre, if any.
    pub genre: Option<String>,
    /// New status, if any.
    pub status: Option<Status>,
}

impl RecordPatch {
    /// Returns true if no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.status.is_none()
    }

    /// Resolves the patch against `current` into a full draft.
    #[must_use]
    pub fn apply(self, current: &Record) -> RecordDraft {
        RecordDraft {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            author: self.author.unwrap_or_else(|| current.author.clone()),
            genre: self.genre.unwrap_or_else(|| current.genre.clone()),
            status: self.status.unwrap_or(current.status),
        }
    }
}
