//! Record types and their stored encoding.

mod codec;
mod draft;
mod id;
mod status;

pub use draft::{RecordDraft, RecordPatch};
pub use id::RecordId;
pub use status::Status;

pub(crate) use codec::{decode, encode};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One catalog entry.
///
/// Fields the schema does not know about are kept in `extensions` and
/// written back untouched, so records written by newer or foreign clients
/// survive an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Genre.
    pub genre: String,
    /// Reading status.
    pub status: Status,
    /// Unknown fields, preserved verbatim.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl Record {
    /// Builds a record from a draft and an assigned id.
    #[must_use]
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            genre: draft.genre,
            status: draft.status,
            extensions: BTreeMap::new(),
        }
    }

    /// Replaces the four mutable fields. `id` and `extensions` are kept.
    pub fn apply(&mut self, draft: RecordDraft) {
        self.title = draft.title;
        self.author = draft.author;
        self.genre = draft.genre;
        self.status = draft.status;
    }

    /// Returns the mutable fields as a draft.
    #[must_use]
    pub fn to_draft(&self) -> RecordDraft {
        RecordDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            status: self.status,
        }
    }

    /// Case-insensitive substring match on title, author or genre.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.genre]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
