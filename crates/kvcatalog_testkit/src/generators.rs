//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random catalog input.

use kvcatalog_core::{RecordDraft, Status};
use proptest::prelude::*;

/// Strategy for generating statuses.
pub fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Pending),
        Just(Status::InProgress),
        Just(Status::Read),
    ]
}

/// Strategy for generating non-blank text fields, including non-ASCII.
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9áéíóúñÑ][A-Za-z0-9áéíóúñÑ .,'-]{0,23}")
        .expect("Invalid regex")
}

/// Strategy for generating valid drafts.
pub fn draft_strategy() -> impl Strategy<Value = RecordDraft> {
    (
        field_strategy(),
        field_strategy(),
        field_strategy(),
        status_strategy(),
    )
        .prop_map(|(title, author, genre, status)| RecordDraft::new(title, author, genre, status))
}

/// Strategy for generating batches of drafts.
pub fn drafts_strategy(max: usize) -> impl Strategy<Value = Vec<RecordDraft>> {
    prop::collection::vec(draft_strategy(), 0..=max)
}

/// Strategy for generating blank search terms.
pub fn blank_term_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t\n]{0,6}").expect("Invalid regex")
}

/// Strategy for generating search terms.
pub fn search_term_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-záé ]{0,4}").expect("Invalid regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_drafts_validate(draft in draft_strategy()) {
            prop_assert!(draft.validate().is_ok());
        }

        #[test]
        fn blank_terms_are_blank(term in blank_term_strategy()) {
            prop_assert!(term.trim().is_empty());
        }
    }
}
