//! Backend key layout.
//!
//! ```text
//! <prefix>1, <prefix>2, ...   # one JSON record per id
//! <prefix>next_id             # identifier sequence counter
//! ```
//!
//! The listing pattern only admits keys whose suffix starts with a digit,
//! and every key it returns is re-checked for an all-digit suffix, so the
//! counter (and stray keys like `<prefix>7b`) never reach the record decoder.

use crate::record::RecordId;

const COUNTER_SUFFIX: &str = "next_id";

/// Derives backend keys from a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    prefix: String,
}

impl KeyLayout {
    /// Creates a layout for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key holding the record with `id`.
    #[must_use]
    pub fn record_key(&self, id: RecordId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Key holding the identifier sequence.
    #[must_use]
    pub fn counter_key(&self) -> String {
        format!("{}{}", self.prefix, COUNTER_SUFFIX)
    }

    /// Glob pattern enumerating record keys.
    #[must_use]
    pub fn list_pattern(&self) -> String {
        format!("{}[0-9]*", escape_glob(&self.prefix))
    }

    /// Extracts the id from a record key.
    ///
    /// Returns `None` for keys outside this prefix, the counter key, and
    /// any suffix that is not a positive decimal integer without leading
    /// zeros.
    #[must_use]
    pub fn parse_record_key(&self, key: &str) -> Option<RecordId> {
        let suffix = key.strip_prefix(self.prefix.as_str())?;
        // Only the canonical spelling written by `record_key`
        if suffix.starts_with('0') || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse::<u64>().ok().and_then(RecordId::new)
    }
}

fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvcatalog_backend::glob_match;

    fn id(n: u64) -> RecordId {
        RecordId::new(n).unwrap()
    }

    #[test]
    fn record_and_counter_keys() {
        let keys = KeyLayout::new("book:");
        assert_eq!(keys.record_key(id(12)), "book:12");
        assert_eq!(keys.counter_key(), "book:next_id");
        assert_eq!(keys.list_pattern(), "book:[0-9]*");
    }

    #[test]
    fn pattern_excludes_counter() {
        let keys = KeyLayout::new("book:");
        assert!(glob_match(&keys.list_pattern(), &keys.record_key(id(1))));
        assert!(!glob_match(&keys.list_pattern(), &keys.counter_key()));
    }

    #[test]
    fn parse_record_key_accepts_only_numeric_suffixes() {
        let keys = KeyLayout::new("book:");
        assert_eq!(keys.parse_record_key("book:42"), Some(id(42)));
        assert_eq!(keys.parse_record_key("book:next_id"), None);
        assert_eq!(keys.parse_record_key("book:7b"), None);
        assert_eq!(keys.parse_record_key("book:"), None);
        assert_eq!(keys.parse_record_key("book:0"), None);
        assert_eq!(keys.parse_record_key("book:01"), None);
        assert_eq!(keys.parse_record_key("book:007"), None);
        assert_eq!(keys.parse_record_key("book:10"), Some(id(10)));
        assert_eq!(keys.parse_record_key("book:-1"), None);
        assert_eq!(keys.parse_record_key("other:1"), None);
        assert_eq!(keys.parse_record_key("book:99999999999999999999999"), None);
    }

    #[test]
    fn glob_characters_in_prefix_are_escaped() {
        let keys = KeyLayout::new("shelf[a]*:");
        let pattern = keys.list_pattern();
        assert_eq!(pattern, r"shelf\[a\]\*:[0-9]*");
        assert!(glob_match(&pattern, &keys.record_key(id(3))));
        assert!(!glob_match(&pattern, "shelfa:3"));
        assert_eq!(keys.parse_record_key("shelf[a]*:3"), Some(id(3)));
    }
}
