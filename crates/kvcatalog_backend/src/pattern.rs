//! Glob-style key matching with Redis `KEYS` semantics.
//!
//! Supported syntax:
//!
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]`, `[^a-z]` match one character from (or outside) a class
//! - `\x` matches `x` literally
//!
//! An unterminated class behaves as if it were closed at the end of the
//! pattern, as the server does. Patterns are translated to an anchored
//! [`regex::Regex`].

use regex::Regex;
use std::fmt::Write;

/// Returns true if `text` matches the glob `pattern`.
///
/// # Example
///
/// ```rust
/// use kvcatalog_backend::glob_match;
///
/// assert!(glob_match("book:[0-9]*", "book:42"));
/// assert!(!glob_match("book:[0-9]*", "book:next_id"));
/// ```
#[must_use]
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let Some(source) = glob_to_regex(pattern) else {
        return false;
    };
    match Regex::new(&source) {
        Ok(regex) => regex.is_match(text),
        Err(err) => {
            tracing::warn!(%pattern, error = %err, "glob pattern did not compile");
            false
        }
    }
}

/// Translates a glob into an anchored regex.
///
/// Returns `None` for a pattern that can match nothing (an empty class).
fn glob_to_regex(pattern: &str) -> Option<String> {
    let mut out = String::from(r"(?s)\A");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                let mut negate = false;
                if chars.peek() == Some(&'^') {
                    chars.next();
                    negate = true;
                }

                let mut members: Vec<(char, char)> = Vec::new();
                while let Some(c) = chars.next() {
                    match c {
                        ']' => break,
                        '\\' => members.push(chars.next().map_or(('\\', '\\'), |e| (e, e))),
                        lo => {
                            let mut ahead = chars.clone();
                            match (ahead.next(), ahead.next()) {
                                (Some('-'), Some(hi)) if hi != ']' => {
                                    chars = ahead;
                                    members.push((lo.min(hi), lo.max(hi)));
                                }
                                _ => members.push((lo, lo)),
                            }
                        }
                    }
                }

                match (members.is_empty(), negate) {
                    (true, false) => return None,
                    (true, true) => out.push('.'),
                    (false, _) => {
                        out.push('[');
                        if negate {
                            out.push('^');
                        }
                        for (lo, hi) in members {
                            if lo == hi {
                                let _ = write!(out, "\\x{{{:X}}}", lo as u32);
                            } else {
                                let (lo, hi) = (lo as u32, hi as u32);
                                let _ = write!(out, "\\x{{{lo:X}}}-\\x{{{hi:X}}}");
                            }
                        }
                        out.push(']');
                    }
                }
            }
            '\\' => {
                let literal = chars.next().unwrap_or('\\');
                out.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            }
            literal => out.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push_str(r"\z");
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn literal_patterns() {
        assert!(glob_match("book:1", "book:1"));
        assert!(!glob_match("book:1", "book:12"));
        assert!(!glob_match("book:12", "book:1"));
        assert!(glob_match("", ""));
        assert!(!glob_match("", "a"));
    }

    #[test]
    fn star_matches_any_run() {
        assert!(glob_match("*", ""));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("book:*", "book:"));
        assert!(glob_match("book:*", "book:next_id"));
        assert!(glob_match("*:id", "book:id"));
        assert!(glob_match("b**k", "book"));
        assert!(!glob_match("book:*x", "book:abc"));
    }

    #[test]
    fn question_mark_matches_one() {
        assert!(glob_match("book:?", "book:7"));
        assert!(!glob_match("book:?", "book:"));
        assert!(!glob_match("book:?", "book:77"));
    }

    #[test]
    fn numeric_class_excludes_counter() {
        let pattern = "book:[0-9]*";
        assert!(glob_match(pattern, "book:1"));
        assert!(glob_match(pattern, "book:1024"));
        assert!(!glob_match(pattern, "book:next_id"));
        assert!(!glob_match(pattern, "book:"));
        assert!(!glob_match(pattern, "magazine:1"));
    }

    #[test]
    fn negated_and_reversed_ranges() {
        assert!(glob_match("[^0-9]", "x"));
        assert!(!glob_match("[^0-9]", "5"));
        assert!(glob_match("[9-0]", "4"));
        assert!(glob_match("[abc]", "b"));
        assert!(!glob_match("[abc]", "d"));
    }

    #[test]
    fn escapes() {
        assert!(glob_match(r"a\*b", "a*b"));
        assert!(!glob_match(r"a\*b", "axb"));
        assert!(glob_match(r"[\]]", "]"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(glob_match("a.b+c", "a.b+c"));
        assert!(!glob_match("a.b", "axb"));
        assert!(glob_match("(x)|{y}$", "(x)|{y}$"));
        assert!(glob_match("[.]", "."));
        assert!(!glob_match("[.]", "x"));
    }

    #[test]
    fn empty_classes() {
        assert!(!glob_match("a[]", "a"));
        assert!(!glob_match("a[]", "ab"));
        assert!(glob_match("a[^]", "ab"));
    }

    #[test]
    fn trailing_backslash() {
        assert!(glob_match(r"a\\", r"a\"));
        assert!(glob_match("\\", "\\"));
    }

    #[test]
    fn newlines_and_unicode() {
        assert!(glob_match("a*b", "a\nb"));
        assert!(glob_match("libro:?", "libro:ñ"));
        assert!(glob_match("[á-é]", "ä"));
    }

    #[test]
    fn unterminated_class() {
        assert!(glob_match("[ab", "a"));
        assert!(!glob_match("[ab", "c"));
    }

    proptest! {
        #[test]
        fn star_matches_everything(text in "[ -~]{0,32}") {
            prop_assert!(glob_match("*", &text));
        }

        #[test]
        fn plain_text_matches_itself(text in "[a-z0-9:_]{0,32}") {
            prop_assert!(glob_match(&text, &text));
        }

        #[test]
        fn numeric_suffix_matches(n in 1u64..u64::MAX) {
            let key = format!("book:{n}");
            prop_assert!(glob_match("book:[0-9]*", &key));
        }
    }
}
