//! JSON encoding of stored records.
//!
//! A stored value is a compact JSON object:
//!
//! ```text
//! {"id":1,"title":"Dune","author":"Herbert","genre":"Sci-Fi","status":"pending"}
//! ```
//!
//! followed by any extension fields in key order.

use super::{Record, RecordId};
use crate::error::{CatalogError, CatalogResult};

/// Encodes a record for storage.
pub(crate) fn encode(record: &Record) -> CatalogResult<String> {
    serde_json::to_string(record)
        .map_err(|e| CatalogError::malformed(format!("record {}", record.id), e.to_string()))
}

/// Decodes the value stored under `key`.
///
/// The id embedded in the payload must agree with `expected`, the id the
/// key was derived from.
pub(crate) fn decode(key: &str, expected: RecordId, payload: &str) -> CatalogResult<Record> {
    let record: Record =
        serde_json::from_str(payload).map_err(|e| CatalogError::malformed(key, e.to_string()))?;

    if record.id != expected {
        return Err(CatalogError::malformed(
            key,
            format!("payload id {} does not match key", record.id),
        ));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordDraft, Status};
    use serde_json::Value;

    fn id(n: u64) -> RecordId {
        RecordId::new(n).unwrap()
    }

    fn dune() -> Record {
        Record::from_draft(
            id(1),
            RecordDraft::new("Dune", "Herbert", "Sci-Fi", Status::Pending),
        )
    }

    #[test]
    fn encoding_is_compact_and_ordered() {
        assert_eq!(
            encode(&dune()).unwrap(),
            r#"{"id":1,"title":"Dune","author":"Herbert","genre":"Sci-Fi","status":"pending"}"#
        );
    }

    #[test]
    fn encode_decode_roundtrip() {
        let record = dune();
        let decoded = decode("book:1", id(1), &encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let payload = r#"{"id":3,"title":"Emma","author":"Austen","genre":"Romance","status":"read","isbn":"978-0","pages":474}"#;
        let record = decode("book:3", id(3), payload).unwrap();

        assert_eq!(record.extensions.get("isbn"), Some(&Value::from("978-0")));
        assert_eq!(record.extensions.get("pages"), Some(&Value::from(474)));

        let reencoded = encode(&record).unwrap();
        assert!(reencoded.ends_with(r#""status":"read","isbn":"978-0","pages":474}"#));
    }

    #[test]
    fn corrupt_payloads_are_malformed() {
        let cases = [
            "not json",
            "{}",
            r#"{"id":"1","title":"t","author":"a","genre":"g","status":"pending"}"#,
            r#"{"id":1,"title":"t","author":"a","genre":"g","status":"si"}"#,
            r#"{"id":1,"title":"t","author":"a","genre":"g"}"#,
            r#"{"id":0,"title":"t","author":"a","genre":"g","status":"read"}"#,
        ];

        for payload in cases {
            let err = decode("book:1", id(1), payload).unwrap_err();
            assert!(
                matches!(err, CatalogError::Malformed { ref key, .. } if key == "book:1"),
                "{payload} gave {err:?}"
            );
        }
    }

    #[test]
    fn id_mismatch_is_malformed() {
        let payload = encode(&dune()).unwrap();
        let err = decode("book:9", id(9), &payload).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }
}
