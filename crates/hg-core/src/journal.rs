//! JSONL journal entry envelope.
//!
//! Every successful mutation is recorded as a `JournalEntry` in per-day
//! `{journal_dir}/{YYYY-MM-DD}.jsonl` files. Entries written before the `v`
//! field existed deserialize with `v == 1` via `#[serde(default)]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, JournalOp};

const fn default_journal_version() -> u32 {
    1
}

/// A single mutation recorded in the journal.
///
/// `data` holds the full entity for `Create`, the status change for
/// `Resolve`, and the reading for `Reading`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct JournalEntry {
    #[serde(default = "default_journal_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the mutation.
    pub ts: String,

    pub op: JournalOp,

    pub entity: EntityKind,

    /// ID of the affected entity.
    pub id: String,

    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_version_defaults_to_one() {
        let json = r#"{"ts":"2026-01-01T00:00:00Z","op":"resolve","entity":"alert","id":"al-11111111","data":{}}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.v, 1);
        assert_eq!(entry.op, JournalOp::Resolve);
        assert_eq!(entry.entity, EntityKind::Alert);
    }

    #[test]
    fn reading_entry_serializes_snake_case_tags() {
        let entry = JournalEntry {
            v: 1,
            ts: "2026-10-16T08:00:00Z".into(),
            op: JournalOp::Reading,
            entity: EntityKind::Sensor,
            id: "wq-004".into(),
            data: serde_json::json!({"value": 200.0}),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["op"], "reading");
        assert_eq!(json["entity"], "sensor");
    }
}
