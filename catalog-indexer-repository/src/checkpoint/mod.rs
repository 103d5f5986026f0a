//! Checkpoint record type and timestamp codec.
//!
//! The checkpoint is a flat key→value record with a schema version field so
//! future keys can be added without breaking deserialization. One key is
//! recognized today: [`LAST_UPDATE_KEY`], whose value is a timestamp in the
//! fixed textual format [`TIMESTAMP_FORMAT`].

mod file_store;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CheckpointStoreError;

pub use file_store::FileCheckpointStore;

/// Key under which the last successfully processed cycle start time is
/// stored.
pub const LAST_UPDATE_KEY: &str = "last_update";

/// Version of the on-disk record layout.
pub const CHECKPOINT_SCHEMA_VERSION: u32 = 1;

/// Fixed textual format of checkpoint timestamps (second precision).
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%y %H:%M:%S";

/// The durable checkpoint record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    pub schema_version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Default for CheckpointRecord {
    fn default() -> Self {
        Self {
            schema_version: CHECKPOINT_SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl CheckpointRecord {
    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

/// Render a timestamp in the checkpoint format. Sub-second precision is
/// truncated; windows overlap rather than gap because the detection query
/// uses a strict lower bound.
pub fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp in the checkpoint format.
pub fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, CheckpointStoreError> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| CheckpointStoreError::invalid_timestamp(raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_roundtrip() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 17, 21, 45, 9).unwrap();
        let encoded = encode_timestamp(timestamp);
        assert_eq!(encoded, "17-03-24 21:45:09");
        assert_eq!(decode_timestamp(&encoded).unwrap(), timestamp);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_timestamp("not a timestamp").is_err());
        assert!(decode_timestamp("").is_err());
    }

    #[test]
    fn test_record_deserializes_without_entries() {
        let record: CheckpointRecord =
            serde_json::from_str(r#"{"schema_version": 1}"#).unwrap();
        assert!(record.entries.is_empty());
    }

    #[test]
    fn test_record_get_set() {
        let mut record = CheckpointRecord::default();
        assert!(record.get(LAST_UPDATE_KEY).is_none());

        record.set(LAST_UPDATE_KEY, "17-03-24 21:45:09");
        assert_eq!(
            record.get(LAST_UPDATE_KEY).map(String::as_str),
            Some("17-03-24 21:45:09")
        );
    }
}
