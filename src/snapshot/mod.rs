//! Snapshot documents
//!
//! A snapshot is a versioned, timestamped, whole-dataset export: every
//! tracked table serialized as an array of flat row objects.
//!
//! # Wire Format
//!
//! Snapshots are stored as JSON files (UTF-8, BOM-prefixed) with the
//! following structure:
//! - `version`: format version string for compatibility checking
//! - `timestamp`: when the snapshot was produced (ISO-8601)
//! - `data`: object keyed by table name, each value an array of row objects
//! - `unavailable_tables`: tables that could not be read at snapshot time
//!   (present in `data` as empty arrays; omitted when empty)

pub mod serializer;
pub mod validator;

pub use serializer::serialize_store;
pub use validator::is_valid_snapshot;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::RowMap;

/// Current snapshot format version
pub const FORMAT_VERSION: &str = "1.0";

/// A whole-dataset snapshot document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version for compatibility checking
    pub version: String,

    /// When the snapshot was produced
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    /// Table name -> rows, in storage order
    pub data: BTreeMap<String, Vec<RowMap>>,

    /// Tables recorded as empty because they could not be read
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable_tables: Vec<String>,
}

impl Snapshot {
    /// Total number of rows across all tables
    pub fn row_count(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    /// Serialize to the on-disk representation: pretty JSON with a BOM prefix
    pub fn to_file_contents(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(format!("\u{feff}{}", json))
    }
}

/// Strip an optional UTF-8 byte-order mark before parsing
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_contents_has_bom() {
        let snapshot = Snapshot {
            version: FORMAT_VERSION.to_string(),
            timestamp: Utc::now(),
            data: BTreeMap::new(),
            unavailable_tables: Vec::new(),
        };

        let contents = snapshot.to_file_contents().unwrap();
        assert!(contents.starts_with('\u{feff}'));

        let parsed: Snapshot = serde_json::from_str(strip_bom(&contents)).unwrap();
        assert_eq!(parsed.version, FORMAT_VERSION);
    }

    #[test]
    fn test_strip_bom_without_bom() {
        assert_eq!(strip_bom("{}"), "{}");
    }

    #[test]
    fn test_missing_timestamp_is_tolerated() {
        let parsed: Snapshot = serde_json::from_str(r#"{"version": "1.0", "data": {}}"#).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert!(parsed.unavailable_tables.is_empty());
    }

    #[test]
    fn test_unavailable_tables_omitted_when_empty() {
        let snapshot = Snapshot {
            version: FORMAT_VERSION.to_string(),
            timestamp: Utc::now(),
            data: BTreeMap::new(),
            unavailable_tables: Vec::new(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("unavailable_tables"));
    }
}
