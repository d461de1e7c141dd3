//! Store types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata stored alongside an asset payload.
///
/// The content type is computed once, at write time; readers use it verbatim
/// and never re-derive it from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub content_type: String,
}

/// On-disk sidecar record for one cached asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub key: String,
    pub content_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub ttl_secs: u64,
}

impl StoredEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.created_at;
        age.num_seconds() >= 0 && age.num_seconds() as u64 >= self.ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_stored_entry_serialization() {
        let entry = StoredEntry {
            key: "/openpgpkey/policy".to_string(),
            content_type: "text/plain; charset=utf-8".to_string(),
            size: 42,
            created_at: Utc::now(),
            ttl_secs: 2_592_000,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("/openpgpkey/policy"));
        assert!(json.contains("2592000"));

        let deserialized: StoredEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.key, entry.key);
        assert_eq!(deserialized.content_type, entry.content_type);
        assert_eq!(deserialized.size, entry.size);
    }

    #[test]
    fn test_entry_not_expired_within_ttl() {
        let entry = StoredEntry {
            key: "/k".to_string(),
            content_type: "application/octet-stream".to_string(),
            size: 1,
            created_at: Utc::now(),
            ttl_secs: 3600,
        };
        assert!(!entry.is_expired(Utc::now()));
    }

    #[test]
    fn test_entry_expired_after_ttl() {
        let created = Utc::now() - Duration::seconds(7200);
        let entry = StoredEntry {
            key: "/k".to_string(),
            content_type: "application/octet-stream".to_string(),
            size: 1,
            created_at: created,
            ttl_secs: 3600,
        };
        assert!(entry.is_expired(Utc::now()));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let entry = StoredEntry {
            key: "/k".to_string(),
            content_type: "application/octet-stream".to_string(),
            size: 1,
            created_at: Utc::now(),
            ttl_secs: 0,
        };
        assert!(entry.is_expired(Utc::now()));
    }
}
