//! Durable key→(payload, metadata) store on the local filesystem
//!
//! Each record is a pair of files named by the hex SHA-256 of the key:
//! `<hash>.bin` holds the payload, `<hash>.json` the metadata sidecar. A
//! record is warm only when both halves are present and the sidecar parses;
//! anything else is reported as a miss.

use crate::error::Result;
use crate::types::{AssetMetadata, StoredEntry};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the backing directory if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn record_paths(&self, key: &str) -> (PathBuf, PathBuf) {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        (
            self.dir.join(format!("{digest}.bin")),
            self.dir.join(format!("{digest}.json")),
        )
    }

    /// Look up a record. Returns payload and metadata together, or `None`
    /// on a miss (absent, partial, unreadable, or expired record).
    pub async fn get(&self, key: &str) -> Result<Option<(Vec<u8>, AssetMetadata)>> {
        let (payload_path, sidecar_path) = self.record_paths(key);

        let sidecar = match fs::read(&sidecar_path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let entry: StoredEntry = match serde_json::from_slice(&sidecar) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(key, error = %err, "Unreadable cache sidecar, treating as miss");
                return Ok(None);
            }
        };

        if entry.is_expired(Utc::now()) {
            debug!(key, "Cache entry expired, evicting");
            let _ = fs::remove_file(&payload_path).await;
            let _ = fs::remove_file(&sidecar_path).await;
            return Ok(None);
        }

        let bytes = match fs::read(&payload_path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(key, "Cache sidecar without payload, treating as miss");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Some((
            bytes,
            AssetMetadata {
                content_type: entry.content_type,
            },
        )))
    }

    /// Write a record with the given TTL. Overwrites any existing record for
    /// the key; concurrent writers for the same key are last-writer-wins.
    pub async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        metadata: &AssetMetadata,
        ttl_secs: u64,
    ) -> Result<()> {
        let (payload_path, sidecar_path) = self.record_paths(key);

        let entry = StoredEntry {
            key: key.to_string(),
            content_type: metadata.content_type.clone(),
            size: bytes.len() as u64,
            created_at: Utc::now(),
            ttl_secs,
        };
        let sidecar = serde_json::to_vec(&entry)?;

        // Payload first: a reader that sees the sidecar must find the bytes.
        fs::write(&payload_path, bytes).await?;
        fs::write(&sidecar_path, sidecar).await?;

        debug!(key, size = bytes.len(), ttl_secs, "Stored asset record");
        Ok(())
    }
}
