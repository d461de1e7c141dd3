//! File-backed asset record store with TTL expiration
//!
//! Stores binary payloads on disk together with a metadata sidecar, keyed by
//! arbitrary path strings. Entries expire after a per-entry TTL and are
//! removed lazily by the read that discovers them; there is no delete or
//! list surface.

mod error;
mod store;
mod types;

pub use error::{CacheError, Result};
pub use store::AssetStore;
pub use types::{AssetMetadata, StoredEntry};
