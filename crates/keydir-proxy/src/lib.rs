//! Keydir Proxy - caching HTTP front-end for PGP key directory assets
//!
//! Serves public key files, Web Key Directory entries, and policy documents
//! from a durable local asset store, falling back to a read-only GitHub
//! mirror on cache miss.

pub mod authorize;
pub mod content_type;
pub mod error;
pub mod fetch;
pub mod path;
pub mod server;
pub mod types;

pub use error::{ProxyError, Result};
pub use fetch::{FetchOutcome, MirrorFetcher};
pub use types::ProxyConfig;
