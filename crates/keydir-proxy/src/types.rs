//! Core types for the keydir proxy

use std::path::PathBuf;

/// Default asset key served for requests to the bare root path.
pub const DEFAULT_ROOT_OBJECT: &str = "/public-masterkey.asc";

/// Default read-only mirror the fallback fetch targets. Must not end in a
/// slash; asset keys carry their own leading slash.
pub const DEFAULT_MIRROR_BASE: &str = "https://raw.githubusercontent.com/keydir/assets/main";

/// TTL applied to every cache write, from the fallback path and the seeder
/// alike: 30 days.
pub const ASSET_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Configuration for the proxy, read once at startup.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub cache_dir: PathBuf,
    pub root_object: String,
    pub mirror_base: String,
    /// Host allow-list; `None` admits every host.
    pub allowed_hosts: Option<Vec<String>>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cache_dir: PathBuf::from("./cache/assets"),
            root_object: DEFAULT_ROOT_OBJECT.to_string(),
            mirror_base: DEFAULT_MIRROR_BASE.to_string(),
            allowed_hosts: None,
        }
    }
}

/// Parse a comma-separated host allow-list. Blank entries are dropped; an
/// empty or all-blank value means no restriction.
pub fn parse_allowed_hosts(raw: &str) -> Option<Vec<String>> {
    let hosts: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect();

    if hosts.is_empty() {
        None
    } else {
        Some(hosts)
    }
}
