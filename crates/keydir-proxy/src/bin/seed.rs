//! keydir-seed - offline bulk pre-population of the asset store
//!
//! Scans the given source paths and writes one cache record per file, in
//! exactly the shape the proxy reads at request time. A file argument seeds
//! `/<file-name>`; a directory argument is walked recursively and each
//! contained file seeds `/<dir-name>/<relative-path>`.
//!
//! Usage: keydir-seed <cache-dir> <file-or-dir>...

use keydir_cache::{AssetMetadata, AssetStore};
use keydir_proxy::content_type;
use keydir_proxy::error::{ProxyError, Result};
use keydir_proxy::path::{self, PathResolution};
use keydir_proxy::types::ASSET_TTL_SECS;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("keydir_seed=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let Some(cache_dir) = args.next() else {
        eprintln!("usage: keydir-seed <cache-dir> <file-or-dir>...");
        std::process::exit(2);
    };
    let sources: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if sources.is_empty() {
        eprintln!("usage: keydir-seed <cache-dir> <file-or-dir>...");
        std::process::exit(2);
    }

    let store = AssetStore::new(&cache_dir);
    store.init().await?;

    let mut seeded = 0usize;
    for source in &sources {
        for (key, file) in collect_records(source)? {
            let bytes = tokio::fs::read(&file).await?;
            let metadata = AssetMetadata {
                // No upstream hint offline; suffix rules or octet-stream.
                content_type: content_type::resolve(&key, None),
            };
            store.put(&key, &bytes, &metadata, ASSET_TTL_SECS).await?;
            info!(key = %key, size = bytes.len(), content_type = %metadata.content_type, "Seeded");
            seeded += 1;
        }
    }

    info!(seeded, cache_dir = %cache_dir, "Seeding complete");
    Ok(())
}

/// Map a source path to `(asset key, file path)` records. Files seed under
/// their own name; directories are walked with the directory name as the
/// key prefix.
fn collect_records(source: &Path) -> Result<Vec<(String, PathBuf)>> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ProxyError::Config(format!("unusable source path: {:?}", source)))?;

    let mut records = Vec::new();
    if source.is_dir() {
        walk(source, &format!("/{name}"), &mut records)?;
    } else {
        push_record(format!("/{name}"), source.to_path_buf(), &mut records);
    }
    Ok(records)
}

fn walk(dir: &Path, prefix: &str, records: &mut Vec<(String, PathBuf)>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file = entry.path();
        let Some(name) = file.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            warn!(path = ?file, "Skipping entry with non-UTF-8 name");
            continue;
        };
        if file.is_dir() {
            walk(&file, &format!("{prefix}/{name}"), records)?;
        } else {
            push_record(format!("{prefix}/{name}"), file, records);
        }
    }
    Ok(())
}

/// Keys go through the same normalizer the proxy uses, so the seeder can
/// only ever produce records the request path will find.
fn push_record(raw_key: String, file: PathBuf, records: &mut Vec<(String, PathBuf)>) {
    match path::normalize(&raw_key) {
        PathResolution::Key(key) => records.push((key, file)),
        _ => warn!(key = %raw_key, "Skipping file with root-ineligible key"),
    }
}
