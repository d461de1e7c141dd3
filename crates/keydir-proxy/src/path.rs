//! Request path normalization
//!
//! Canonicalizes a raw URL path into an asset key, or classifies it as a
//! root request or as invalid. Normalization is idempotent: feeding a
//! produced key back in returns the same key.

/// Outcome of normalizing a raw request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// Bare root request; the caller resolves the configured root object.
    Root,
    /// Canonical asset key: leading `/`, no empty segments.
    Key(String),
    /// Root-ineligible path (`.`/`..` segments or embedded null bytes).
    Invalid,
}

pub fn normalize(raw: &str) -> PathResolution {
    if raw.is_empty() || raw == "/" {
        return PathResolution::Root;
    }

    let mut segments = Vec::new();
    for segment in raw.split('/') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if segment == "." || segment == ".." || segment.contains('\0') {
            return PathResolution::Invalid;
        }
        segments.push(segment);
    }

    if segments.is_empty() {
        return PathResolution::Root;
    }

    PathResolution::Key(format!("/{}", segments.join("/")))
}
