//! Content-type inference for asset keys

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Resolve the content type for a key, optionally informed by the type the
/// mirror declared.
///
/// Keys ending in `policy`, `host`, or `.txt` (case-insensitive) are always
/// plain text, overriding any upstream hint. An upstream hint of `text/html`
/// is discarded so a mirror error page can never be recorded as HTML.
pub fn resolve(key: &str, upstream: Option<&str>) -> String {
    let lower = key.to_ascii_lowercase();
    if lower.ends_with("policy") || lower.ends_with("host") || lower.ends_with(".txt") {
        return TEXT_PLAIN_UTF8.to_string();
    }

    if let Some(upstream) = upstream {
        let media_type = upstream.split(';').next().unwrap_or("").trim();
        if !media_type.is_empty() && !media_type.eq_ignore_ascii_case("text/html") {
            return upstream.to_string();
        }
    }

    OCTET_STREAM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_suffixes_override_upstream() {
        for key in [
            "/.well-known/openpgpkey/policy",
            "/POLICY",
            "/submission-address.txt",
            "/notes.TXT",
            "/.well-known/host",
        ] {
            assert_eq!(
                resolve(key, Some("application/json")),
                "text/plain; charset=utf-8"
            );
            assert_eq!(resolve(key, None), "text/plain; charset=utf-8");
        }
    }

    #[test]
    fn test_upstream_hint_passes_through() {
        assert_eq!(
            resolve("/shaquille.asc", Some("application/pgp-keys")),
            "application/pgp-keys"
        );
    }

    #[test]
    fn test_html_hint_discarded() {
        assert_eq!(
            resolve("/shaquille.asc", Some("text/html")),
            "application/octet-stream"
        );
        assert_eq!(
            resolve("/shaquille.asc", Some("text/html; charset=utf-8")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_no_hint_falls_back_to_octet_stream() {
        assert_eq!(resolve("/shaquille.asc", None), "application/octet-stream");
        assert_eq!(resolve("/shaquille.asc", Some("")), "application/octet-stream");
    }
}
