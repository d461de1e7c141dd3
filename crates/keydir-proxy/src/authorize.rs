//! Host authorization against the configured allow-list

/// Decide whether a request may proceed based on its `Host` header.
///
/// No allow-list admits everything. With an allow-list configured, a missing
/// `Host` header is denied, and matching is a case-insensitive exact string
/// comparison per entry; there are no wildcard or subdomain semantics.
pub fn host_allowed(allowed_hosts: Option<&[String]>, host: Option<&str>) -> bool {
    let Some(allowed) = allowed_hosts else {
        return true;
    };
    let Some(host) = host else {
        return false;
    };
    allowed.iter().any(|entry| entry.eq_ignore_ascii_case(host))
}
