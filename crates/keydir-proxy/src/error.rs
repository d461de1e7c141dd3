//! Error types for the keydir proxy

use std::fmt;

#[derive(Debug)]
pub enum ProxyError {
    Config(String),
    Io(Box<std::io::Error>),
    Cache(keydir_cache::CacheError),
    Transport(Box<reqwest::Error>),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ProxyError::Io(err) => write!(f, "IO error: {}", err),
            ProxyError::Cache(err) => write!(f, "Cache error: {}", err),
            ProxyError::Transport(err) => write!(f, "Transport error: {}", err),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::Config(_) => None,
            ProxyError::Io(err) => Some(err.as_ref()),
            ProxyError::Cache(err) => Some(err),
            ProxyError::Transport(err) => Some(err.as_ref()),
        }
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(err: std::io::Error) -> Self {
        ProxyError::Io(Box::new(err))
    }
}

impl From<keydir_cache::CacheError> for ProxyError {
    fn from(err: keydir_cache::CacheError) -> Self {
        ProxyError::Cache(err)
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Transport(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ProxyError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ProxyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ProxyError::Config("missing GITHUB_MIRROR_BASE".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: missing GITHUB_MIRROR_BASE"
        );
    }

    #[test]
    fn test_io_error_display() {
        let err = ProxyError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(format!("{}", err).contains("denied"));
    }

    #[test]
    fn test_cache_error_source() {
        let inner = keydir_cache::CacheError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = ProxyError::from(inner);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_is_debug() {
        let err = ProxyError::Config("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
    }
}
