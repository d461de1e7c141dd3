//! Mirror fallback fetching

use crate::error::Result;
use reqwest::{header, Client, StatusCode};
use tracing::debug;

/// Fixed identifying header sent on every mirror request.
const USER_AGENT: &str = "keydir-proxy/0.1";

/// Outcome of a single mirror fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx from the mirror: full payload plus its declared content type.
    Fetched {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// 404 from the mirror; cache-ineligible.
    NotFound,
    /// Any other non-2xx status from the mirror.
    UpstreamError { status: u16 },
}

/// HTTP client for fetching assets from the read-only mirror.
///
/// Makes exactly one attempt per invocation; retry policy, if any, belongs
/// to the caller.
pub struct MirrorFetcher {
    client: Client,
    base: String,
}

impl MirrorFetcher {
    /// Create a fetcher against the given mirror base URL. The base must not
    /// end in a slash; asset keys carry their own leading slash.
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Fetch one asset from the mirror.
    pub async fn fetch(&self, key: &str) -> Result<FetchOutcome> {
        let url = format!("{}{}", self.base, key);
        debug!(url = %url, "Fetching asset from mirror");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::NotFound);
        }
        if !status.is_success() {
            return Ok(FetchOutcome::UpstreamError {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?.to_vec();

        debug!(
            key,
            size = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "Fetched asset from mirror"
        );

        Ok(FetchOutcome::Fetched {
            bytes,
            content_type,
        })
    }
}
