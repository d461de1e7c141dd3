//! HTTP server and per-request orchestration
//!
//! The surface is a single any-path endpoint family, so the router consists
//! of one fallback handler that runs the pipeline: method gate, host
//! authorization, path normalization, cache lookup, mirror fallback with
//! non-blocking cache population, response assembly.

use crate::authorize;
use crate::content_type::{self, TEXT_PLAIN_UTF8};
use crate::fetch::{FetchOutcome, MirrorFetcher};
use crate::path::{self, PathResolution};
use crate::types::{ProxyConfig, ASSET_TTL_SECS};
use axum::{
    body::Body,
    extract::State,
    http::{header, response::Builder, HeaderMap, Method, StatusCode},
    response::Response,
    Router,
};
use keydir_cache::{AssetMetadata, AssetStore};
use std::sync::Arc;
use tracing::{error, info, warn};

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";
const ALLOWED_HEADERS: &str = "Accept, Accept-Encoding, Origin";
const ASSET_CACHE_CONTROL: &str = "public, max-age=300, immutable";

/// Shared state for the HTTP server
pub struct ServerState {
    pub config: ProxyConfig,
    pub store: AssetStore,
    pub fetcher: MirrorFetcher,
}

impl ServerState {
    pub fn new(config: ProxyConfig, store: AssetStore, fetcher: MirrorFetcher) -> Self {
        Self {
            config,
            store,
            fetcher,
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new().fallback(handle_request).with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Every terminal response carries the CORS set, success or error.
fn cors_builder(status: StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS)
}

fn preflight_response() -> Response {
    cors_builder(StatusCode::NO_CONTENT)
        .body(Body::empty())
        .unwrap()
}

fn error_response(status: StatusCode, message: &str, is_head: bool) -> Response {
    let body = if is_head {
        Body::empty()
    } else {
        Body::from(message.to_string())
    };
    cors_builder(status)
        .header(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)
        .body(body)
        .unwrap()
}

fn asset_response(content_type: &str, bytes: Vec<u8>, is_head: bool) -> Response {
    let body = if is_head {
        Body::empty()
    } else {
        Body::from(bytes)
    };
    cors_builder(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, ASSET_CACHE_CONTROL)
        .body(body)
        .unwrap()
}

async fn handle_request(
    State(state): State<SharedState>,
    req: axum::extract::Request,
) -> Response {
    let method = req.method();

    if method == Method::OPTIONS {
        return preflight_response();
    }
    if method != Method::GET && method != Method::HEAD {
        return error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
            false,
        );
    }

    let is_head = method == Method::HEAD;
    serve_asset(state, req.uri().path(), req.headers(), is_head).await
}

async fn serve_asset(
    state: SharedState,
    raw_path: &str,
    headers: &HeaderMap,
    is_head: bool,
) -> Response {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    if !authorize::host_allowed(state.config.allowed_hosts.as_deref(), host) {
        warn!(host = host.unwrap_or("-"), "Rejected request from unlisted host");
        return error_response(StatusCode::FORBIDDEN, "Forbidden", is_head);
    }

    let (key, is_root) = match path::normalize(raw_path) {
        PathResolution::Key(key) => (key, false),
        PathResolution::Invalid => {
            return error_response(StatusCode::NOT_FOUND, "Not Found", is_head);
        }
        // The root object is itself run through the normalizer so `/` and a
        // direct request for the configured key resolve identically.
        PathResolution::Root => match path::normalize(&state.config.root_object) {
            PathResolution::Key(key) => (key, true),
            _ => {
                warn!("Root object unconfigured, root route disabled");
                return error_response(StatusCode::NOT_FOUND, "Not Found", is_head);
            }
        },
    };

    match state.store.get(&key).await {
        Ok(Some((bytes, metadata))) => {
            let content_type = if is_root {
                TEXT_PLAIN_UTF8
            } else {
                metadata.content_type.as_str()
            };
            return asset_response(content_type, bytes, is_head);
        }
        Ok(None) => {}
        Err(err) => {
            // A broken cache read is a miss; the mirror is still reachable.
            warn!(key = %key, error = %err, "Cache read failed, falling back to mirror");
        }
    }

    match state.fetcher.fetch(&key).await {
        Ok(FetchOutcome::Fetched {
            bytes,
            content_type,
        }) => {
            let stored_type = content_type::resolve(&key, content_type.as_deref());
            let response_type = if is_root {
                TEXT_PLAIN_UTF8
            } else {
                stored_type.as_str()
            };
            let response = asset_response(response_type, bytes.clone(), is_head);

            // Best-effort population for subsequent requests; never awaited
            // on the response path, and it runs to completion even if the
            // client goes away.
            tokio::spawn(async move {
                let metadata = AssetMetadata {
                    content_type: stored_type,
                };
                if let Err(err) = state
                    .store
                    .put(&key, &bytes, &metadata, ASSET_TTL_SECS)
                    .await
                {
                    warn!(key = %key, error = %err, "Failed to populate cache");
                }
            });

            response
        }
        Ok(FetchOutcome::NotFound) => {
            if is_root {
                error!(key = %key, "Configured root object missing from mirror");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    is_head,
                )
            } else {
                error_response(StatusCode::NOT_FOUND, "Not Found", is_head)
            }
        }
        Ok(FetchOutcome::UpstreamError { status }) => {
            warn!(key = %key, status, "Mirror returned an error status");
            error_response(StatusCode::BAD_GATEWAY, "Bad Gateway", is_head)
        }
        Err(err) => {
            warn!(key = %key, error = %err, "Mirror fetch failed");
            error_response(StatusCode::BAD_GATEWAY, "Bad Gateway", is_head)
        }
    }
}
