//! Local CDN mirror.
//!
//! A single-hop forwarder that rewrites a fixed set of local path prefixes
//! to their upstream CDN bases, so the packages the game pulls from the
//! public CDN also resolve when only localhost is reachable. No caching,
//! no retries; CORS headers on forwarded responses are always overwritten
//! permissively.

use anyhow::Context;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8001;
const PORT_ENV: &str = "ORC_PROXY_PORT";

/// Local prefix -> upstream base. First match wins.
const CDN_MAPPINGS: [(&str, &str); 2] = [
    (
        "/wllama/",
        "https://cdn.jsdelivr.net/npm/@wllama/wllama@2.3.2/esm/",
    ),
    (
        "/coi-serviceworker/",
        "https://cdn.jsdelivr.net/npm/coi-serviceworker@0.1.9/",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var(PORT_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("building forwarding client")?;

    let app = Router::new().fallback(forward).with_state(client);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("binding port {port}"))?;

    info!("CDN proxy running on http://localhost:{port}");
    info!("Available: /wllama/ and /coi-serviceworker/");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn forward(
    State(client): State<reqwest::Client>,
    method: Method,
    uri: Uri,
    request_headers: HeaderMap,
) -> Response {
    if method == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_cors(response.headers_mut());
        return response;
    }

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let Some(target) = resolve_target(path) else {
        warn!("{method} {path} -> 404 (unmapped)");
        return (StatusCode::NOT_FOUND, "CDN path not found").into_response();
    };

    info!("{method} {path} -> {target}");

    let user_agent = header_or(&request_headers, header::USER_AGENT, "Mozilla/5.0");
    let accept = header_or(&request_headers, header::ACCEPT, "*/*");

    let upstream = match client
        .get(&target)
        .header(header::USER_AGENT, user_agent)
        .header(header::ACCEPT, accept)
        .send()
        .await
    {
        Ok(upstream) => upstream,
        Err(e) => return proxy_error(e),
    };

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if passes_through(name) {
            response_headers.insert(name.clone(), value.clone());
        }
    }
    apply_cors(&mut response_headers);

    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(e) => return proxy_error(e),
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}

/// Rewrite a local request path to its upstream URL.
fn resolve_target(path: &str) -> Option<String> {
    CDN_MAPPINGS.iter().find_map(|(prefix, base)| {
        path.strip_prefix(prefix)
            .map(|remaining| format!("{base}{remaining}"))
    })
}

/// Upstream headers are passed through, except CORS (always overwritten)
/// and framing headers that no longer apply to the re-materialized body.
fn passes_through(name: &HeaderName) -> bool {
    let name = name.as_str();
    !name.starts_with("access-control-")
        && name != "transfer-encoding"
        && name != "connection"
        && name != "content-length"
}

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        header::HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        header::HeaderValue::from_static("Origin, X-Requested-With, Content-Type, Accept"),
    );
}

fn header_or(headers: &HeaderMap, name: HeaderName, fallback: &'static str) -> String {
    headers
        .get(&name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback)
        .to_string()
}

fn proxy_error(e: reqwest::Error) -> Response {
    warn!("proxy error: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Proxy error: {e}"),
    )
        .into_response()
}
