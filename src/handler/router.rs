//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, header injection and access logging.

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::http::request::Parts;
use hyper::{header, HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::{spa, static_files, version};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{match_route, Route};

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone, Default)]
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    /// Request `Content-Type`, selects the version representation
    pub content_type: Option<&'a str>,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
    pub range: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        let headers = &parts.headers;
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            content_type: header_str(headers, header::CONTENT_TYPE),
            if_none_match: header_str(headers, header::IF_NONE_MATCH),
            if_modified_since: header_str(headers, header::IF_MODIFIED_SINCE),
            range: header_str(headers, header::RANGE),
        }
    }

    #[cfg(test)]
    pub fn for_path(path: &'a str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let logging = &state.config.logging;

    logger::log_request(
        &parts.method,
        &parts.uri,
        parts.version,
        &parts.headers,
        logging.show_headers,
    );

    let response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext::from_parts(&parts);
            route_request(&ctx, &state).await
        }
    };

    if logging.access_log {
        let entry = access_log_entry(&parts, &response, peer_addr, started);
        logger::log_access(&entry, logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Dispatch to exactly one responder
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let root = state.static_root.as_path();
    match match_route(ctx.path, &state.routes) {
        Route::Version => version::serve_version(ctx, root).await,
        Route::Spa { remainder } => spa::serve_spa(ctx, root, remainder).await,
        Route::Prefixed { stripped } => static_files::serve_path(ctx, root, stripped).await,
        Route::Generic => serve_generic(ctx, state).await,
    }
}

/// Static files from the root with the configured header set on the response
async fn serve_generic(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let mut response = static_files::serve_path(ctx, &state.static_root, ctx.path).await;
    state.header.apply(response.headers_mut());
    response
}

/// Header value as text; non-ASCII values count as absent
fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn access_log_entry(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version);
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or_default();
    entry.referer = header_str(&parts.headers, header::REFERER).map(ToString::to_string);
    entry.user_agent = header_str(&parts.headers, header::USER_AGENT).map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ServerConfig};
    use http_body_util::BodyExt;

    struct Site {
        _dir: tempfile::TempDir,
        state: Arc<AppState>,
    }

    fn site(prefix: Option<&str>, spa: Option<&str>, append_header: Option<&str>) -> Site {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "hi").unwrap();
        std::fs::write(dir.path().join("about.html"), "about").unwrap();
        std::fs::write(dir.path().join("_version.json"), r#"{"v":1}"#).unwrap();
        std::fs::write(dir.path().join("_version.html"), "v1").unwrap();

        let mut config = Config {
            server: ServerConfig {
                static_dir: dir.path().to_path_buf(),
                ..ServerConfig::default()
            },
            ..Config::default()
        };
        config.logging.access_log = false;
        config.routes.route_prefix = prefix.map(ToString::to_string);
        config.routes.spa = spa.map(ToString::to_string);
        config.routes.append_header = append_header.map(ToString::to_string);

        Site {
            _dir: dir,
            state: Arc::new(AppState::new(config).unwrap()),
        }
    }

    async fn get(site: &Site, path: &str, headers: &[(&str, &str)]) -> (Response<()>, Bytes) {
        request(site, Method::GET, path, headers).await
    }

    async fn request(
        site: &Site,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> (Response<()>, Bytes) {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = builder.body(()).unwrap();
        let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        let resp = handle_request(req, Arc::clone(&site.state), peer)
            .await
            .unwrap();
        let (parts, body) = resp.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        (Response::from_parts(parts, ()), bytes)
    }

    #[tokio::test]
    async fn test_generic_handler_serves_root() {
        let site = site(None, None, None);
        let (resp, body) = get(&site, "/index.html", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "hi");

        let (resp, body) = get(&site, "/", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "hi");

        let (resp, _) = get(&site, "/missing.txt", &[]).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_version_by_content_type() {
        let site = site(None, None, None);
        let (_, body) = get(&site, "/_version", &[("content-type", "application/json")]).await;
        assert_eq!(body, r#"{"v":1}"#);

        let (_, body) = get(&site, "/_version", &[("content-type", "text/plain")]).await;
        assert_eq!(body, "v1");

        // Accept is not consulted
        let (_, body) = get(&site, "/_version", &[("accept", "application/json")]).await;
        assert_eq!(body, "v1");
    }

    #[tokio::test]
    async fn test_prefixed_routes() {
        let site = site(Some("api"), None, Some("X-Test:hello"));

        let (resp, body) = get(&site, "/api/about.html", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "about");
        assert!(resp.headers().get("x-test").is_none());

        let (_, body) = get(&site, "/api/_version", &[("content-type", "application/json")]).await;
        assert_eq!(body, r#"{"v":1}"#);

        // The unprefixed tree stays available
        let (resp, body) = get(&site, "/about.html", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "about");
    }

    #[tokio::test]
    async fn test_spa_route() {
        let site = site(Some("/web/"), Some("app"), None);

        let (resp, body) = get(&site, "/web/app/some/client/route", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "hi");

        let (_, body) = get(&site, "/web/app/about.html", &[]).await;
        assert_eq!(body, "about");

        let (_, body) = get(&site, "/web/app", &[]).await;
        assert_eq!(body, "hi");
    }

    #[tokio::test]
    async fn test_header_injection() {
        let site = site(None, None, Some("X-Test:hello"));

        let (resp, _) = get(&site, "/", &[]).await;
        assert_eq!(resp.headers()["x-test"], "hello");

        let (resp, _) = get(&site, "/missing", &[]).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["x-test"], "hello");

        // The version endpoint is not wrapped
        let (resp, _) = get(&site, "/_version", &[]).await;
        assert!(resp.headers().get("x-test").is_none());
    }

    #[tokio::test]
    async fn test_root_prefix_keeps_header_injection() {
        let site = site(Some("/"), None, Some("X-Test:hello"));

        let (resp, body) = get(&site, "/index.html", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "hi");
        assert_eq!(resp.headers()["x-test"], "hello");
    }

    #[tokio::test]
    async fn test_malformed_header_still_serves_body() {
        let site = site(None, None, Some("NoColonHere"));
        assert_eq!(
            site.state.header,
            crate::routing::HeaderDirective::Invalid("NoColonHere".to_string())
        );

        let (resp, body) = get(&site, "/index.html", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body, "hi");
        assert!(resp.headers().get("nocolonhere").is_none());
    }

    #[tokio::test]
    async fn test_methods() {
        let site = site(None, None, None);

        let (resp, body) = request(&site, Method::HEAD, "/index.html", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-length"], "2");
        assert!(body.is_empty());

        let (resp, _) = request(&site, Method::OPTIONS, "/", &[]).await;
        assert_eq!(resp.status(), 204);

        let (resp, _) = request(&site, Method::POST, "/index.html", &[]).await;
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_context_from_parts() {
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/a/b.txt?x=1")
            .header("content-type", "application/json")
            .header("range", "bytes=0-1")
            .body(())
            .unwrap();
        let (parts, ()) = req.into_parts();
        let ctx = RequestContext::from_parts(&parts);
        assert_eq!(ctx.path, "/a/b.txt");
        assert_eq!(ctx.query, Some("x=1"));
        assert!(ctx.is_head);
        assert_eq!(ctx.content_type, Some("application/json"));
        assert_eq!(ctx.range, Some("bytes=0-1"));
        assert!(ctx.if_none_match.is_none());
    }
}
