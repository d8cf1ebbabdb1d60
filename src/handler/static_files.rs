//! Static file serving module
//!
//! Maps request paths beneath the static root and builds file, directory
//! listing and conditional responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use mime_guess::mime;
use percent_encoding::percent_decode_str;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::listing;
use super::router::RequestContext;
use crate::http::{self, RangeParseResult, Validators};
use crate::logger;
use crate::routing::clean_path;

pub const INDEX_FILE: &str = "index.html";

/// Filesystem entry a request path resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
}

/// Resolve a URL path beneath `root`.
///
/// `root` must already be canonical. The path is percent-decoded once and
/// cleaned lexically, then the target is canonicalized so symlinks cannot
/// lead outside the root. A trailing slash only matches directories.
/// Returns `None` for anything missing or rejected.
pub async fn resolve_path(root: &Path, request_path: &str) -> Option<Resolved> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let cleaned = clean_path(&format!("/{decoded}"));
    let candidate = root.join(cleaned.trim_start_matches('/'));

    // Not found is the common case, no need to log it
    let canonical = fs::canonicalize(&candidate).await.ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }

    let metadata = fs::metadata(&canonical).await.ok()?;
    if metadata.is_dir() {
        Some(Resolved::Directory(canonical))
    } else if metadata.is_file() && !request_path.ends_with('/') {
        Some(Resolved::File(canonical))
    } else {
        None
    }
}

/// Serve `request_path` from the static root.
///
/// Directories without a trailing slash redirect to the slash form; with
/// one they serve `index.html` or fall back to a listing.
pub async fn serve_path(
    ctx: &RequestContext<'_>,
    root: &Path,
    request_path: &str,
) -> Response<Full<Bytes>> {
    match resolve_path(root, request_path).await {
        Some(Resolved::File(path)) => serve_file(ctx, &path).await,
        Some(Resolved::Directory(dir)) => {
            if !request_path.ends_with('/') {
                return http::build_moved_permanently_response(&directory_redirect(ctx));
            }

            let index = dir.join(INDEX_FILE);
            if fs::metadata(&index).await.is_ok_and(|m| m.is_file()) {
                return serve_file(ctx, &index).await;
            }

            match listing::render(&dir, ctx.path).await {
                Ok(html) => http::build_html_response(html, ctx.is_head),
                Err(e) => {
                    logger::log_error(&format!(
                        "Failed to list directory '{}': {e}",
                        dir.display()
                    ));
                    http::build_404_response()
                }
            }
        }
        None => http::build_404_response(),
    }
}

/// Serve a single file with validators, conditional and range handling
pub async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let data = match fs::read(path).await {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            }
            return http::build_404_response();
        }
    };

    let modified = fs::metadata(path)
        .await
        .ok()
        .and_then(|m| m.modified().ok());
    let validators = Validators::new(&data, modified);

    if validators.is_not_modified(ctx.if_none_match, ctx.if_modified_since) {
        return http::build_304_response(&validators);
    }

    let content_type = content_type_for(path);
    match http::parse_range_header(ctx.range, data.len()) {
        RangeParseResult::Valid(range) => {
            http::build_partial_response(&data, range, &content_type, &validators, ctx.is_head)
        }
        RangeParseResult::NotSatisfiable => http::build_416_response(data.len()),
        RangeParseResult::None => {
            http::build_file_response(data, &content_type, &validators, ctx.is_head)
        }
    }
}

/// Content-Type from the file extension; text types carry a UTF-8 charset
fn content_type_for(path: &Path) -> String {
    let guess = mime_guess::from_path(path).first_or_octet_stream();
    if guess.type_() == mime::TEXT && guess.get_param(mime::CHARSET).is_none() {
        format!("{guess}; charset=utf-8")
    } else {
        guess.to_string()
    }
}

/// Relative `Location` adding the missing slash, query preserved
fn directory_redirect(ctx: &RequestContext<'_>) -> String {
    let base = ctx.path.rsplit('/').next().unwrap_or_default();
    match ctx.query {
        Some(q) => format!("{base}/?{q}"),
        None => format!("{base}/"),
    }
}
