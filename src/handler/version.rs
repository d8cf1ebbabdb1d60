//! Version endpoint
//!
//! Serves the version descriptor from the static root. The representation
//! is picked from the request's `Content-Type` header, not `Accept`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;

use super::router::RequestContext;
use super::static_files;

pub const VERSION_JSON: &str = "_version.json";
pub const VERSION_HTML: &str = "_version.html";

/// Descriptor file answering a request with the given `Content-Type`
pub fn version_file(content_type: Option<&str>) -> &'static str {
    if content_type == Some("application/json") {
        VERSION_JSON
    } else {
        VERSION_HTML
    }
}

pub async fn serve_version(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    let file = root.join(version_file(ctx.content_type));
    static_files::serve_file(ctx, &file).await
}
