//! SPA fallback module
//!
//! Existing files under the static root are served as-is; every other path
//! below the SPA mount gets `index.html` so client-side routing can run.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;

use super::router::RequestContext;
use super::static_files::{self, Resolved, INDEX_FILE};

/// Serve `remainder`, the request path below the SPA mount point
pub async fn serve_spa(
    ctx: &RequestContext<'_>,
    root: &Path,
    remainder: &str,
) -> Response<Full<Bytes>> {
    let index = root.join(INDEX_FILE);
    if remainder.is_empty() || remainder == "/" {
        return static_files::serve_file(ctx, &index).await;
    }

    match static_files::resolve_path(root, remainder).await {
        Some(Resolved::File(path)) => static_files::serve_file(ctx, &path).await,
        Some(Resolved::Directory(_)) | None => static_files::serve_file(ctx, &index).await,
    }
}
