//! Route matching module
//!
//! Picks exactly one responder for a request path.

use super::prefix::RoutePrefix;

const VERSION_PATH: &str = "/_version";

/// Responder selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `_version` endpoint
    Version,
    /// SPA fallback, with the path left after the mount point
    Spa { remainder: &'a str },
    /// Static files under the route prefix, with the prefix removed
    Prefixed { stripped: &'a str },
    /// Static files from the root with header injection
    Generic,
}

/// Immutable routing table built at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    pub prefix: Option<RoutePrefix>,
    /// SPA mount point (prefix + SPA route), set only when a prefix exists
    pub spa_mount: Option<String>,
}

impl RouteTable {
    pub fn new(prefix: Option<RoutePrefix>, spa: Option<&str>) -> Self {
        let spa_mount = match (&prefix, spa.filter(|s| !s.trim().is_empty())) {
            (Some(prefix), Some(spa)) => Some(prefix.spa_mount(spa.trim())),
            _ => None,
        };
        Self { prefix, spa_mount }
    }
}

/// Find the responder for a path, most specific rule first
pub fn match_route<'a>(path: &'a str, table: &RouteTable) -> Route<'a> {
    if path == VERSION_PATH {
        return Route::Version;
    }

    let Some(prefix) = &table.prefix else {
        return Route::Generic;
    };

    if path == prefix.version_path() {
        return Route::Version;
    }

    if let Some(mount) = &table.spa_mount {
        if let Some(remainder) = strip_mount(path, mount) {
            return Route::Spa { remainder };
        }
        return Route::Generic;
    }

    if !prefix.is_root() && path.starts_with(prefix.as_str()) {
        let stripped = &path[prefix.strip_target().len()..];
        return Route::Prefixed { stripped };
    }

    Route::Generic
}

/// Match `mount` or `mount/...` and return what follows the mount point
fn strip_mount<'a>(path: &'a str, mount: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(mount)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
