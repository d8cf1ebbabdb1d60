//! Conditional request module
//!
//! Provides `ETag` / `Last-Modified` validators and `304` decisions.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// IMF-fixdate layout used by `Last-Modified` and `If-Modified-Since`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Validators of a served file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Quoted entity tag, e.g. `"abc123def"`
    pub etag: String,
    /// Formatted HTTP date, absent when the filesystem has no mtime
    pub last_modified: Option<String>,
    modified: Option<DateTime<Utc>>,
}

impl Validators {
    pub fn new(content: &[u8], modified: Option<SystemTime>) -> Self {
        let modified = modified.map(DateTime::<Utc>::from);
        Self {
            etag: generate_etag(content),
            last_modified: modified.map(|m| format_http_date(&m)),
            modified,
        }
    }

    /// Whether the request's validators allow a `304 Not Modified`.
    ///
    /// `If-None-Match` takes precedence; `If-Modified-Since` is only
    /// consulted when it is absent.
    pub fn is_not_modified(
        &self,
        if_none_match: Option<&str>,
        if_modified_since: Option<&str>,
    ) -> bool {
        if if_none_match.is_some() {
            return check_etag_match(if_none_match, &self.etag);
        }

        let (Some(since), Some(modified)) = (if_modified_since, self.modified) else {
            return false;
        };
        parse_http_date(since).is_some_and(|since| modified.timestamp() <= since.timestamp())
    }
}

/// Generate `ETag` using fast hashing
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single tag, a comma-separated list, weak tags and `*`.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').map(str::trim).any(|e| {
            e == "*" || e == etag || e.strip_prefix("W/").is_some_and(|weak| weak == etag)
        })
    })
}

pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
