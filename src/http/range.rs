//! HTTP Range request parsing module
//!
//! Single `bytes` range only, per RFC 7233. Multi-range requests are
//! answered with the full body.

/// Inclusive byte range resolved against a body length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn content_length(&self) -> usize {
        self.end - self.start + 1
    }

    /// `Content-Range` header value
    pub fn content_range(&self, total: usize) -> String {
        format!("bytes {}-{}/{total}", self.start, self.end)
    }
}

/// Range header parse result
#[derive(Debug, PartialEq, Eq)]
pub enum RangeParseResult {
    /// Serve `206` with this range
    Valid(ByteRange),
    /// Serve `416`
    NotSatisfiable,
    /// No Range header or one we ignore; serve the full body
    None,
}

/// Parse a `Range` header against a body of `total` bytes
///
/// Accepts `bytes=start-end`, `bytes=start-` and `bytes=-suffix`.
pub fn parse_range_header(range_header: Option<&str>, total: usize) -> RangeParseResult {
    let Some(spec) = range_header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeParseResult::None;
    };
    if spec.contains(',') {
        return RangeParseResult::None;
    }
    let Some((first, last)) = spec.split_once('-') else {
        return RangeParseResult::None;
    };
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        // Suffix form: the final `last` bytes
        return match last.parse::<usize>() {
            Ok(0) => RangeParseResult::NotSatisfiable,
            Ok(_) if total == 0 => RangeParseResult::NotSatisfiable,
            Ok(n) => RangeParseResult::Valid(ByteRange {
                start: total.saturating_sub(n),
                end: total - 1,
            }),
            Err(_) => RangeParseResult::None,
        };
    }

    let Ok(start) = first.parse::<usize>() else {
        return RangeParseResult::None;
    };
    if start >= total {
        return RangeParseResult::NotSatisfiable;
    }

    let end = if last.is_empty() {
        total - 1
    } else {
        match last.parse::<usize>() {
            Ok(end) if end < start => return RangeParseResult::NotSatisfiable,
            Ok(end) => end.min(total - 1),
            Err(_) => return RangeParseResult::None,
        }
    };

    RangeParseResult::Valid(ByteRange { start, end })
}
