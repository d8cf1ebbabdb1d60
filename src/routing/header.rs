//! Response header directive
//!
//! Turns the `Name:Value` string from the command line into a header the
//! generic handler sets on every response it produces.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// Split a header directive at its first colon.
///
/// Never fails: an empty input gives two empty halves and an input without
/// a colon gives an empty value. Callers treat either empty half as "no
/// directive".
pub fn parse_header_flag(raw: &str) -> (&str, &str) {
    if raw.is_empty() {
        return ("", "");
    }
    raw.split_once(':').unwrap_or((raw, ""))
}

/// Resolved header directive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderDirective {
    /// Nothing configured
    #[default]
    Absent,
    /// Header set on every generic response
    Valid { name: HeaderName, value: HeaderValue },
    /// Configured but unusable, keeps the raw string for the warning
    Invalid(String),
}

impl HeaderDirective {
    /// Resolve the configured directive once at startup
    pub fn from_flag(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return Self::Absent;
        };

        let (name, value) = parse_header_flag(raw);
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            return Self::Invalid(raw.to_string());
        }

        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => Self::Valid { name, value },
            _ => Self::Invalid(raw.to_string()),
        }
    }

    /// Set the header on a response if the directive is usable
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Self::Valid { name, value } = self {
            headers.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_header_flag(""), ("", ""));
    }

    #[test]
    fn test_parse_without_colon() {
        assert_eq!(parse_header_flag("NoColonHere"), ("NoColonHere", ""));
        assert_eq!(parse_header_flag("X"), ("X", ""));
    }

    #[test]
    fn test_parse_splits_at_first_colon() {
        assert_eq!(parse_header_flag("A:B:C"), ("A", "B:C"));
        assert_eq!(parse_header_flag("X-Test:hello"), ("X-Test", "hello"));
        assert_eq!(parse_header_flag(":value"), ("", "value"));
        assert_eq!(parse_header_flag("name:"), ("name", ""));
    }

    #[test]
    fn test_directive_valid() {
        let directive = HeaderDirective::from_flag(Some("X-Test:hello"));
        let mut headers = HeaderMap::new();
        directive.apply(&mut headers);
        assert_eq!(headers.get("x-test").unwrap(), "hello");
    }

    #[test]
    fn test_directive_trims_value() {
        let directive = HeaderDirective::from_flag(Some("Cache-Control: no-cache"));
        let mut headers = HeaderMap::new();
        directive.apply(&mut headers);
        assert_eq!(headers.get("cache-control").unwrap(), "no-cache");
    }

    #[test]
    fn test_directive_invalid() {
        for raw in ["NoColonHere", ":value", "name:", "name:   ", "bad name:v"] {
            let directive = HeaderDirective::from_flag(Some(raw));
            assert!(
                matches!(directive, HeaderDirective::Invalid(_)),
                "{raw} should be invalid"
            );

            let mut headers = HeaderMap::new();
            directive.apply(&mut headers);
            assert!(headers.is_empty());
        }
    }

    #[test]
    fn test_directive_absent() {
        assert_eq!(HeaderDirective::from_flag(None), HeaderDirective::Absent);
        assert_eq!(HeaderDirective::from_flag(Some("")), HeaderDirective::Absent);
    }
}
