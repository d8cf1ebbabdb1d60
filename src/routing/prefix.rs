//! Route prefix and SPA mount normalization

/// Lexically clean a slash-separated path.
///
/// Collapses repeated slashes, drops `.` segments and resolves `..` against
/// the preceding segment. A rooted path never climbs above `/`. An empty
/// unrooted result is `.`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// URL prefix under which a second copy of the static tree is mounted.
///
/// Always starts and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePrefix(String);

impl RoutePrefix {
    /// Normalize a configured prefix; empty means no prefix
    pub fn normalize(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let mut prefix = clean_path(&format!("/{}", raw.trim()));
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Some(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `/` mounts the same tree as the generic route, which takes precedence
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Prefix as removed from request paths before the file lookup
    pub fn strip_target(&self) -> &str {
        self.0.trim_end_matches('/')
    }

    /// Path of the version endpoint under this prefix
    pub fn version_path(&self) -> String {
        format!("{}_version", self.0)
    }

    /// Mount point of an SPA route below this prefix, without trailing slash
    pub fn spa_mount(&self, spa: &str) -> String {
        let spa = clean_path(&format!("/{spa}"));
        format!("{}{}", self.strip_target(), spa.trim_end_matches('/'))
    }
}

impl std::fmt::Display for RoutePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
