// Application state module
// Read-only state shared by every connection for the process lifetime

use std::path::PathBuf;

use super::error::ConfigError;
use super::types::Config;
use crate::logger;
use crate::routing::{HeaderDirective, RoutePrefix, RouteTable};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical static root, every served file must live beneath it
    pub static_root: PathBuf,
    pub routes: RouteTable,
    pub header: HeaderDirective,
}

impl AppState {
    /// Resolve the configuration into request-time state.
    ///
    /// Fails when the static root is missing or unreadable. A malformed
    /// header directive or an SPA route without a prefix only logs a warning.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let static_root = resolve_static_root(&config)?;

        let prefix = config
            .routes
            .route_prefix
            .as_deref()
            .and_then(RoutePrefix::normalize);
        let spa = config.routes.spa.as_deref().filter(|s| !s.trim().is_empty());
        let header = HeaderDirective::from_flag(config.routes.append_header.as_deref());

        for warning in startup_warnings(prefix.as_ref(), spa, &header) {
            logger::log_warning(&warning);
        }
        let routes = RouteTable::new(prefix, spa);

        Ok(Self {
            config,
            static_root,
            routes,
            header,
        })
    }
}

/// Routing options that are accepted but have no effect
fn startup_warnings(
    prefix: Option<&RoutePrefix>,
    spa: Option<&str>,
    header: &HeaderDirective,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if prefix.is_some_and(RoutePrefix::is_root) && spa.is_none() {
        warnings.push("routePrefix resolves to '/'; prefixed mount ignored.".to_string());
    }
    if spa.is_some() && prefix.is_none() {
        warnings.push("spa requires routePrefix; SPA route ignored.".to_string());
    }
    if let HeaderDirective::Invalid(raw) = header {
        warnings.push(format!("appendHeader misconfigured ('{raw}'); ignoring."));
    }
    warnings
}

fn resolve_static_root(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = &config.server.static_dir;
    let to_err = |source: std::io::Error| ConfigError::StaticDir {
        path: path.clone(),
        source,
    };

    let canonical = path.canonicalize().map_err(to_err)?;
    if !canonical.is_dir() {
        return Err(to_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    // Readability check, the listing itself is discarded
    std::fs::read_dir(&canonical).map_err(to_err)?;

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    fn config_for(dir: &std::path::Path) -> Config {
        Config {
            server: ServerConfig {
                static_dir: dir.to_path_buf(),
                ..ServerConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_state_resolves_routes_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.routes.route_prefix = Some("api".to_string());
        config.routes.spa = Some("app".to_string());
        config.routes.append_header = Some("X-Test:hello".to_string());

        let state = AppState::new(config).unwrap();
        assert_eq!(state.static_root, dir.path().canonicalize().unwrap());
        assert_eq!(state.routes.prefix.as_ref().unwrap().as_str(), "/api/");
        assert_eq!(state.routes.spa_mount.as_deref(), Some("/api/app"));
        assert!(matches!(state.header, HeaderDirective::Valid { .. }));
    }

    #[test]
    fn test_invalid_header_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.routes.append_header = Some("NoColonHere".to_string());

        let state = AppState::new(config).unwrap();
        assert_eq!(state.header, HeaderDirective::Invalid("NoColonHere".to_string()));
    }

    #[test]
    fn test_startup_warnings() {
        let invalid = HeaderDirective::from_flag(Some("NoColonHere"));
        assert_eq!(
            startup_warnings(None, None, &invalid),
            vec!["appendHeader misconfigured ('NoColonHere'); ignoring.".to_string()]
        );

        assert_eq!(
            startup_warnings(None, Some("app"), &HeaderDirective::Absent),
            vec!["spa requires routePrefix; SPA route ignored.".to_string()]
        );

        let root = RoutePrefix::normalize("/");
        assert_eq!(
            startup_warnings(root.as_ref(), None, &HeaderDirective::Absent),
            vec!["routePrefix resolves to '/'; prefixed mount ignored.".to_string()]
        );
        assert!(startup_warnings(root.as_ref(), Some("ui"), &HeaderDirective::Absent).is_empty());

        let api = RoutePrefix::normalize("api");
        let valid = HeaderDirective::from_flag(Some("X-Test:hello"));
        assert!(startup_warnings(api.as_ref(), Some("app"), &valid).is_empty());
    }

    #[test]
    fn test_missing_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("missing"));
        assert!(matches!(
            AppState::new(config),
            Err(ConfigError::StaticDir { .. })
        ));
    }

    #[test]
    fn test_static_dir_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            AppState::new(config_for(&file)),
            Err(ConfigError::StaticDir { .. })
        ));
    }
}
