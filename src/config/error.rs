// Startup error module
// Errors that stop the server before it starts listening

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    /// Layered configuration could not be built or deserialized
    Load(config::ConfigError),
    /// Port 0 is not a usable listening port
    InvalidPort,
    /// `server.workers` set to 0
    InvalidWorkers,
    InvalidAddress(String),
    /// Static root missing, not a directory, or unreadable
    StaticDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Failed to load configuration: {e}"),
            Self::InvalidPort => write!(f, "Invalid port: must be between 1 and 65535"),
            Self::InvalidWorkers => write!(f, "Invalid worker count: must be at least 1"),
            Self::InvalidAddress(e) => write!(f, "Invalid address: {e}"),
            Self::StaticDir { path, source } => write!(
                f,
                "Static directory '{}' is not usable: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::StaticDir { source, .. } => Some(source),
            Self::InvalidPort | Self::InvalidWorkers | Self::InvalidAddress(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        Self::Load(e)
    }
}
