// Configuration module entry point
// Layers defaults, an optional config file, the environment and CLI flags
// into one immutable configuration

mod error;
mod state;
mod types;

use std::net::SocketAddr;

use crate::cli::Cli;

// Re-export public types
pub use error::ConfigError;
pub use state::AppState;
pub use types::{
    AccessLogFormat, Config, LogLevel, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STATIC_DIR,
};

/// Environment variable prefix, e.g. `STATIC_SERVER__PORT=8080`
const ENV_PREFIX: &str = "STATIC";

impl Config {
    /// Build the configuration for a parsed command line.
    ///
    /// Precedence, lowest first: built-in defaults, the `-config` file,
    /// `STATIC_*` environment variables, command-line flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.static_dir", DEFAULT_STATIC_DIR)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", DEFAULT_CONNECTION_TIMEOUT)?;

        if let Some(path) = cli.config.as_deref() {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.static_dir", cli.static_dir.clone())?
            .set_override_option("routes.route_prefix", cli.route_prefix.clone())?
            .set_override_option("routes.append_header", cli.append_header.clone())?
            .set_override_option("routes.spa", cli.spa.clone())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.server.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::InvalidAddress(format!("{e}")))
    }
}
