//! Command-line interface
//!
//! Flags keep their historical single-dash spelling (`-static=/srv/http`,
//! `-routePrefix api`). [`normalize_args`] rewrites them into the
//! double-dash form clap expects before parsing.

use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "static-httpd", version, about = "Small static file server")]
pub struct Cli {
    /// The listening port
    #[arg(short = 'p', long = "port", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// The path for the static files
    #[arg(long = "static", value_name = "DIR")]
    pub static_dir: Option<String>,

    /// The route path prefix for the static files
    #[arg(long = "routePrefix", value_name = "PREFIX")]
    pub route_prefix: Option<String>,

    /// HTTP response header added to all responses of the generic handler
    #[arg(long = "appendHeader", value_name = "HeaderName:Value")]
    pub append_header: Option<String>,

    /// SPA route, mounted below the route prefix
    #[arg(long = "spa", value_name = "ROUTE")]
    pub spa: Option<String>,

    /// Optional configuration file (TOML, YAML or JSON)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<String>,
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-name[=value]` into `--name[=value]` for multi-letter names.
///
/// Single-letter flags (`-p`, `-h`, `-V`), double-dash flags, a bare `-` and
/// anything after `--` pass through unchanged.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if name.chars().count() > 1 {
                        OsString::from(format!("-{s}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
