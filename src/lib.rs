//! Small static file server.
//!
//! Serves a directory over HTTP, optionally mounts a second copy under a
//! route prefix, appends a configured response header, answers a
//! `_version` endpoint and supports SPA fallback routing.

pub mod cli;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
