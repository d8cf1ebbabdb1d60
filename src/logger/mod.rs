//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use chrono::Local;
use hyper::{HeaderMap, Method, Uri, Version};
use std::net::SocketAddr;

use crate::config::{AccessLogFormat, AppState, LogLevel, LoggingConfig};

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
        config.level,
    )
}

fn timestamp() -> String {
    Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Write to info log
fn write_info(message: &str) {
    let line = format!("{} {message}", timestamp());
    match writer::get() {
        Some(w) => w.write_info(&line),
        None => println!("{line}"),
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    let line = format!("{} {message}", timestamp());
    match writer::get() {
        Some(w) => w.write_error(level, &line),
        None => eprintln!("{line}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    write_info(&format!("Listening at {addr}..."));
    write_info(&format!(
        "Serving static files from {}",
        state.static_root.display()
    ));
    if let Some(prefix) = &state.routes.prefix {
        write_info(&format!("Route prefix: {prefix}"));
    }
    if let Some(mount) = &state.routes.spa_mount {
        write_info(&format!("SPA route: {mount}"));
    }
    if let Some(workers) = state.config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = state.config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = state.config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
}

/// Log an incoming request, with its headers when `show_headers` is set
pub fn log_request(
    method: &Method,
    uri: &Uri,
    version: Version,
    headers: &HeaderMap,
    show_headers: bool,
) {
    let debug = writer::get().is_some_and(|w| w.enabled(LogLevel::Debug));
    if !debug && !show_headers {
        return;
    }
    let host = headers
        .get(hyper::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    if show_headers {
        write_info(&format!(
            "[Request] {version:?} {method} {host} {uri} [HEADERS]: {headers:?}"
        ));
    } else {
        write_info(&format!("[Request] {version:?} {method} {host} {uri}"));
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: AccessLogFormat) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Failed to bind {addr}: {err}"));
}

pub fn log_shutdown() {
    write_info("Shutdown signal received, no longer accepting connections");
}
