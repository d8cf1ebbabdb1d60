// Connection handling module
// Serves one accepted TCP connection in its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single connection in a spawned task.
///
/// The connection gets HTTP/1.1 with keep-alive as configured and is cut
/// off once `performance.connection_timeout` seconds have passed (0 means
/// no limit).
pub fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let performance = &state.config.performance;
        let timeout = performance.connection_timeout;

        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
        );

        let result = if timeout == 0 {
            conn.await
        } else {
            match tokio::time::timeout(Duration::from_secs(timeout), conn).await {
                Ok(result) => result,
                Err(_) => {
                    logger::log_warning(&format!(
                        "Connection from {peer_addr} timed out after {timeout} seconds"
                    ));
                    return;
                }
            }
        };

        if let Err(err) = result {
            logger::log_connection_error(&err);
        }
    });
}
