use std::sync::Arc;

use static_httpd::cli::Cli;
use static_httpd::config::{AppState, Config};
use static_httpd::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let cfg = Config::load(&cli).inspect_err(|e| logger::log_error(&e.to_string()))?;
    logger::init(&cfg.logging)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg).inspect_err(|e| logger::log_error(&e.to_string()))?);

    let listener = server::create_listener(addr).inspect_err(|e| logger::log_bind_failed(&addr, e))?;
    logger::log_server_start(&addr, &state);

    server::run(listener, state, server::shutdown_signal()).await;
    Ok(())
}
