//! Lychgate JSON API Server

use std::process;

use salvo::{
    affix_state::inject, oapi::OpenApi, oapi::swagger_ui::SwaggerUi, prelude::*,
    trailing_slash::remove_slash,
};
use tracing::error;

use lychgate_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod config;
mod detect;
mod extensions;
mod healthcheck;
mod home;
mod logging;
mod router;
mod shutdown;
mod state;
mod tenants;
#[cfg(test)]
mod test_helpers;

/// Lychgate JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    if let Err(e) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_config(config.app_config()) {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    tracing::info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let doc = OpenApi::new("Lychgate API", "0.3.0").merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
