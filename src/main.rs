use crate::config::{BackendMode, Settings};
use crate::console::Console;
use crate::gateway::{ProposalGateway, StaticToken};
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod backend;
mod config;
mod console;
mod domain;
mod errors;
mod fixtures;
mod gateway;
mod params;
mod responses;
mod router;
mod templates;
mod wizard;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2️⃣ Settings from the environment (and .env)
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // 3️⃣ Pick the backend
    let console = match settings.backend {
        BackendMode::Fixtures => {
            tracing::info!("serving built-in sample proposals");
            Console::with_fixtures()
        }
        BackendMode::Remote => {
            let credentials = Arc::new(StaticToken::new(settings.api_token.clone()));
            match ProposalGateway::new(settings.api_base_url.clone(), credentials, settings.http_timeout) {
                Ok(gateway) => {
                    tracing::info!(api = %settings.api_base_url, "using remote proposals API");
                    Console::new(Box::new(gateway))
                }
                Err(e) => {
                    tracing::error!(error = %e, "could not build API client");
                    std::process::exit(1);
                }
            }
        }
    };

    // 4️⃣ Start the server
    let addr = settings.bind_addr;
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(settings.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &console) {
        Ok(resp) => resp,
        Err(err) => responses::error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
