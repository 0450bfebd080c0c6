//! Real-Time Stock Price API server.
//!
//! This binary serves `GET /stock/{symbol}` and a few static routes over HTTP. It
//! wires together:
//!
//! - `Args` — port, bind host, log file and browser binary, read once at startup.
//! - `Logging` — console and rotating-file logger, flushed on shutdown.
//! - `QuoteScraper` — per-request pipeline backed by `ChromiumFetcher`, which
//!   launches a headless browser for every lookup and closes it afterwards.
//!
//! Requests run as tasks on a single-threaded tokio runtime. The browser call is the
//! only point where a request yields, so slow scrapes never block `/health`.
//! Ctrl+C stops accepting connections, lets in-flight requests finish, and flushes
//! the log file.
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use quote_common::{QuoteError, Result};
use quote_server::QuoteScraper;
use quote_server::api;
use quote_server::config::Args;
use quote_server::crawler::ChromiumFetcher;
use quote_server::logging::Logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), QuoteError> {
    let args = Args::parse();
    let logging = Logging::init(&args.log_settings())?;

    let fetcher = Arc::new(ChromiumFetcher::new(args.chrome_executable.clone()));
    let scraper = Arc::new(QuoteScraper::new(fetcher));
    let routes = api::routes(scraper);

    let bind_addr = args.bind_addr()?;
    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal())
        .map_err(|e| QuoteError::Config(format!("failed to bind {}: {}", bind_addr, e)))?;

    info!("Real-Time Stock Price API listening on http://{}", addr);
    server.await;
    info!("Server stopped");

    logging.shutdown()
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
