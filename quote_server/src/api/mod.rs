//! HTTP surface.
//!
//! | Route | Reply |
//! |---|---|
//! | `GET /` | welcome message |
//! | `GET /health` | `{"status": "healthy"}`, never touches the browser |
//! | `GET /stock/{symbol}` | `{"symbol", "price"}` or `{"detail"}` with 404/500 |
//! | `GET /openapi.json` | OpenAPI document |
//! | `GET /docs` | Swagger UI for the document |
//!
//! Unmatched requests are recovered into JSON `detail` bodies before CORS is
//! applied, so error replies carry the same CORS headers as successes.
use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::quote_scraper::QuoteScraper;

pub mod handlers;
pub mod openapi;

/// Request headers accepted from browsers.
const ALLOWED_HEADERS: &[&str] = &[
    "accept",
    "accept-language",
    "authorization",
    "content-type",
    "origin",
    "x-requested-with",
    "x-rapidapi-host",
    "x-rapidapi-key",
];

/// All routes with rejection recovery and CORS applied.
pub fn routes(
    scraper: Arc<QuoteScraper>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let root = warp::path::end().and(warp::get()).map(handlers::welcome);

    let health = warp::path!("health")
        .and(warp::get())
        .map(handlers::health);

    let stock = warp::path!("stock" / String)
        .and(warp::get())
        .and(with_scraper(scraper))
        .and_then(handlers::stock_price);

    let openapi_json = warp::path!("openapi.json")
        .and(warp::get())
        .map(handlers::openapi_document);

    let docs = warp::path!("docs").and(warp::get()).map(handlers::docs);

    root.or(health)
        .or(stock)
        .or(openapi_json)
        .or(docs)
        .recover(handlers::handle_rejection)
        .with(cors())
}

/// Permissive read-only CORS: any origin, `GET` only, credentials allowed.
pub fn cors() -> warp::cors::Cors {
    warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET"])
        .allow_headers(ALLOWED_HEADERS.to_vec())
        .allow_credentials(true)
        .build()
}

fn with_scraper(
    scraper: Arc<QuoteScraper>,
) -> impl Filter<Extract = (Arc<QuoteScraper>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&scraper))
}
