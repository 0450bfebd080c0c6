//! Real-Time Stock Price API.
//!
//! A small HTTP service that reads the live price of a ticker from its Yahoo
//! Finance quote page. The crate is organised around one request pipeline:
//!
//! - `api` — warp routes, CORS and error translation.
//! - `quote_scraper` — the orchestrator: URL, single collaborator call, payload
//!   classification.
//! - `crawler` — the browser/extraction collaborator behind the `PageFetcher` trait.
//! - `config` — command-line/environment configuration read once at startup.
//! - `logging` — console plus size-rotated file logging.
#![warn(missing_docs)]
pub mod api;
pub mod config;
pub mod crawler;
pub mod logging;
pub mod quote_scraper;

pub use quote_scraper::QuoteScraper;
