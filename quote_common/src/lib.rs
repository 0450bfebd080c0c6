//!
//! Common types shared by the stock price API server and its tests.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `symbol` — ticker symbol normalization.
//! - `quote` — JSON bodies returned by the HTTP API.
//! - `schema` — CSS extraction schema describing where the price lives on the page.
//! - `policy` — browser session policy and per-crawl directives.
//! - `net` — networking defaults and quote page URL construction.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod policy;
pub mod quote;
pub mod result;
pub mod schema;
pub mod symbol;

pub use error::{NotFoundReason, QuoteError};
pub use quote::StockQuote;
pub use result::Result;
pub use symbol::Symbol;
