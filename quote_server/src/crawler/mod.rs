//! Browser/extraction collaborator.
//!
//! The scrape orchestrator only ever sees the [`PageFetcher`] trait: one call that
//! loads a page, applies the session policy and crawl directives, runs the
//! extraction schema and hands back the raw JSON payload. The production
//! implementation is [`ChromiumFetcher`]; tests substitute scripted fetchers.
//!
//! - `browser` — per-request Chromium session driven over CDP.
//! - `extract` — evaluation of an `ExtractionSchema` over rendered HTML.
//! - `scripts` — page-side JavaScript used by the crawl directives.
use async_trait::async_trait;
use quote_common::Result;
use quote_common::policy::{BrowserSessionPolicy, CrawlDirectives};
use quote_common::schema::ExtractionSchema;

pub mod browser;
pub mod extract;
pub mod scripts;

pub use browser::ChromiumFetcher;

/// Single-shot fetch-and-extract operation.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Loads `url` and returns the extracted payload: a JSON array of records,
    /// or `None` when the page produced nothing to extract from.
    ///
    /// Any session the implementation opens must be released before this returns,
    /// whatever the outcome.
    async fn fetch(
        &self,
        url: &str,
        schema: &ExtractionSchema,
        policy: &BrowserSessionPolicy,
        directives: &CrawlDirectives,
    ) -> Result<Option<String>>;
}
