//! Price lookup pipeline.
//!
//! `QuoteScraper` turns a normalized symbol into a [`StockQuote`]: it builds the
//! quote page URL, calls the [`PageFetcher`] exactly once with the configured
//! schema, policy and directives, and classifies the raw payload. There is no
//! retry and no cache; each lookup is independent.
use std::sync::Arc;

use log::{error, info};
use quote_common::net::quote_page_url;
use quote_common::policy::{BrowserSessionPolicy, CrawlDirectives};
use quote_common::schema::{ExtractionSchema, PRICE_FIELD};
use quote_common::{NotFoundReason, QuoteError, Result, StockQuote, Symbol};
use serde_json::Value;

use crate::crawler::PageFetcher;

/// Scrape orchestrator shared by all request handlers.
pub struct QuoteScraper {
    fetcher: Arc<dyn PageFetcher>,
    schema: ExtractionSchema,
    policy: BrowserSessionPolicy,
    directives: CrawlDirectives,
}

impl QuoteScraper {
    /// Orchestrator configured for Yahoo Finance quote pages.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_profile(
            fetcher,
            ExtractionSchema::quote_price(),
            BrowserSessionPolicy::quote_page(),
            CrawlDirectives::quote_page(),
        )
    }

    /// Orchestrator with an explicit schema, policy and directives.
    pub fn with_profile(
        fetcher: Arc<dyn PageFetcher>,
        schema: ExtractionSchema,
        policy: BrowserSessionPolicy,
        directives: CrawlDirectives,
    ) -> Self {
        Self {
            fetcher,
            schema,
            policy,
            directives,
        }
    }

    /// Looks up the current price of `symbol`.
    pub async fn fetch_quote(&self, symbol: &Symbol) -> Result<StockQuote> {
        let url = quote_page_url(symbol);
        info!("Attempting to crawl: {}", url);

        let raw = self
            .fetcher
            .fetch(&url, &self.schema, &self.policy, &self.directives)
            .await?;
        info!("Raw extracted content: {:?}", raw);

        let content = match raw {
            Some(content) if !content.is_empty() => content,
            _ => {
                error!("No extracted content found for {}", symbol);
                return Err(QuoteError::NotFound(NotFoundReason::NoContent));
            }
        };

        match parse_price(&content) {
            Ok(Some(price)) => Ok(StockQuote::new(symbol, price)),
            Ok(None) => {
                error!("Price not found in extracted data for {}", symbol);
                Err(QuoteError::NotFound(NotFoundReason::PriceMissing))
            }
            Err(e) => {
                error!("JSON decoding error for {}: {}", symbol, e);
                Err(e)
            }
        }
    }
}

/// Reads the price from the first extracted record.
///
/// The payload must be a JSON array; only its first element is inspected.
/// `Ok(None)` covers an empty array, a first element that is not an object, and
/// a first record whose price is missing, `null`, `false`, empty or zero.
fn parse_price(content: &str) -> Result<Option<String>> {
    let records: Vec<Value> = serde_json::from_str(content)?;
    Ok(records
        .first()
        .and_then(Value::as_object)
        .and_then(|record| record.get(PRICE_FIELD))
        .and_then(price_text))
}

fn price_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some(value.to_string()),
        Value::Array(items) if !items.is_empty() => Some(value.to_string()),
        Value::Object(fields) if !fields.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        payload: Option<String>,
        urls: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(payload: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                payload: payload.map(str::to_string),
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for Canned {
        async fn fetch(
            &self,
            url: &str,
            _schema: &ExtractionSchema,
            _policy: &BrowserSessionPolicy,
            _directives: &CrawlDirectives,
        ) -> Result<Option<String>> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(self.payload.clone())
        }
    }

    async fn lookup(payload: Option<&str>, symbol: &str) -> Result<StockQuote> {
        let scraper = QuoteScraper::new(Canned::new(payload));
        scraper.fetch_quote(&Symbol::new(symbol).unwrap()).await
    }

    #[tokio::test]
    async fn returns_first_record_price() {
        let quote = lookup(Some(r#"[{"price": "189.50"}, {"price": "1.00"}]"#), "msft")
            .await
            .unwrap();
        assert_eq!(quote, StockQuote { symbol: "MSFT".into(), price: "189.50".into() });
    }

    #[tokio::test]
    async fn calls_fetcher_once_with_uppercase_url() {
        let fetcher = Canned::new(Some(r#"[{"price": "1"}]"#));
        let scraper = QuoteScraper::new(fetcher.clone());
        scraper.fetch_quote(&Symbol::new("aapl").unwrap()).await.unwrap();
        assert_eq!(
            *fetcher.urls.lock().unwrap(),
            vec!["https://finance.yahoo.com/quote/AAPL/".to_string()]
        );
    }

    #[tokio::test]
    async fn absent_or_empty_content_is_no_content() {
        for payload in [None, Some("")] {
            let err = lookup(payload, "XXXX").await.unwrap_err();
            assert!(matches!(err, QuoteError::NotFound(NotFoundReason::NoContent)));
        }
    }

    #[tokio::test]
    async fn falsy_price_is_price_missing() {
        for payload in [
            "[]",
            "[1, 2]",
            r#"[{}]"#,
            r#"[{"price": ""}]"#,
            r#"[{"price": null}]"#,
            r#"[{"price": 0}]"#,
        ] {
            let err = lookup(Some(payload), "AAPL").await.unwrap_err();
            assert!(
                matches!(err, QuoteError::NotFound(NotFoundReason::PriceMissing)),
                "payload {} gave {:?}",
                payload,
                err
            );
        }
    }

    #[tokio::test]
    async fn only_first_record_is_inspected() {
        let quote = lookup(Some(r#"[{"price": "189.50"}, null, 7]"#), "msft")
            .await
            .unwrap();
        assert_eq!(quote.price, "189.50");

        let err = lookup(Some(r#"[null, {"price": "1.00"}]"#), "msft")
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::NotFound(NotFoundReason::PriceMissing)));
    }

    #[tokio::test]
    async fn malformed_content_is_extraction_error() {
        for payload in ["<html>", r#"{"price": "1"}"#, r#""189.50""#, " "] {
            let err = lookup(Some(payload), "AAPL").await.unwrap_err();
            assert!(matches!(err, QuoteError::Extraction(_)), "payload {}", payload);
        }
    }

    #[test]
    fn numeric_price_keeps_json_text() {
        assert_eq!(parse_price(r#"[{"price": 189.5}]"#).unwrap().as_deref(), Some("189.5"));
    }
}
